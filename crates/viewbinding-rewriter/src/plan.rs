use std::fmt;

use crate::host::FieldId;
use crate::matcher::MatchResult;
use crate::model::ClassDeclaration;
use crate::variant::{CtorArgRewrite, TypeArgRewrite, VariantSpec};
use crate::vfs::FileId;

pub const LAYOUT_INFLATER_IMPORT: &str = "android.view.LayoutInflater";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEdit {
    pub field: FieldId,
    /// Temporary name: placeholder prefix plus `member`.
    pub new_name: String,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// A field declaration, found by its (already renamed) name.
    Field { class: String, name: String },
    /// `ButterKt.bind(this)` call lines anywhere in the file.
    ButterKtBind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// `override fun getBaseLayoutId...` becomes `inflateViewBinding`.
    LayoutAccessor { class: String, binding_name: String },
    Supertype {
        class: String,
        from: String,
        to: String,
        binding_name: String,
        type_args: TypeArgRewrite,
        ctor_args: CtorArgRewrite,
    },
    /// Every `prefix` occurrence becomes `binding.`.
    Placeholder { prefix: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteEdit {
    RenameIdentifier(RenameEdit),
    DeleteRange(DeleteTarget),
    InsertField { class: String, binding_name: String },
    InsertImport { path: String },
    ReplaceRange(Replacement),
}

impl RewriteEdit {
    /// Required edits fail the whole plan when they cannot be located.
    pub fn required(&self) -> bool {
        !matches!(
            self,
            RewriteEdit::DeleteRange(DeleteTarget::ButterKtBind) | RewriteEdit::ReplaceRange(Replacement::Placeholder { .. })
        )
    }
}

impl fmt::Display for RewriteEdit {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RewriteEdit::RenameIdentifier(rename) => write!(f, "rename of `{}`", rename.field.name),
            RewriteEdit::DeleteRange(DeleteTarget::Field {
                name, ..
            }) => write!(f, "field `{name}`"),
            RewriteEdit::DeleteRange(DeleteTarget::ButterKtBind) => f.write_str("ButterKt.bind(this) call"),
            RewriteEdit::InsertField {
                ..
            } => f.write_str("class body for the binding field"),
            RewriteEdit::InsertImport {
                path,
            } => write!(f, "package header for import `{path}`"),
            RewriteEdit::ReplaceRange(Replacement::LayoutAccessor {
                ..
            }) => f.write_str("getBaseLayoutId accessor"),
            RewriteEdit::ReplaceRange(Replacement::Supertype {
                from, ..
            }) => write!(f, "supertype `{from}`"),
            RewriteEdit::ReplaceRange(Replacement::Placeholder {
                prefix,
            }) => write!(f, "placeholder `{prefix}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePlan {
    pub class: String,
    pub variant: String,
    pub binding_name: String,
    pub edits: Vec<RewriteEdit>,
}

impl RewritePlan {
    pub fn renames(&self) -> impl Iterator<Item = &RenameEdit> {
        self.edits.iter().filter_map(|edit| match edit {
            RewriteEdit::RenameIdentifier(rename) => Some(rename),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Per-run inputs the planner needs beyond the match itself.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub file: &'a FileId,
    pub app_prefix: &'a str,
    pub placeholder_prefix: &'a str,
}

/// Builds the edit list for one matched class, in application order.
pub fn plan(
    class: &ClassDeclaration,
    matched: &MatchResult,
    variant: &VariantSpec,
    ctx: PlanContext<'_>,
) -> RewritePlan {
    let binding_name = matched.binding.name.clone();
    let mut edits = Vec::new();

    for target in &matched.targets {
        edits.push(RewriteEdit::RenameIdentifier(RenameEdit {
            field: FieldId {
                file: ctx.file.clone(),
                class: class.qualified_name.clone(),
                name: target.field.name.clone(),
            },
            new_name: format!("{}{}", ctx.placeholder_prefix, target.member),
            member: target.member.clone(),
        }));
    }
    for target in &matched.targets {
        edits.push(RewriteEdit::DeleteRange(DeleteTarget::Field {
            class: class.qualified_name.clone(),
            name: format!("{}{}", ctx.placeholder_prefix, target.member),
        }));
    }

    if variant.insert_binding_field && !matched.has_binding_field {
        edits.push(RewriteEdit::InsertField {
            class: class.qualified_name.clone(),
            binding_name: binding_name.clone(),
        });
    }

    edits.push(RewriteEdit::InsertImport {
        path: LAYOUT_INFLATER_IMPORT.to_string(),
    });
    edits.push(RewriteEdit::InsertImport {
        path: format!("{}.databinding.{binding_name}", ctx.app_prefix),
    });

    if variant.replace_layout_accessor && matched.layout_accessor.is_some() {
        edits.push(RewriteEdit::ReplaceRange(Replacement::LayoutAccessor {
            class: class.qualified_name.clone(),
            binding_name: binding_name.clone(),
        }));
    }

    if variant.remove_butterkt_bind {
        edits.push(RewriteEdit::DeleteRange(DeleteTarget::ButterKtBind));
    }

    if variant.rewrites_supertype() {
        edits.push(RewriteEdit::ReplaceRange(Replacement::Supertype {
            class: class.qualified_name.clone(),
            from: variant.base.clone(),
            to: variant.output_base_name().to_string(),
            binding_name: binding_name.clone(),
            type_args: variant.type_args,
            ctor_args: variant.ctor_args,
        }));
    }

    if !matched.targets.is_empty() {
        edits.push(RewriteEdit::ReplaceRange(Replacement::Placeholder {
            prefix: ctx.placeholder_prefix.to_string(),
        }));
    }

    RewritePlan {
        class: class.qualified_name.clone(),
        variant: variant.name.clone(),
        binding_name,
        edits,
    }
}

#[cfg(test)]
#[path = "../tests/src/plan_tests.rs"]
mod tests;
