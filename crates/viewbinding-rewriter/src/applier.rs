//! Applies the structural part of a [`RewritePlan`] to one file.
//!
//! Each edit is a whole-document transformation: the previous output is
//! parsed again before the next edit is located, so offsets never go stale.
//! Renames are not applied here; they go through the host
//! (see [`crate::rename`]) before the plan reaches the applier.

use once_cell::sync::Lazy;
use regex::Regex;
use rowan::{TextRange, TextSize};

use crate::error::{RewriteError, RewriteResult};
use crate::model::{ClassDeclaration, CompilationUnit, SupertypeReference};
use crate::names::{BINDING_FIELD, LAYOUT_ACCESSOR};
use crate::plan::{DeleteTarget, Replacement, RewriteEdit, RewritePlan};
use crate::syntax::helpers::{full_line_range, indentation_at, line_end, line_start, range_text, splice};
use crate::variant::{CtorArgRewrite, TypeArgRewrite};

const INDENT_UNIT: &str = "    ";

static BUTTERKT_BIND_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*ButterKt\.bind\(this\)[ \t]*\r?\n").expect("valid regex"));

/// Applies every non-rename edit of `plan` in order.
///
/// When a required edit cannot be located the whole plan fails and the
/// caller keeps `unit` as it was.
pub fn apply(
    unit: &CompilationUnit,
    plan: &RewritePlan,
) -> RewriteResult<CompilationUnit> {
    let mut current = unit.clone();
    for edit in &plan.edits {
        match apply_edit(&current, &plan.class, edit)? {
            Some(text) => current = current.with_text(&text),
            None if edit.required() && !is_satisfied_no_op(edit) => {
                return Err(RewriteError::not_located(edit.to_string(), &plan.class));
            },
            None => {},
        }
    }
    Ok(current)
}

/// Replaces every placeholder prefix in `text` with `binding.`.
pub fn resolve_placeholders(
    text: &str,
    prefix: &str,
) -> String {
    text.replace(prefix, "binding.")
}

/// Edits whose `None` result means "already in the desired state".
fn is_satisfied_no_op(edit: &RewriteEdit) -> bool {
    matches!(edit, RewriteEdit::RenameIdentifier(_) | RewriteEdit::InsertImport { .. } | RewriteEdit::InsertField { .. })
}

/// Returns the new text, `None` for a no-op, `Err` when a located edit is impossible.
fn apply_edit(
    unit: &CompilationUnit,
    class_name: &str,
    edit: &RewriteEdit,
) -> RewriteResult<Option<String>> {
    match edit {
        RewriteEdit::RenameIdentifier(_) => Ok(None),
        RewriteEdit::DeleteRange(DeleteTarget::Field {
            class,
            name,
        }) => Ok(find_class(unit, class).and_then(|class| delete_field(unit, class, name))),
        RewriteEdit::DeleteRange(DeleteTarget::ButterKtBind) => Ok(remove_butterkt_bind(unit.text())),
        RewriteEdit::InsertField {
            class,
            binding_name,
        } => {
            let class_decl = find_class(unit, class).ok_or_else(|| RewriteError::not_located(edit.to_string(), class))?;
            if has_binding_field(class_decl, binding_name)? {
                return Ok(None);
            }
            insert_binding_field(unit, class_decl, binding_name)
                .map(Some)
                .ok_or_else(|| RewriteError::not_located(edit.to_string(), class))
        },
        RewriteEdit::InsertImport {
            path,
        } => {
            if has_import(unit.text(), path) {
                return Ok(None);
            }
            insert_import(unit, path).map(Some).ok_or_else(|| RewriteError::not_located(edit.to_string(), class_name))
        },
        RewriteEdit::ReplaceRange(Replacement::LayoutAccessor {
            class,
            binding_name,
        }) => {
            let Some(class_decl) = find_class(unit, class) else {
                return Ok(None);
            };
            has_binding_field(class_decl, binding_name)?;
            Ok(replace_layout_accessor(unit, class_decl, binding_name))
        },
        RewriteEdit::ReplaceRange(Replacement::Supertype {
            class,
            from,
            to,
            binding_name,
            type_args,
            ctor_args,
        }) => {
            let Some(supertype) = find_class(unit, class)
                .and_then(|class| class.supertypes.iter().find(|supertype| supertype.bare_name() == from))
            else {
                return Ok(None);
            };
            let rewrite = SupertypeRewrite {
                from,
                to,
                binding_name,
                type_args: *type_args,
                ctor_args: *ctor_args,
            };
            rewrite
                .apply(unit.text(), supertype)
                .map(Some)
                .ok_or_else(|| RewriteError::not_located(edit.to_string(), class))
        },
        RewriteEdit::ReplaceRange(Replacement::Placeholder {
            prefix,
        }) => {
            if unit.text().contains(prefix.as_str()) {
                Ok(Some(resolve_placeholders(unit.text(), prefix)))
            } else {
                Ok(None)
            }
        },
    }
}

fn find_class<'a>(
    unit: &'a CompilationUnit,
    qualified_name: &str,
) -> Option<&'a ClassDeclaration> {
    unit.class(qualified_name)
}

/// Whether `binding: <binding_name>` is declared; a `binding` of any other type is a conflict.
fn has_binding_field(
    class: &ClassDeclaration,
    binding_name: &str,
) -> RewriteResult<bool> {
    let Some(field) = class.field(BINDING_FIELD) else {
        return Ok(false);
    };
    match field.type_leaf() {
        Some(leaf) if leaf == binding_name => Ok(true),
        found => Err(RewriteError::BindingFieldConflict {
            class: class.qualified_name.clone(),
            found: found.unwrap_or("an untyped field").to_string(),
            expected: binding_name.to_string(),
        }),
    }
}

fn delete_field(
    unit: &CompilationUnit,
    class: &ClassDeclaration,
    name: &str,
) -> Option<String> {
    let field = class.field(name)?;
    let range = full_line_range(unit.text(), field.range);
    Some(splice(unit.text(), &mut [(range, String::new())]))
}

fn insert_binding_field(
    unit: &CompilationUnit,
    class: &ClassDeclaration,
    binding_name: &str,
) -> Option<String> {
    let open = class.body_open()?;
    let indent = format!("{}{INDENT_UNIT}", indentation_at(unit.text(), class.range.start()));
    let declaration = format!("\n{indent}private lateinit var {BINDING_FIELD}: {binding_name}\n");
    Some(splice(unit.text(), &mut [(TextRange::empty(open), declaration)]))
}

/// The intentionally weak presence check: any import line mentioning `path`.
fn has_import(
    text: &str,
    path: &str,
) -> bool {
    Regex::new(&format!("import.*{}", regex::escape(path))).is_ok_and(|re| re.is_match(text))
}

/// Inserts `import <path>` on the line after the package header.
fn insert_import(
    unit: &CompilationUnit,
    path: &str,
) -> Option<String> {
    let package = unit.package.as_ref()?;
    let text = unit.text();
    let end = line_end(text, package.range.end());
    let (offset, line) = if usize::from(end) < text.len() {
        (end + TextSize::from(1), format!("import {path}\n"))
    } else {
        (end, format!("\nimport {path}"))
    };
    Some(splice(text, &mut [(TextRange::empty(offset), line)]))
}

/// Replaces the accessor's lines with the generated `inflateViewBinding`.
fn replace_layout_accessor(
    unit: &CompilationUnit,
    class: &ClassDeclaration,
    binding_name: &str,
) -> Option<String> {
    let method = class.method(LAYOUT_ACCESSOR)?;
    let text = unit.text();
    let indent = indentation_at(text, method.range.start());

    let line_begin = line_start(text, method.range.start());
    let owns_line_start = range_text(text, TextRange::new(line_begin, method.range.start())).trim().is_empty();
    let start = if owns_line_start {
        line_begin
    } else {
        method.range.start()
    };

    let line_finish = line_end(text, method.range.end());
    let owns_line_end = range_text(text, TextRange::new(method.range.end(), line_finish)).trim().is_empty();
    let end = if owns_line_end {
        line_finish
    } else {
        method.range.end()
    };

    let lead = if owns_line_start {
        indent
    } else {
        ""
    };
    let replacement = format!(
        "{lead}override fun inflateViewBinding(layoutInflater: LayoutInflater) =\n\
         {indent}{INDENT_UNIT}{binding_name}.inflate(layoutInflater).also {{ binding = it }}"
    );
    Some(splice(text, &mut [(TextRange::new(start, end), replacement)]))
}

fn remove_butterkt_bind(text: &str) -> Option<String> {
    if !BUTTERKT_BIND_LINE.is_match(text) {
        return None;
    }
    Some(BUTTERKT_BIND_LINE.replace_all(text, "").into_owned())
}

struct SupertypeRewrite<'a> {
    from: &'a str,
    to: &'a str,
    binding_name: &'a str,
    type_args: TypeArgRewrite,
    ctor_args: CtorArgRewrite,
}

impl SupertypeRewrite<'_> {
    /// Rewrites one supertype entry; `None` when the entry lacks a shape the rewrite needs.
    fn apply(
        &self,
        text: &str,
        supertype: &SupertypeReference,
    ) -> Option<String> {
        let mut edits: Vec<(TextRange, String)> = Vec::new();
        // Text generated right after the name, for lists that do not exist yet.
        let mut name_suffix = String::new();
        let inflate = format!("{}::inflate", self.binding_name);

        match (self.type_args, &supertype.type_arguments) {
            (TypeArgRewrite::Keep, _) => {},
            (TypeArgRewrite::Append, Some(list)) => {
                let closing = list.closing?;
                let insertion = if list.arguments.is_empty() {
                    self.binding_name.to_string()
                } else {
                    format!(", {}", self.binding_name)
                };
                edits.push((TextRange::empty(closing), insertion));
            },
            (TypeArgRewrite::Append, None) | (TypeArgRewrite::ReplaceAt(0), None) => {
                name_suffix.push_str(&format!("<{}>", self.binding_name));
            },
            (TypeArgRewrite::ReplaceAt(index), Some(list)) => {
                if let Some(argument) = list.arguments.get(index) {
                    edits.push((argument.range, self.binding_name.to_string()));
                } else if index == list.arguments.len() {
                    let closing = list.closing?;
                    let insertion = if index == 0 {
                        self.binding_name.to_string()
                    } else {
                        format!(", {}", self.binding_name)
                    };
                    edits.push((TextRange::empty(closing), insertion));
                } else {
                    return None;
                }
            },
            (TypeArgRewrite::ReplaceAt(_), None) => return None,
        }

        match (self.ctor_args, &supertype.constructor_arguments) {
            (CtorArgRewrite::Keep, _) => {},
            (mode, Some(list)) => {
                match list.arguments.iter().find(|argument| argument.shape.is_callable_reference()) {
                    Some(argument) => edits.push((argument.range, inflate)),
                    None if mode == CtorArgRewrite::ReplaceOrAppend => {
                        let closing = list.closing?;
                        let insertion = if list.arguments.is_empty() {
                            inflate
                        } else {
                            format!(", {inflate}")
                        };
                        edits.push((TextRange::empty(closing), insertion));
                    },
                    None => return None,
                }
            },
            (CtorArgRewrite::ReplaceOrAppend, None) => match supertype.type_arguments.as_ref().and_then(|list| list.closing) {
                Some(closing) if name_suffix.is_empty() => {
                    edits.push((TextRange::empty(closing + TextSize::from(1)), format!("({inflate})")));
                },
                _ => name_suffix.push_str(&format!("({inflate})")),
            },
            (CtorArgRewrite::Replace, None) => return None,
        }

        // Only the last name segment is replaced so qualified references keep their package.
        let name_end = supertype.name_range.end();
        let segment_start = name_end.checked_sub(TextSize::of(self.from))?;
        if range_text(text, TextRange::new(segment_start, name_end)) != self.from {
            return None;
        }
        edits.push((TextRange::new(segment_start, name_end), format!("{}{name_suffix}", self.to)));

        Some(splice(text, &mut edits))
    }
}

#[cfg(test)]
#[path = "../tests/src/applier_tests.rs"]
mod tests;
