//! Per-base-class policies over the shared match/plan/apply machinery.
//!
//! A variant is pure data: adding one never requires new code, which is what
//! lets `[[custom_variants]]` in `viewbinding.toml` sit beside the built-ins.

use serde::{Deserialize, Serialize};

pub const ACTIVITY: &str = "activity";
pub const VIEW_HOLDER: &str = "view-holder";
pub const ADAPTER: &str = "adapter";

/// Which fields are treated as binding targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    /// `val x by bindView(R.id.some_id)`
    #[default]
    BindView,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeArgRewrite {
    #[default]
    Keep,
    /// Add the binding type as the last type argument.
    Append,
    /// Put the binding type at this index; appends when the list is exactly that long.
    ReplaceAt(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtorArgRewrite {
    #[default]
    Keep,
    /// Replace a callable-reference argument with `<Binding>::inflate`, or append one.
    ReplaceOrAppend,
    /// Replace a callable-reference argument with `<Binding>::inflate`; it must exist.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    /// Bare supertype name a class must extend to match.
    pub base: String,
    #[serde(default)]
    pub targets: TargetShape,
    #[serde(default = "default_true")]
    pub binding_field_fallback: bool,
    #[serde(default)]
    pub insert_binding_field: bool,
    #[serde(default = "default_true")]
    pub replace_layout_accessor: bool,
    #[serde(default)]
    pub remove_butterkt_bind: bool,
    #[serde(default)]
    pub output_base: Option<String>,
    #[serde(default)]
    pub type_args: TypeArgRewrite,
    #[serde(default)]
    pub ctor_args: CtorArgRewrite,
}

fn default_true() -> bool {
    true
}

impl VariantSpec {
    pub fn activity() -> Self {
        Self {
            name: ACTIVITY.to_string(),
            base: "BaseActivity".to_string(),
            targets: TargetShape::BindView,
            binding_field_fallback: true,
            insert_binding_field: true,
            replace_layout_accessor: true,
            remove_butterkt_bind: true,
            output_base: None,
            type_args: TypeArgRewrite::Keep,
            ctor_args: CtorArgRewrite::Keep,
        }
    }

    pub fn view_holder() -> Self {
        Self {
            name: VIEW_HOLDER.to_string(),
            base: "BaseViewHolder2".to_string(),
            targets: TargetShape::BindView,
            binding_field_fallback: true,
            insert_binding_field: false,
            replace_layout_accessor: true,
            remove_butterkt_bind: true,
            output_base: Some("BaseBindingViewHolder".to_string()),
            type_args: TypeArgRewrite::Append,
            ctor_args: CtorArgRewrite::ReplaceOrAppend,
        }
    }

    pub fn adapter() -> Self {
        Self {
            name: ADAPTER.to_string(),
            base: "BaseListAdapter".to_string(),
            targets: TargetShape::None,
            binding_field_fallback: true,
            insert_binding_field: false,
            replace_layout_accessor: true,
            remove_butterkt_bind: false,
            output_base: Some("BaseBindingListAdapter".to_string()),
            type_args: TypeArgRewrite::ReplaceAt(1),
            ctor_args: CtorArgRewrite::Replace,
        }
    }

    pub fn builtins() -> Vec<Self> {
        vec![Self::activity(), Self::view_holder(), Self::adapter()]
    }

    pub fn builtin(name: &str) -> Option<Self> {
        Self::builtins().into_iter().find(|variant| variant.name == name)
    }

    pub fn output_base_name(&self) -> &str {
        self.output_base.as_deref().unwrap_or(&self.base)
    }

    pub fn rewrites_supertype(&self) -> bool {
        self.output_base_name() != self.base
            || self.type_args != TypeArgRewrite::Keep
            || self.ctor_args != CtorArgRewrite::Keep
    }
}

#[cfg(test)]
#[path = "../tests/src/variant_tests.rs"]
mod tests;
