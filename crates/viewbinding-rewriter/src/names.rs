//! Binding type and member name synthesis.

use serde::Serialize;

use crate::case::{camel_to_snake, snake_to_lower_camel, snake_to_upper_camel};
use crate::model::{ClassDeclaration, MethodBody, MethodDeclaration};

pub const LAYOUT_ACCESSOR: &str = "getBaseLayoutId";
pub const BINDING_FIELD: &str = "binding";
pub const BINDING_SUFFIX: &str = "Binding";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum BindingNameSource {
    /// Derived from `getBaseLayoutId() = R.layout.<layout>`.
    LayoutAccessor { layout: String },
    /// Read from the declared type of an existing `binding` field.
    BindingField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingName {
    pub name: String,
    pub source: BindingNameSource,
}

impl BindingName {
    /// Layout resource name, recovered from the type name when it came from the field.
    pub fn layout_name(&self) -> String {
        match &self.source {
            BindingNameSource::LayoutAccessor {
                layout,
            } => layout.clone(),
            BindingNameSource::BindingField => {
                camel_to_snake(self.name.strip_suffix(BINDING_SUFFIX).unwrap_or(&self.name))
            },
        }
    }
}

pub fn binding_name(
    class: &ClassDeclaration,
    allow_field_fallback: bool,
) -> Option<BindingName> {
    if let Some(layout) = class.method(LAYOUT_ACCESSOR).and_then(layout_id) {
        return Some(BindingName {
            name: binding_type_for_layout(layout),
            source: BindingNameSource::LayoutAccessor {
                layout: layout.to_string(),
            },
        });
    }
    if !allow_field_fallback {
        return None;
    }
    let leaf = class.field(BINDING_FIELD)?.type_leaf()?;
    Some(BindingName {
        name: leaf.to_string(),
        source: BindingNameSource::BindingField,
    })
}

/// The layout identifier a `getBaseLayoutId` body refers to: `main_activity`
/// for both `= R.layout.main_activity` and `{ return R.layout.main_activity }`.
pub fn layout_id(method: &MethodDeclaration) -> Option<&str> {
    match &method.body {
        MethodBody::Expression(shape) | MethodBody::Block(Some(shape)) => shape.path_leaf(),
        _ => None,
    }
}

/// `main_activity` -> `MainActivityBinding`
pub fn binding_type_for_layout(layout: &str) -> String {
    format!("{}{BINDING_SUFFIX}", snake_to_upper_camel(layout))
}

/// `title_text` -> `titleText`
pub fn member_name(xml_id: &str) -> String {
    snake_to_lower_camel(xml_id)
}

#[cfg(test)]
#[path = "../tests/src/names_tests.rs"]
mod tests;
