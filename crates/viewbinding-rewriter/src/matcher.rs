use crate::model::{ClassDeclaration, FieldDeclaration, FieldInitializer, MethodDeclaration, SupertypeReference};
use crate::names::{self, BINDING_FIELD, BindingName, LAYOUT_ACCESSOR};
use crate::variant::{TargetShape, VariantSpec};

pub const BIND_VIEW: &str = "bindView";

/// A field that will be replaced by a generated binding member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTarget {
    pub field: FieldDeclaration,
    /// `title_text` in `bindView(R.id.title_text)`.
    pub xml_id: String,
    /// `titleText`
    pub member: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub class: String,
    pub variant: String,
    pub binding: BindingName,
    pub base: SupertypeReference,
    pub targets: Vec<BindingTarget>,
    /// `bindView` fields whose first argument is not an identifier.
    pub skipped_fields: Vec<String>,
    pub layout_accessor: Option<MethodDeclaration>,
    /// A `binding` field typed as the binding class already exists.
    pub has_binding_field: bool,
}

/// Matches one class against one variant. Pure: no logging, no I/O.
pub fn match_class(
    class: &ClassDeclaration,
    variant: &VariantSpec,
) -> Option<MatchResult> {
    let base = class.supertypes.iter().find(|supertype| supertype.bare_name() == variant.base)?;
    let binding = names::binding_name(class, variant.binding_field_fallback)?;

    let mut targets = Vec::new();
    let mut skipped_fields = Vec::new();
    if variant.targets == TargetShape::BindView {
        for field in &class.fields {
            match bind_view_target(field) {
                Some(Ok(target)) => targets.push(target),
                Some(Err(())) => skipped_fields.push(field.name.clone()),
                None => {},
            }
        }
    }

    let has_binding_field =
        class.field(BINDING_FIELD).and_then(FieldDeclaration::type_leaf) == Some(binding.name.as_str());
    Some(MatchResult {
        class: class.qualified_name.clone(),
        variant: variant.name.clone(),
        binding,
        base: base.clone(),
        targets,
        skipped_fields,
        layout_accessor: class.method(LAYOUT_ACCESSOR).cloned(),
        has_binding_field,
    })
}

/// `None` when the field is not a `bindView` delegate at all; `Err` when it
/// is one but its first argument does not name an id.
fn bind_view_target(field: &FieldDeclaration) -> Option<Result<BindingTarget, ()>> {
    let FieldInitializer::Delegate(shape) = &field.initializer else {
        return None;
    };
    if shape.callee_name() != Some(BIND_VIEW) {
        return None;
    }
    let Some(xml_id) = shape.arguments().first().and_then(|arg| arg.path_leaf()) else {
        return Some(Err(()));
    };
    Some(Ok(BindingTarget {
        field: field.clone(),
        xml_id: xml_id.to_string(),
        member: names::member_name(xml_id),
    }))
}

#[cfg(test)]
#[path = "../tests/src/matcher_tests.rs"]
mod tests;
