use super::*;
use crate::model::{CompilationUnit, FieldInitializer};
use crate::vfs::FileId;

/// Shape of the initializer or delegate of the first field of the first class.
fn shape_of(initializer: &str) -> ExprShape {
    let source = format!("class A {{\n    val x {initializer}\n}}\n");
    let unit = CompilationUnit::parse(FileId::new("A.kt"), &source);
    match &unit.classes[0].fields[0].initializer {
        FieldInitializer::Value(shape) | FieldInitializer::Delegate(shape) => shape.clone(),
        FieldInitializer::None => panic!("no initializer in {source}"),
    }
}

fn path(segments: &[&str]) -> ExprShape {
    ExprShape::Path {
        segments: segments.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn dotted_names_are_paths() {
    assert_eq!(shape_of("= R.layout.main_activity"), path(&["R", "layout", "main_activity"]));
    assert_eq!(shape_of("= this.title"), path(&["this", "title"]));
    assert_eq!(shape_of("= R.layout.main_activity").path_leaf(), Some("main_activity"));
}

#[test]
fn calls_keep_callee_and_arguments() {
    let shape = shape_of("by bindView<TextView>(R.id.title_text)");
    assert_eq!(shape.callee_name(), Some("bindView"));
    assert_eq!(shape.arguments(), &[path(&["R", "id", "title_text"])]);
}

#[test]
fn named_arguments_are_unwrapped() {
    let shape = shape_of("= make(id = R.id.a, b())");
    assert_eq!(shape.arguments().len(), 2);
    assert_eq!(shape.arguments()[0], path(&["R", "id", "a"]));
    assert_eq!(shape.arguments()[1].callee_name(), Some("b"));
}

#[test]
fn callable_references_with_and_without_receiver() {
    assert_eq!(shape_of("= ItemBinding::inflate"), ExprShape::CallableReference {
        receiver: Some(vec!["ItemBinding".to_string()]),
        member: "inflate".to_string(),
    });
    assert_eq!(shape_of("= ::Holder"), ExprShape::CallableReference {
        receiver: None,
        member: "Holder".to_string(),
    });
    assert!(shape_of("= ::Holder").is_callable_reference());
}

#[test]
fn everything_else_is_other() {
    assert!(matches!(shape_of("= a + b"), ExprShape::Other { .. }));
    assert!(matches!(shape_of("= make().then()"), ExprShape::Other { .. }));
    assert_eq!(shape_of("= ids[0]").path_leaf(), None);
}
