use super::*;
use crate::model::CompilationUnit;
use crate::vfs::FileId;

fn first_class(source: &str) -> ClassDeclaration {
    let unit = CompilationUnit::parse(FileId::new("Test.kt"), source);
    unit.classes.into_iter().next().expect("one class")
}

#[test]
fn binding_name_comes_from_expression_accessor() {
    let class = first_class(
        "class MainActivity : BaseActivity() {\n    override fun getBaseLayoutId() = R.layout.main_activity\n}\n",
    );
    let name = binding_name(&class, true).expect("binding name");
    assert_eq!(name.name, "MainActivityBinding");
    assert_eq!(name.source, BindingNameSource::LayoutAccessor {
        layout: "main_activity".to_string(),
    });
    assert_eq!(name.layout_name(), "main_activity");
}

#[test]
fn binding_name_comes_from_block_accessor() {
    let class = first_class(
        "class A : BaseActivity() {\n    override fun getBaseLayoutId(): Int {\n        return R.layout.item_row\n    }\n}\n",
    );
    assert_eq!(binding_name(&class, true).map(|name| name.name), Some("ItemRowBinding".to_string()));
}

#[test]
fn binding_name_falls_back_to_binding_field_type() {
    let class = first_class("class A : BaseActivity() {\n    lateinit var binding: com.example.CustomBinding\n}\n");
    let name = binding_name(&class, true).expect("binding name");
    assert_eq!(name.name, "CustomBinding");
    assert_eq!(name.source, BindingNameSource::BindingField);
    assert_eq!(name.layout_name(), "custom");
}

#[test]
fn binding_name_requires_a_source() {
    let class = first_class("class A : BaseActivity() {\n    lateinit var binding: CustomBinding\n}\n");
    assert!(binding_name(&class, false).is_none());
    let bare = first_class("class A : BaseActivity()\n");
    assert!(binding_name(&bare, true).is_none());
}

#[test]
fn accessor_with_computed_body_has_no_layout() {
    let class = first_class("class A : BaseActivity() {\n    override fun getBaseLayoutId() = pickLayout()\n}\n");
    let accessor = class.method(LAYOUT_ACCESSOR).expect("accessor");
    assert_eq!(layout_id(accessor), None);
}

#[test]
fn member_and_type_names() {
    assert_eq!(member_name("title_text"), "titleText");
    assert_eq!(binding_type_for_layout("main_activity"), "MainActivityBinding");
}
