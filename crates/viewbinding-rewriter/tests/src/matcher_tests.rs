use super::*;
use crate::model::CompilationUnit;
use crate::vfs::FileId;

fn classes(source: &str) -> Vec<ClassDeclaration> {
    CompilationUnit::parse(FileId::new("Test.kt"), source).classes
}

const ACTIVITY_SOURCE: &str = r#"package com.example

class MainActivity : BaseActivity() {
    override fun getBaseLayoutId() = R.layout.main_activity

    val title by bindView<TextView>(R.id.title_text)
    private val submit: Button by bindView(R.id.submit_button)
    val dynamic by bindView(ids[0])
    val plain = 3
}
"#;

#[test]
fn collects_bind_view_targets_in_declaration_order() {
    let class = &classes(ACTIVITY_SOURCE)[0];
    let matched = match_class(class, &VariantSpec::activity()).expect("match");

    assert_eq!(matched.class, "MainActivity");
    assert_eq!(matched.binding.name, "MainActivityBinding");
    assert_eq!(matched.base.name, "BaseActivity");
    let members: Vec<(&str, &str, &str)> = matched
        .targets
        .iter()
        .map(|target| (target.field.name.as_str(), target.xml_id.as_str(), target.member.as_str()))
        .collect();
    assert_eq!(members, vec![("title", "title_text", "titleText"), ("submit", "submit_button", "submitButton")]);
    assert_eq!(matched.skipped_fields, vec!["dynamic".to_string()]);
    assert!(matched.layout_accessor.is_some());
    assert!(!matched.has_binding_field);
}

#[test]
fn other_base_classes_do_not_match() {
    let source = "class Screen : AppCompatActivity() {\n    override fun getBaseLayoutId() = R.layout.screen\n}\n";
    assert!(match_class(&classes(source)[0], &VariantSpec::activity()).is_none());
}

#[test]
fn qualified_base_name_matches_on_its_leaf() {
    let source = "class Screen : com.example.base.BaseActivity() {\n    override fun getBaseLayoutId() = R.layout.screen\n}\n";
    let matched = match_class(&classes(source)[0], &VariantSpec::activity()).expect("match");
    assert_eq!(matched.base.name, "com.example.base.BaseActivity");
}

#[test]
fn class_without_binding_name_does_not_match() {
    let source = "class Screen : BaseActivity() {\n    val title by bindView(R.id.title)\n}\n";
    assert!(match_class(&classes(source)[0], &VariantSpec::activity()).is_none());
}

#[test]
fn adapter_variant_ignores_bind_view_fields() {
    let source = r#"
class ItemAdapter : BaseListAdapter<Item, ItemViewHolder>(ItemViewHolder::create) {
    override fun getBaseLayoutId() = R.layout.item_row
    val header by bindView(R.id.header)
}
"#;
    let matched = match_class(&classes(source)[0], &VariantSpec::adapter()).expect("match");
    assert!(matched.targets.is_empty());
    assert!(matched.skipped_fields.is_empty());
    assert_eq!(matched.binding.name, "ItemRowBinding");
}

#[test]
fn nested_view_holder_matches_independently() {
    let source = r#"
class ItemAdapter : BaseListAdapter<Item, ItemAdapter.Holder>(::Holder) {
    override fun getBaseLayoutId() = R.layout.item_row

    class Holder(view: View) : BaseViewHolder2<Item>(view) {
        override fun getBaseLayoutId() = R.layout.item_holder
        val name by bindView(R.id.item_name)
    }
}
"#;
    let all = classes(source);
    let holder = all.iter().find(|class| class.qualified_name == "ItemAdapter.Holder").expect("nested class");
    let matched = match_class(holder, &VariantSpec::view_holder()).expect("match");
    assert_eq!(matched.binding.name, "ItemHolderBinding");
    assert_eq!(matched.targets.len(), 1);
    assert!(match_class(&all[0], &VariantSpec::view_holder()).is_none());
}

#[test]
fn binding_field_counts_only_with_the_binding_type() {
    let typed = "class A : BaseActivity() {\n    override fun getBaseLayoutId() = R.layout.main_activity\n    lateinit var binding: MainActivityBinding\n}\n";
    let other = "class A : BaseActivity() {\n    override fun getBaseLayoutId() = R.layout.main_activity\n    lateinit var binding: OldBinding\n}\n";
    assert!(match_class(&classes(typed)[0], &VariantSpec::activity()).expect("match").has_binding_field);
    assert!(!match_class(&classes(other)[0], &VariantSpec::activity()).expect("match").has_binding_field);
}
