use pretty_assertions::assert_eq;

use super::*;
use crate::matcher::match_class;
use crate::plan::{PlanContext, plan};
use crate::variant::VariantSpec;
use crate::vfs::FileId;

fn plan_for(
    unit: &CompilationUnit,
    class: &str,
    variant: &VariantSpec,
) -> RewritePlan {
    let class = unit.class(class).expect("class");
    let matched = match_class(class, variant).expect("match");
    plan(class, &matched, variant, PlanContext {
        file: &unit.file,
        app_prefix: "com.example",
        placeholder_prefix: "tmp_",
    })
}

fn unit(source: &str) -> CompilationUnit {
    CompilationUnit::parse(FileId::new("Test.kt"), source)
}

/// Plans against `source`, then applies to the same text with the plan's renames done by hand.
fn rewrite(
    source: &str,
    class: &str,
    variant: &VariantSpec,
) -> RewriteResult<String> {
    let original = unit(source);
    let plan = plan_for(&original, class, variant);
    let mut renamed = source.to_string();
    for rename in plan.renames() {
        renamed = renamed.replace(&rename.field.name, &rename.new_name);
    }
    apply(&original.with_text(&renamed), &plan).map(|unit| unit.text().to_string())
}

#[test]
fn activity_is_fully_migrated() {
    let source = r#"package com.example

class MainActivity : BaseActivity() {
    override fun getBaseLayoutId() = R.layout.main_activity
    val title by bindView(R.id.title_text)

    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        ButterKt.bind(this)
        title.text = "hi"
    }
}
"#;
    let expected = r#"package com.example
import com.example.databinding.MainActivityBinding
import android.view.LayoutInflater

class MainActivity : BaseActivity() {
    private lateinit var binding: MainActivityBinding

    override fun inflateViewBinding(layoutInflater: LayoutInflater) =
        MainActivityBinding.inflate(layoutInflater).also { binding = it }

    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        binding.titleText.text = "hi"
    }
}
"#;
    assert_eq!(rewrite(source, "MainActivity", &VariantSpec::activity()).expect("rewrite"), expected);
}

#[test]
fn existing_binding_field_and_imports_are_kept() {
    let source = r#"package com.example

import android.view.LayoutInflater
import com.example.databinding.CustomBinding

class MainActivity : BaseActivity() {
    lateinit var binding: CustomBinding
}
"#;
    assert_eq!(rewrite(source, "MainActivity", &VariantSpec::activity()).expect("rewrite"), source);
}

#[test]
fn block_accessor_is_replaced_with_its_indentation() {
    let source = r#"package com.example

class Screen : BaseActivity() {
    override fun getBaseLayoutId(): Int {
        return R.layout.screen
    }
}
"#;
    let output = rewrite(source, "Screen", &VariantSpec::activity()).expect("rewrite");
    assert!(output.contains(
        "    override fun inflateViewBinding(layoutInflater: LayoutInflater) =\n        \
         ScreenBinding.inflate(layoutInflater).also { binding = it }\n}"
    ));
    assert!(!output.contains("getBaseLayoutId"));
}

#[test]
fn view_holder_supertype_gains_binding_arguments() {
    let source = r#"package com.example

class Holder(view: View) : BaseViewHolder2<Item>(view) {
    override fun getBaseLayoutId() = R.layout.item_holder
}
"#;
    let output = rewrite(source, "Holder", &VariantSpec::view_holder()).expect("rewrite");
    assert!(output.contains(
        "class Holder(view: View) : BaseBindingViewHolder<Item, ItemHolderBinding>(view, ItemHolderBinding::inflate) {"
    ));
    assert!(!output.contains("private lateinit var binding"));
}

#[test]
fn view_holder_callable_reference_is_replaced() {
    let source = r#"package com.example

class Holder(parent: ViewGroup) : BaseViewHolder2<Item>(::create) {
    override fun getBaseLayoutId() = R.layout.item_holder
}
"#;
    let output = rewrite(source, "Holder", &VariantSpec::view_holder()).expect("rewrite");
    assert!(output.contains(": BaseBindingViewHolder<Item, ItemHolderBinding>(ItemHolderBinding::inflate) {"));
}

#[test]
fn view_holder_without_lists_gets_both() {
    let source = r#"package com.example

class Holder : com.example.base.BaseViewHolder2 {
    override fun getBaseLayoutId() = R.layout.item_holder
}
"#;
    let output = rewrite(source, "Holder", &VariantSpec::view_holder()).expect("rewrite");
    assert!(output.contains(
        ": com.example.base.BaseBindingViewHolder<ItemHolderBinding>(ItemHolderBinding::inflate) {"
    ));
}

#[test]
fn adapter_replaces_second_type_argument_and_factory() {
    let source = r#"package com.example

class ItemAdapter : BaseListAdapter<Item, ItemViewHolder>(ItemViewHolder::create) {
    override fun getBaseLayoutId() = R.layout.item_row
}
"#;
    let output = rewrite(source, "ItemAdapter", &VariantSpec::adapter()).expect("rewrite");
    assert!(output.contains(
        "class ItemAdapter : BaseBindingListAdapter<Item, ItemRowBinding>(ItemRowBinding::inflate) {"
    ));
}

#[test]
fn adapter_without_factory_fails_and_leaves_input_alone() {
    let source = r#"package com.example

class ItemAdapter : BaseListAdapter<Item, ItemViewHolder>() {
    override fun getBaseLayoutId() = R.layout.item_row
}
"#;
    let original = unit(source);
    let plan = plan_for(&original, "ItemAdapter", &VariantSpec::adapter());
    let error = apply(&original, &plan).expect_err("no callable reference to replace");
    assert!(matches!(error, RewriteError::EditNotLocated { ref edit, .. } if edit.contains("BaseListAdapter")));
    assert_eq!(original.text(), source);
}

#[test]
fn missing_package_header_fails_import_insertion() {
    let source = "class Screen : BaseActivity() {\n    override fun getBaseLayoutId() = R.layout.screen\n}\n";
    let error = rewrite(source, "Screen", &VariantSpec::activity()).expect_err("no package header");
    assert!(error.to_string().contains("import"));
}

#[test]
fn import_check_is_a_substring_match() {
    assert!(has_import("import android.view.LayoutInflater\n", "android.view.LayoutInflater"));
    assert!(has_import("import android.view.LayoutInflaterCompat\n", "android.view.LayoutInflater"));
    assert!(!has_import("// android.view.LayoutInflater\n", "android.view.LayoutInflater"));
}

#[test]
fn butterkt_lines_are_removed_everywhere() {
    let text = "fun a() {\n    ButterKt.bind(this)\n}\nfun b() {\n\tButterKt.bind(this)  \r\n}\n";
    assert_eq!(remove_butterkt_bind(text).as_deref(), Some("fun a() {\n}\nfun b() {\n}\n"));
    assert_eq!(remove_butterkt_bind("fun a() {}\n"), None);
}

#[test]
fn placeholders_resolve_to_binding_members() {
    assert_eq!(
        resolve_placeholders("tmp_titleText.text = tmp_name", "tmp_"),
        "binding.titleText.text = binding.name"
    );
}

#[test]
fn empty_plan_returns_input_unchanged() {
    let original = unit("package a\n\nclass A\n");
    let plan = RewritePlan {
        class: "A".to_string(),
        variant: "activity".to_string(),
        binding_name: "ABinding".to_string(),
        edits: Vec::new(),
    };
    assert_eq!(apply(&original, &plan).expect("no edits").text(), original.text());
}

#[test]
fn binding_field_of_another_type_fails_the_plan() {
    let source = r#"package com.example

class MainActivity : BaseActivity() {
    lateinit var binding: OldBinding
    override fun getBaseLayoutId() = R.layout.main_activity
}
"#;
    let error = rewrite(source, "MainActivity", &VariantSpec::activity()).expect_err("conflicting binding field");
    assert!(matches!(
        error,
        RewriteError::BindingFieldConflict { ref found, ref expected, .. }
            if found == "OldBinding" && expected == "MainActivityBinding"
    ));
}

#[test]
fn view_holder_with_conflicting_binding_field_fails() {
    let source = r#"package com.example

class Holder(view: View) : BaseViewHolder2<Item>(view) {
    val binding: LegacyBinding = LegacyBinding.bind(view)
    override fun getBaseLayoutId() = R.layout.item_holder
}
"#;
    let error = rewrite(source, "Holder", &VariantSpec::view_holder()).expect_err("conflicting binding field");
    assert!(matches!(error, RewriteError::BindingFieldConflict { .. }));
}
