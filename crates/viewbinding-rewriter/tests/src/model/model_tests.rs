use pretty_assertions::assert_eq;

use super::*;

fn parse(source: &str) -> CompilationUnit {
    CompilationUnit::parse(FileId::new("Test.kt"), source)
}

const SOURCE: &str = r#"package com.example.app

import android.os.Bundle
import com.example.base.BaseActivity as Base

class MainActivity : Base(), View.OnClickListener {
    private val title: TextView by bindView(R.id.title_text)
    lateinit var binding: MainActivityBinding
    internal var count = 0

    override fun getBaseLayoutId() = R.layout.main_activity

    override fun onClick(v: View) {
        count++
    }

    companion object {
        const val TAG = "main"
    }
}
"#;

#[test]
fn lowers_package_and_imports() {
    let unit = parse(SOURCE);
    assert_eq!(unit.package.as_ref().map(|package| package.name.as_str()), Some("com.example.app"));
    let imports: Vec<(&str, Option<&str>)> =
        unit.imports.iter().map(|import| (import.path.as_str(), import.alias.as_deref())).collect();
    assert_eq!(imports, vec![("android.os.Bundle", None), ("com.example.base.BaseActivity", Some("Base"))]);
    assert_eq!(unit.text(), SOURCE);
}

#[test]
fn lowers_class_members() {
    let unit = parse(SOURCE);
    let class = unit.class("MainActivity").expect("class");

    let supertypes: Vec<&str> = class.supertypes.iter().map(|supertype| supertype.name.as_str()).collect();
    assert_eq!(supertypes, vec!["Base", "View.OnClickListener"]);
    assert!(class.supertypes[0].constructor_arguments.is_some());
    assert!(class.supertypes[1].constructor_arguments.is_none());
    assert_eq!(class.supertypes[1].bare_name(), "OnClickListener");

    let title = class.field("title").expect("title");
    assert_eq!(title.visibility, Visibility::Private);
    assert_eq!(title.declared_type.as_deref(), Some("TextView"));
    assert!(matches!(title.initializer, FieldInitializer::Delegate(_)));
    assert_eq!(range_text(SOURCE, title.name_range), "title");

    let binding = class.field("binding").expect("binding");
    assert!(binding.is_lateinit);
    assert!(binding.is_var);
    assert_eq!(binding.type_leaf(), Some("MainActivityBinding"));
    assert_eq!(class.field("count").map(|field| field.visibility), Some(Visibility::Internal));

    let accessor = class.method("getBaseLayoutId").expect("accessor");
    assert!(accessor.is_override);
    assert!(matches!(accessor.body, MethodBody::Expression(_)));
    assert!(matches!(class.method("onClick").map(|method| &method.body), Some(MethodBody::Block(None))));
    assert_eq!(class.body_open().map(|offset| &SOURCE[usize::from(offset) - 1..usize::from(offset)]), Some("{"));
}

#[test]
fn unnamed_companion_is_named_companion() {
    let unit = parse(SOURCE);
    let names: Vec<&str> = unit.classes.iter().map(|class| class.qualified_name.as_str()).collect();
    assert_eq!(names, vec!["MainActivity", "MainActivity.Companion"]);
    let companion = unit.class("MainActivity.Companion").expect("companion");
    assert!(companion.field("TAG").is_some());
}

#[test]
fn supertype_argument_lists_carry_ranges() {
    let source = "class Holder(view: View) : BaseViewHolder2<Item, Extra>(view, ::create)\n";
    let unit = parse(source);
    let supertype = &unit.classes[0].supertypes[0];

    let type_args = supertype.type_arguments.as_ref().expect("type args");
    let texts: Vec<&str> = type_args.arguments.iter().map(|argument| argument.text.as_str()).collect();
    assert_eq!(texts, vec!["Item", "Extra"]);
    let closing = type_args.closing.expect("closing >");
    assert_eq!(&source[usize::from(closing)..usize::from(closing) + 1], ">");

    let ctor_args = supertype.constructor_arguments.as_ref().expect("ctor args");
    assert_eq!(ctor_args.arguments.len(), 2);
    assert!(ctor_args.arguments[1].shape.is_callable_reference());
    assert_eq!(range_text(source, ctor_args.arguments[1].range), "::create");
}

#[test]
fn with_text_reparses() {
    let unit = parse("class A : BaseActivity()\n");
    let next = unit.with_text("class B : BaseActivity()\n");
    assert_eq!(next.file, unit.file);
    assert!(next.class("B").is_some());
    assert!(next.class("A").is_none());
}
