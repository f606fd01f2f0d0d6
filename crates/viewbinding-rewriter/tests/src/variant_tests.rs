use super::*;

#[test]
fn builtins_are_looked_up_by_name() {
    let names: Vec<String> = VariantSpec::builtins().into_iter().map(|variant| variant.name).collect();
    assert_eq!(names, vec![ACTIVITY, VIEW_HOLDER, ADAPTER]);
    assert_eq!(VariantSpec::builtin(ADAPTER).map(|variant| variant.base), Some("BaseListAdapter".to_string()));
    assert!(VariantSpec::builtin("fragment").is_none());
}

#[test]
fn activity_keeps_its_supertype() {
    let activity = VariantSpec::activity();
    assert_eq!(activity.output_base_name(), "BaseActivity");
    assert!(!activity.rewrites_supertype());
}

#[test]
fn view_holder_and_adapter_rewrite_their_supertype() {
    assert!(VariantSpec::view_holder().rewrites_supertype());
    assert!(VariantSpec::adapter().rewrites_supertype());
    assert_eq!(VariantSpec::adapter().output_base_name(), "BaseBindingListAdapter");
}

#[test]
fn custom_variant_deserializes_with_defaults() {
    let variant: VariantSpec = toml::from_str(
        r#"
name = "fragment"
base = "BaseFragment"
type_args = { replace_at = 0 }
"#,
    )
    .expect("valid variant");
    assert_eq!(variant.targets, TargetShape::BindView);
    assert!(variant.binding_field_fallback);
    assert!(variant.replace_layout_accessor);
    assert!(!variant.insert_binding_field);
    assert_eq!(variant.type_args, TypeArgRewrite::ReplaceAt(0));
    assert_eq!(variant.ctor_args, CtorArgRewrite::Keep);
    assert!(variant.rewrites_supertype());
}
