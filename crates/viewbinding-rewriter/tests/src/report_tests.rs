use super::*;
use crate::names::BindingNameSource;

fn report() -> RunReport {
    let file = FileId::new("app/MainActivity.kt");
    RunReport {
        files_scanned: 3,
        classes_matched: 2,
        classes_rewritten: 1,
        fields_renamed: 2,
        touched_files: [file.clone()].into_iter().collect(),
        skipped_modules: vec![ModuleId::new("lib")],
        skipped_fields: Vec::new(),
        rewrites: vec![ClassRewrite {
            file: file.clone(),
            class: "MainActivity".to_string(),
            variant: "activity".to_string(),
            binding: BindingName {
                name: "MainActivityBinding".to_string(),
                source: BindingNameSource::LayoutAccessor {
                    layout: "main_activity".to_string(),
                },
            },
            layout: "main_activity".to_string(),
            renamed_fields: vec!["title".to_string(), "submit".to_string()],
        }],
        failures: vec![Failure {
            file,
            class: "ItemAdapter".to_string(),
            variant: "adapter".to_string(),
            reason: "could not locate supertype `BaseListAdapter` in class ItemAdapter".to_string(),
        }],
    }
}

#[test]
fn serializes_to_json() {
    let json: serde_json::Value = serde_json::from_str(&report().to_json().expect("serialize")).expect("valid json");
    assert_eq!(json["files_scanned"], 3);
    assert_eq!(json["touched_files"][0], "app/MainActivity.kt");
    assert_eq!(json["skipped_modules"][0], "lib");
    assert_eq!(json["rewrites"][0]["binding"]["source"]["from"], "layout_accessor");
    assert_eq!(json["rewrites"][0]["binding"]["source"]["layout"], "main_activity");
    assert_eq!(json["rewrites"][0]["layout"], "main_activity");
    assert_eq!(json["failures"][0]["class"], "ItemAdapter");
}

#[test]
fn summary_lists_counts_and_problems() {
    let summary = report().summary();
    assert!(summary.starts_with("3 file(s) scanned, 2 class(es) matched, 1 rewritten, 2 field(s) renamed, 1 file(s) touched"));
    assert!(summary.contains("skipped module lib"));
    assert!(summary.contains("rewrote MainActivity (activity) with MainActivityBinding from layout main_activity"));
    assert!(summary.contains("failed ItemAdapter (adapter)"));
    assert!(!report().is_clean());
    assert!(RunReport::default().is_clean());
}
