use super::*;

#[test]
fn duplicate_imports_are_dropped() {
    let text = "package a\n\nimport b.C\nimport b.C\nimport b.C as D\n\nval x: C = D()\n";
    assert_eq!(optimize_imports(text), "package a\n\nimport b.C\nimport b.C as D\n\nval x: C = D()\n");
}

#[test]
fn unused_migration_helpers_are_dropped() {
    let text = "package a\n\nimport kotterknife.bindView\nimport com.example.ButterKt\nimport android.os.Bundle\n\nclass A\n";
    assert_eq!(optimize_imports(text), "package a\n\nimport android.os.Bundle\n\nclass A\n");
}

#[test]
fn used_migration_helpers_are_kept() {
    let text = "package a\n\nimport kotterknife.bindView\n\nclass A {\n    val b by bindView(R.id.b)\n}\n";
    assert_eq!(optimize_imports(text), text);
}

#[test]
fn other_unused_imports_are_kept() {
    let text = "package a\n\nimport android.os.Bundle\n";
    assert_eq!(optimize_imports(text), text);
}

#[test]
fn blank_line_runs_are_collapsed() {
    let text = "a\n\n\n\nb\n  \n\t\nc\n";
    assert_eq!(collapse_blank_lines(text, 1), "a\n\nb\n  \nc\n");
    assert_eq!(collapse_blank_lines(text, 0), "a\nb\nc\n");
}

#[test]
fn raw_strings_keep_their_blank_lines() {
    let text = "val s = \"\"\"\n\n\n\n\"\"\"\n\n\nval t = 1\n";
    assert_eq!(collapse_blank_lines(text, 1), "val s = \"\"\"\n\n\n\n\"\"\"\n\nval t = 1\n");
}

#[tokio::test]
async fn missing_external_formatter_keeps_text() {
    let settings = FormattingSettings {
        enable_command: true,
        command: "viewbinding-rewriter-no-such-formatter".to_string(),
        args: Vec::new(),
        ..FormattingSettings::default()
    };
    let text = "package a\n\n\n\nclass A\n";
    assert_eq!(format_source(text, &settings).await, "package a\n\nclass A\n");
}

#[tokio::test]
async fn missing_command_is_reported_as_not_found() {
    let error = run_external("viewbinding-rewriter-no-such-formatter", &[], "").await.expect_err("not installed");
    assert!(matches!(error, FormatError::CommandNotFound(command) if command == "viewbinding-rewriter-no-such-formatter"));
}

#[cfg(unix)]
#[tokio::test]
async fn external_formatter_output_replaces_text() {
    let output = run_external("cat", &[], "class A\n").await.expect("cat is available");
    assert_eq!(output, "class A\n");
}
