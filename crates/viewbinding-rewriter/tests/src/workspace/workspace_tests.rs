use std::fs;

use super::*;

const ACTIVITY: &str = r#"package com.example

class MainActivity : BaseActivity() {
    val title by bindView(R.id.title_text)
    private val secret by bindView(R.id.secret)

    fun show() {
        title.text = "a"
        this.title.visibility = 0
        secret.text = "b"
    }
}
"#;

const PRESENTER: &str = r#"package com.example

class Presenter(private val screen: MainActivity) {
    fun render(other: Other) {
        screen.title.text = "c"
        screen.secret.text = "d"
        other.title.text = "e"
    }
}
"#;

fn workspace() -> Workspace {
    Workspace::in_memory(Settings::default(), [
        (ModuleId::new("app"), FileId::new("app/MainActivity.kt"), ACTIVITY.to_string()),
        (ModuleId::new("app"), FileId::new("app/Presenter.kt"), PRESENTER.to_string()),
    ])
}

fn field(name: &str) -> FieldId {
    FieldId {
        file: FileId::new("app/MainActivity.kt"),
        class: "MainActivity".to_string(),
        name: name.to_string(),
    }
}

fn reference_lines(
    workspace: &Workspace,
    references: &[Reference],
) -> Vec<(String, String)> {
    references
        .iter()
        .map(|reference| {
            let text = workspace.text(&reference.file).expect("known file");
            let start = usize::from(reference.range.start());
            let line_start = text[..start].rfind('\n').map_or(0, |idx| idx + 1);
            let line_end = text[start..].find('\n').map_or(text.len(), |idx| start + idx);
            (reference.file.to_string(), text[line_start..line_end].trim().to_string())
        })
        .collect()
}

#[tokio::test]
async fn finds_local_and_typed_receiver_references() {
    let workspace = workspace();
    workspace.wait_for_index_fresh().await.expect("fresh");

    let references = workspace.find_references(&field("title"));
    assert_eq!(reference_lines(&workspace, &references), vec![
        ("app/MainActivity.kt".to_string(), "title.text = \"a\"".to_string()),
        ("app/MainActivity.kt".to_string(), "this.title.visibility = 0".to_string()),
        ("app/Presenter.kt".to_string(), "screen.title.text = \"c\"".to_string()),
    ]);
}

#[tokio::test]
async fn private_fields_are_only_resolved_locally() {
    let workspace = workspace();
    workspace.wait_for_index_fresh().await.expect("fresh");

    let references = workspace.find_references(&field("secret"));
    assert_eq!(reference_lines(&workspace, &references), vec![(
        "app/MainActivity.kt".to_string(),
        "secret.text = \"b\"".to_string()
    )]);
}

#[tokio::test]
async fn unknown_field_has_no_references() {
    let workspace = workspace();
    assert!(workspace.find_references(&field("missing")).is_empty());
}

#[tokio::test]
async fn committed_transactions_are_reindexed() {
    let workspace = workspace();
    let file = FileId::new("app/Presenter.kt");

    let unit = workspace
        .run_atomic(&file, "rename screen", |unit| Ok(unit.text().replace("screen.title", "screen.heading")))
        .await
        .expect("commit");
    assert!(unit.text().contains("screen.heading"));

    workspace.wait_for_index_fresh().await.expect("fresh");
    assert!(workspace.index().occurrences(&file, "heading").len() == 1);
    assert_eq!(workspace.find_references(&field("title")).len(), 2);
}

#[tokio::test]
async fn failed_transactions_commit_nothing() {
    let workspace = workspace();
    let file = FileId::new("app/Presenter.kt");
    let result = workspace
        .run_atomic(&file, "doomed", |_| Err(RewriteError::not_located("anything", "Presenter")))
        .await;
    assert!(result.is_err());
    assert_eq!(workspace.text(&file).as_deref(), Some(PRESENTER));
    assert!(workspace.changes().is_empty());
}

#[tokio::test]
async fn unknown_file_is_an_error() {
    let workspace = workspace();
    assert!(matches!(workspace.load(&FileId::new("nope.kt")), Err(RewriteError::UnknownFile(_))));
}

#[tokio::test]
async fn open_discovers_gradle_modules() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    for (path, text) in [
        ("settings.gradle", ""),
        ("build.gradle", ""),
        ("app/build.gradle.kts", ""),
        ("app/src/main/kotlin/Main.kt", "class Main\n"),
        ("app/build/generated/Gen.kt", "class Gen\n"),
        ("feature/login/build.gradle", ""),
        ("feature/login/src/Login.kt", "class Login\n"),
        ("buildSrc/Plugins.kt", "object Plugins\n"),
        ("notes.txt", "not kotlin"),
    ] {
        let path = root.join(path);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, text).expect("write fixture");
    }

    let workspace = Workspace::open(root, Settings::default(), WriteMode::DryRun).await.expect("open");
    let modules: Vec<String> = workspace.modules().iter().map(ToString::to_string).collect();
    assert_eq!(modules, vec![":", "app", "feature:login"]);

    let file_names = |module: &str| -> Vec<String> {
        workspace
            .enumerate_source_files(&ModuleId::new(module))
            .iter()
            .filter_map(|file| file.as_path().file_name().map(|name| name.to_string_lossy().into_owned()))
            .collect()
    };
    assert_eq!(file_names("app"), vec!["Main.kt"]);
    assert_eq!(file_names("feature:login"), vec!["Login.kt"]);
    assert_eq!(file_names(":"), vec!["Plugins.kt"]);
}

#[tokio::test]
async fn persist_writes_only_outside_dry_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("A.kt");
    fs::write(&source, "class A\n").expect("write fixture");

    for (mode, expected_on_disk) in [(WriteMode::DryRun, "class A\n"), (WriteMode::Write, "class B\n")] {
        fs::write(&source, "class A\n").expect("reset fixture");
        let workspace = Workspace::open(dir.path(), Settings::default(), mode).await.expect("open");
        let file = workspace.enumerate_source_files(&ModuleId::root()).remove(0);

        assert!(!workspace.persist(&file).await.expect("unchanged persist"));
        workspace.run_atomic(&file, "rename", |unit| Ok(unit.text().replace('A', "B"))).await.expect("commit");
        assert!(workspace.persist(&file).await.expect("persist"));
        assert_eq!(fs::read_to_string(&source).expect("read back"), expected_on_disk);
        assert_eq!(workspace.changes().len(), 1);
    }
}
