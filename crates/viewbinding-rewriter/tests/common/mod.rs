#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use viewbinding_rewriter::{RunReport, Settings, Workspace, WriteMode, pipeline::Pipeline};

/// A throwaway Gradle project on disk.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp project"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(
        &self,
        relative_path: &str,
    ) -> PathBuf {
        self.root().join(relative_path)
    }

    pub fn write(
        &self,
        relative_path: &str,
        text: &str,
    ) -> &Self {
        let path = self.path(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directories");
        }
        std::fs::write(&path, text).expect("write fixture");
        self
    }

    pub fn read(
        &self,
        relative_path: &str,
    ) -> String {
        std::fs::read_to_string(self.path(relative_path)).expect("fixture must exist")
    }

    /// Adds a Gradle module directory with an empty build script.
    pub fn module(
        &self,
        relative_dir: &str,
    ) -> &Self {
        self.write(&format!("{relative_dir}/build.gradle"), "")
    }
}

/// Opens the project with its discovered configuration and runs the whole pipeline.
pub async fn run(
    project: &Project,
    mode: WriteMode,
) -> (Workspace, RunReport) {
    let settings = Settings::discover(project.root(), None).expect("valid configuration");
    let workspace = Workspace::open(project.root(), settings.clone(), mode).await.expect("open workspace");
    let report = Pipeline::new(&workspace, &settings).expect("known variants").run().await.expect("run");
    (workspace, report)
}

pub fn kotlin_source(
    package: &str,
    body: &str,
) -> String {
    format!("package {package}\n\n{}", body.trim_start())
}
