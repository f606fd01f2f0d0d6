//! The collaborator the rewriter runs against.
//!
//! A host owns the sources, a reference index over them and the
//! transaction log. [`Workspace`](crate::workspace::Workspace) is the
//! on-disk implementation; tests can substitute their own.

use rowan::{TextRange, TextSize};
use serde::Serialize;

use crate::error::RewriteResult;
use crate::model::CompilationUnit;
use crate::vfs::FileId;

/// A Gradle module, named by its Gradle path (`:` for the root project).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn root() -> Self {
        Self(":".to_string())
    }

    /// `feature:login`; surrounding colons are dropped.
    pub fn new(gradle_path: &str) -> Self {
        let trimmed = gradle_path.trim_matches(':');
        if trimmed.is_empty() {
            Self::root()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn gradle_path(&self) -> &str {
        &self.0
    }

    /// Last path segment: `login` for `feature:login`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }

    pub fn is_root(&self) -> bool {
        self.0 == ":"
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declaration identity of a field: file, enclosing class, name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldId {
    pub file: FileId,
    pub class: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub file: FileId,
    pub range: TextRange,
}

impl Reference {
    fn sort_key(&self) -> (&FileId, TextSize, TextSize) {
        (&self.file, self.range.start(), self.range.end())
    }
}

impl Ord for Reference {
    fn cmp(
        &self,
        other: &Self,
    ) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Reference {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[allow(async_fn_in_trait)]
pub trait Host {
    /// Modules in stable order.
    fn modules(&self) -> Vec<ModuleId>;

    /// Kotlin sources of a module in stable order.
    fn enumerate_source_files(
        &self,
        module: &ModuleId,
    ) -> Vec<FileId>;

    /// Parses the current text of a file.
    fn load(
        &self,
        file: &FileId,
    ) -> RewriteResult<CompilationUnit>;

    /// Uses of a field across the project, declaration excluded.
    ///
    /// Only meaningful after [`Host::wait_for_index_fresh`] has returned.
    fn find_references(
        &self,
        field: &FieldId,
    ) -> Vec<Reference>;

    /// Suspends until the reference index reflects every committed transaction.
    async fn wait_for_index_fresh(&self) -> RewriteResult<()>;

    /// Runs `body` against the current snapshot of `file` and commits the
    /// text it returns. Nothing is committed when `body` fails.
    async fn run_atomic<F>(
        &self,
        file: &FileId,
        label: &str,
        body: F,
    ) -> RewriteResult<CompilationUnit>
    where
        F: FnOnce(&CompilationUnit) -> RewriteResult<String> + Send;

    /// Formats and writes back a file. Returns whether it differs from its original text.
    async fn persist(
        &self,
        file: &FileId,
    ) -> RewriteResult<bool>;
}

#[cfg(test)]
#[path = "../tests/src/host_tests.rs"]
mod tests;
