use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::Serialize;

use crate::host::ModuleId;
use crate::names::BindingName;
use crate::vfs::FileId;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files_scanned: usize,
    pub classes_matched: usize,
    pub classes_rewritten: usize,
    pub fields_renamed: usize,
    pub touched_files: BTreeSet<FileId>,
    /// Modules without an application prefix.
    pub skipped_modules: Vec<ModuleId>,
    pub skipped_fields: Vec<SkippedField>,
    pub rewrites: Vec<ClassRewrite>,
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRewrite {
    pub file: FileId,
    pub class: String,
    pub variant: String,
    pub binding: BindingName,
    /// Layout resource the binding is generated from.
    pub layout: String,
    pub renamed_fields: Vec<String>,
}

/// A `bindView` field left untouched because its id could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedField {
    pub file: FileId,
    pub class: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub file: FileId,
    pub class: String,
    pub variant: String,
    pub reason: String,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable multi-line summary for the end of a run.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} file(s) scanned, {} class(es) matched, {} rewritten, {} field(s) renamed, {} file(s) touched",
            self.files_scanned,
            self.classes_matched,
            self.classes_rewritten,
            self.fields_renamed,
            self.touched_files.len()
        );
        for rewrite in &self.rewrites {
            let _ = writeln!(
                out,
                "rewrote {} ({}) with {} from layout {}",
                rewrite.class, rewrite.variant, rewrite.binding.name, rewrite.layout
            );
        }
        for module in &self.skipped_modules {
            let _ = writeln!(out, "skipped module {module}: no application prefix configured");
        }
        for skipped in &self.skipped_fields {
            let _ = writeln!(out, "skipped field {}.{} in {}", skipped.class, skipped.field, skipped.file);
        }
        for failure in &self.failures {
            let _ = writeln!(out, "failed {} ({}) in {}: {}", failure.class, failure.variant, failure.file, failure.reason);
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/src/report_tests.rs"]
mod tests;
