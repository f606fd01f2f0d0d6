//! Best-effort clean-up of rewritten files before they are written back.

use std::collections::HashSet;
use std::process::Stdio;

use rowan::{TextRange, TextSize};
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, warn};

use crate::config::FormattingSettings;
use crate::model::CompilationUnit;
use crate::syntax::helpers::{full_line_range, splice};
use crate::syntax::kind::SyntaxKind;
use crate::syntax::lexer::Lexer;
use crate::vfs::FileId;

/// Import leaves that become dead once a class is migrated.
const MIGRATED_HELPERS: &[&str] = &["bindView", "ButterKt"];

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("{0} is not available")]
    CommandNotFound(String),
    #[error("failed to launch {command}: {reason}")]
    LaunchFailed { command: String, reason: String },
    #[error("{command} failed: {reason}")]
    FormattingFailed { command: String, reason: String },
}

/// Runs every enabled pass. Failures of the external command are logged and
/// the text from the in-process passes is kept.
pub async fn format_source(
    text: &str,
    settings: &FormattingSettings,
) -> String {
    let mut formatted = if settings.optimize_imports {
        optimize_imports(text)
    } else {
        text.to_string()
    };
    formatted = collapse_blank_lines(&formatted, settings.max_blank_lines);

    if settings.enable_command {
        match run_external(&settings.command, &settings.args, &formatted).await {
            Ok(output) => {
                debug!("{} formatted {} bytes", settings.command, output.len());
                formatted = output;
            },
            Err(error) => warn!("external formatter skipped: {error}"),
        }
    }
    formatted
}

/// Drops repeated imports and imports of migrated helpers nothing uses anymore.
pub fn optimize_imports(text: &str) -> String {
    let unit = CompilationUnit::parse(FileId::new("<format>"), text);
    if unit.imports.is_empty() {
        return text.to_string();
    }

    let import_ranges: Vec<TextRange> = unit.imports.iter().map(|import| import.range).collect();
    let used = identifiers_outside(text, &import_ranges);

    let mut seen = HashSet::new();
    let mut edits = Vec::new();
    for import in &unit.imports {
        let duplicate = !seen.insert((import.path.as_str(), import.alias.as_deref()));
        let leaf = import.alias.as_deref().unwrap_or_else(|| import.path.rsplit('.').next().unwrap_or(&import.path));
        let dead_helper = MIGRATED_HELPERS.contains(&leaf) && !used.contains(leaf);
        if duplicate || dead_helper {
            edits.push((full_line_range(text, import.range), String::new()));
        }
    }

    if edits.is_empty() {
        text.to_string()
    } else {
        splice(text, &mut edits)
    }
}

fn identifiers_outside<'a>(
    text: &'a str,
    excluded: &[TextRange],
) -> HashSet<&'a str> {
    let mut offset = TextSize::from(0);
    let mut used = HashSet::new();
    for (kind, token_text) in Lexer::new(text) {
        let range = TextRange::at(offset, TextSize::of(token_text));
        offset += range.len();
        if kind == SyntaxKind::Ident && !excluded.iter().any(|import| import.contains_range(range)) {
            used.insert(token_text);
        }
    }
    used
}

/// Collapses runs of blank lines longer than `max`. Lines inside raw strings are kept.
pub fn collapse_blank_lines(
    text: &str,
    max: usize,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut blank_run = 0;
    let mut in_raw_string = false;

    for line in text.split_inclusive('\n') {
        let blank = line.trim().is_empty();
        if !in_raw_string && blank {
            blank_run += 1;
            if blank_run > max {
                continue;
            }
        } else {
            blank_run = 0;
        }
        output.push_str(line);
        if line.matches("\"\"\"").count() % 2 == 1 {
            in_raw_string = !in_raw_string;
        }
    }
    output
}

/// Pipes `input` through an external formatter on stdin, returning its stdout.
pub async fn run_external(
    executable: &str,
    args: &[String],
    input: &str,
) -> Result<String, FormatError> {
    let mut child = Command::new(executable)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => FormatError::CommandNotFound(executable.to_string()),
            _ => FormatError::LaunchFailed {
                command: executable.to_string(),
                reason: error.to_string(),
            },
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).await.map_err(|error| FormatError::LaunchFailed {
            command: executable.to_string(),
            reason: format!("failed to stream source to formatter: {error}"),
        })?;
    }

    let output = child.wait_with_output().await.map_err(|error| FormatError::LaunchFailed {
        command: executable.to_string(),
        reason: error.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(FormatError::FormattingFailed {
            command: executable.to_string(),
            reason: if stderr.is_empty() {
                format!("process exited with status {}", output.status)
            } else {
                stderr
            },
        });
    }

    String::from_utf8(output.stdout).map_err(|error| FormatError::FormattingFailed {
        command: executable.to_string(),
        reason: format!("formatter produced invalid UTF-8 output: {error}"),
    })
}

#[cfg(test)]
#[path = "../tests/src/format_tests.rs"]
mod tests;
