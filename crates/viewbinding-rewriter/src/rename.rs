//! Project-wide field rename through the host's reference index.

use std::collections::{BTreeMap, BTreeSet};

use rowan::TextRange;
use tracing::{debug, warn};

use crate::error::{RewriteError, RewriteResult};
use crate::host::Host;
use crate::plan::RenameEdit;
use crate::syntax::helpers::{range_text, splice};
use crate::vfs::FileId;

/// Renames every use of the field, then its declaration.
///
/// Waits for a fresh index first. Each file is edited in its own
/// transaction; a range whose text no longer reads as the old name is left
/// alone. Returns every file that changed, declaring file included.
///
/// When a step fails after earlier files were committed, those files are
/// reverted before the error is returned.
pub async fn rename_all_uses<H: Host>(
    host: &H,
    rename: &RenameEdit,
) -> RewriteResult<BTreeSet<FileId>> {
    host.wait_for_index_fresh().await?;

    let mut touched = BTreeSet::new();
    match rename_in_files(host, rename, &mut touched).await {
        Ok(()) => {
            debug!(
                "renamed {}.{} to {} in {} file(s)",
                rename.field.class,
                rename.field.name,
                rename.new_name,
                touched.len()
            );
            Ok(touched)
        },
        Err(error) => {
            if !touched.is_empty() {
                warn!("rename of {}.{} failed, reverting {} file(s)", rename.field.class, rename.field.name, touched.len());
                revert(host, std::iter::once(rename), &touched).await?;
            }
            Err(error)
        },
    }
}

async fn rename_in_files<H: Host>(
    host: &H,
    rename: &RenameEdit,
    touched: &mut BTreeSet<FileId>,
) -> RewriteResult<()> {
    let old_name = rename.field.name.as_str();
    let mut by_file: BTreeMap<FileId, Vec<TextRange>> = BTreeMap::new();
    for reference in host.find_references(&rename.field) {
        by_file.entry(reference.file).or_default().push(reference.range);
    }

    for (file, ranges) in by_file {
        let label = format!("rename {old_name} to {}", rename.new_name);
        host.run_atomic(&file, &label, |unit| {
            let text = unit.text();
            let mut edits: Vec<(TextRange, String)> = ranges
                .iter()
                .filter(|range| range_text(text, **range) == old_name)
                .map(|range| (*range, replacement_at(text, *range, &rename.new_name)))
                .collect();
            Ok(splice(text, &mut edits))
        })
        .await?;
        touched.insert(file);
    }

    let declaring = &rename.field.file;
    let class = rename.field.class.as_str();
    host.run_atomic(declaring, &format!("rename declaration {class}.{old_name}"), |unit| {
        let field = unit
            .class(class)
            .and_then(|class| class.field(old_name))
            .ok_or_else(|| RewriteError::not_located(format!("declaration of `{old_name}`"), class))?;
        Ok(splice(unit.text(), &mut [(field.name_range, rename.new_name.clone())]))
    })
    .await?;
    touched.insert(declaring.clone());
    Ok(())
}

/// `$name` in a string template becomes `${new_name}`.
fn replacement_at(
    text: &str,
    range: TextRange,
    new_name: &str,
) -> String {
    let start = usize::from(range.start());
    if text[..start].ends_with('$') {
        format!("{{{new_name}}}")
    } else {
        new_name.to_string()
    }
}

/// Compensates renames that were already committed: every temporary name in
/// `files` goes back to its field's original name.
pub async fn revert<'a, H: Host>(
    host: &H,
    renames: impl IntoIterator<Item = &'a RenameEdit>,
    files: &BTreeSet<FileId>,
) -> RewriteResult<()> {
    let mut renames: Vec<&RenameEdit> = renames.into_iter().collect();
    // Longest first, so `prefix_title` cannot clobber `prefix_titleText`.
    renames.sort_by_key(|rename| std::cmp::Reverse(rename.new_name.len()));
    if renames.is_empty() {
        return Ok(());
    }
    for file in files {
        host.run_atomic(file, "revert temporary renames", |unit| {
            let mut text = unit.text().to_string();
            for rename in &renames {
                text = restore_name(&text, &rename.new_name, &rename.field.name);
            }
            Ok(text)
        })
        .await?;
    }
    host.wait_for_index_fresh().await
}

/// Replaces `temporary` with `original`, undoing the braces added around
/// `$name` templates unless the next character would glue onto the name.
fn restore_name(
    text: &str,
    temporary: &str,
    original: &str,
) -> String {
    let braced = format!("${{{temporary}}}");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find(&braced) {
        let after = &rest[position + braced.len()..];
        let glues = after.chars().next().is_some_and(|ch| ch.is_alphanumeric() || ch == '_');
        out.push_str(&rest[..position]);
        if glues {
            out.push_str(&format!("${{{original}}}"));
        } else {
            out.push('$');
            out.push_str(original);
        }
        rest = after;
    }
    out.push_str(rest);
    out.replace(temporary, original)
}

#[cfg(test)]
#[path = "../tests/src/rename_tests.rs"]
mod tests;
