/// Text and range utilities shared by the model and the applier.
use rowan::{TextRange, TextSize};

use crate::syntax::cst::{SyntaxNode, SyntaxToken};
use crate::syntax::kind::SyntaxKind;

pub fn range_text<'a>(
    source: &'a str,
    range: TextRange,
) -> &'a str {
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    source.get(start..end).unwrap_or("")
}

pub fn node_text<'a>(
    node: &SyntaxNode,
    source: &'a str,
) -> &'a str {
    range_text(source, node.text_range())
}

/// Non-trivia tokens under `node`, in order.
pub fn significant_tokens(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
        .collect()
}

/// Walk ancestors until a node with the given kind is found.
pub fn find_ancestor(
    node: SyntaxNode,
    kind: SyntaxKind,
) -> Option<SyntaxNode> {
    let mut current = node;
    loop {
        if current.kind() == kind {
            return Some(current);
        }
        current = current.parent()?;
    }
}

pub fn line_start(
    source: &str,
    offset: TextSize,
) -> TextSize {
    let offset: usize = offset.into();
    let start = source[..offset.min(source.len())].rfind('\n').map_or(0, |idx| idx + 1);
    TextSize::from(start as u32)
}

/// Offset of the line terminator at or after `offset` (end of text when there is none).
pub fn line_end(
    source: &str,
    offset: TextSize,
) -> TextSize {
    let offset: usize = usize::from(offset).min(source.len());
    let end = source[offset..].find('\n').map_or(source.len(), |idx| offset + idx);
    TextSize::from(end as u32)
}

/// Leading whitespace of the line containing `offset`.
pub fn indentation_at(
    source: &str,
    offset: TextSize,
) -> &str {
    let start: usize = line_start(source, offset).into();
    let rest = &source[start..];
    let width = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    &rest[..width]
}

/// Widens `range` to whole lines when only whitespace shares those lines with
/// it; the trailing newline is included so the lines disappear entirely.
pub fn full_line_range(
    source: &str,
    range: TextRange,
) -> TextRange {
    let start = line_start(source, range.start());
    let end = line_end(source, range.end());
    let before = range_text(source, TextRange::new(start, range.start()));
    let after = range_text(source, TextRange::new(range.end(), end));
    if !before.trim().is_empty() || !after.trim().is_empty() {
        return range;
    }
    let end_with_newline = if usize::from(end) < source.len() {
        end + TextSize::from(1)
    } else {
        end
    };
    TextRange::new(start, end_with_newline)
}

/// Returns `source` with each `(range, replacement)` spliced in.
///
/// Ranges must not overlap; they may be given in any order.
pub fn splice(
    source: &str,
    edits: &mut [(TextRange, String)],
) -> String {
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start()));
    let mut text = source.to_string();
    for (range, replacement) in edits.iter() {
        let start: usize = range.start().into();
        let end: usize = range.end().into();
        text.replace_range(start..end, replacement);
    }
    text
}

#[cfg(test)]
#[path = "../../tests/src/syntax/helpers_tests.rs"]
mod tests;
