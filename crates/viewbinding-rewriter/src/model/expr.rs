use rowan::TextRange;
use serde::Serialize;

use crate::syntax::ast::{AstNode, Expr};
use crate::syntax::cst::SyntaxToken;
use crate::syntax::helpers::{range_text, significant_tokens};
use crate::syntax::kind::SyntaxKind;

/// Coarse classification of an expression, enough to recognise the shapes
/// the rewriter cares about. Anything else is [`ExprShape::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprShape {
    /// `title`, `this.title`, `R.layout.main_activity`
    Path { segments: Vec<String> },
    /// `bindView(R.id.title)`, `bindView<TextView>(R.id.title)`
    Call {
        callee: Vec<String>,
        arguments: Vec<ExprShape>,
    },
    /// `ItemBinding::inflate`, `::create`
    CallableReference {
        receiver: Option<Vec<String>>,
        member: String,
    },
    Other { text: String },
}

impl ExprShape {
    pub fn from_expr(
        expr: &Expr,
        source: &str,
    ) -> Self {
        let tokens = significant_tokens(expr.syntax());
        classify(&tokens, source)
    }

    pub fn from_tokens(
        tokens: &[SyntaxToken],
        source: &str,
    ) -> Self {
        classify(tokens, source)
    }

    /// Last segment of a path, e.g. `title_text` for `R.id.title_text`.
    pub fn path_leaf(&self) -> Option<&str> {
        match self {
            ExprShape::Path {
                segments,
            } => segments.last().map(String::as_str),
            _ => None,
        }
    }

    /// Last segment of a call's callee, e.g. `bindView`.
    pub fn callee_name(&self) -> Option<&str> {
        match self {
            ExprShape::Call {
                callee, ..
            } => callee.last().map(String::as_str),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[ExprShape] {
        match self {
            ExprShape::Call {
                arguments, ..
            } => arguments,
            _ => &[],
        }
    }

    pub fn is_callable_reference(&self) -> bool {
        matches!(self, ExprShape::CallableReference { .. })
    }
}

fn classify(
    tokens: &[SyntaxToken],
    source: &str,
) -> ExprShape {
    if let Some(segments) = parse_path(tokens) {
        return ExprShape::Path {
            segments,
        };
    }
    if let Some(reference) = parse_callable_reference(tokens) {
        return reference;
    }
    if let Some(call) = parse_call(tokens, source) {
        return call;
    }
    ExprShape::Other {
        text: tokens_text(tokens, source).to_string(),
    }
}

/// Length of the leading `Ident (. Ident)*` run (a leading `this` counts as a segment).
fn path_prefix_len(tokens: &[SyntaxToken]) -> usize {
    let is_segment = |token: &SyntaxToken| matches!(token.kind(), SyntaxKind::Ident | SyntaxKind::KwThis);
    let mut len = match tokens.first() {
        Some(token) if is_segment(token) => 1,
        _ => return 0,
    };
    loop {
        match (tokens.get(len), tokens.get(len + 1)) {
            (Some(dot), Some(segment)) if dot.kind() == SyntaxKind::Dot && segment.kind() == SyntaxKind::Ident => {
                len += 2;
            },
            _ => break,
        }
    }
    len
}

fn segments(tokens: &[SyntaxToken]) -> Vec<String> {
    tokens.iter().filter(|token| token.kind() != SyntaxKind::Dot).map(|token| token.text().to_string()).collect()
}

fn parse_path(tokens: &[SyntaxToken]) -> Option<Vec<String>> {
    let len = path_prefix_len(tokens);
    (len > 0 && len == tokens.len()).then(|| segments(tokens))
}

fn parse_callable_reference(tokens: &[SyntaxToken]) -> Option<ExprShape> {
    let colons = tokens.iter().position(|token| token.kind() == SyntaxKind::DoubleColon)?;
    if colons + 2 != tokens.len() || tokens[colons + 1].kind() != SyntaxKind::Ident {
        return None;
    }
    let receiver = if colons == 0 {
        None
    } else {
        Some(parse_path(&tokens[..colons])?)
    };
    Some(ExprShape::CallableReference {
        receiver,
        member: tokens[colons + 1].text().to_string(),
    })
}

fn parse_call(
    tokens: &[SyntaxToken],
    source: &str,
) -> Option<ExprShape> {
    let path_len = path_prefix_len(tokens);
    if path_len == 0 {
        return None;
    }
    let mut idx = path_len;
    if tokens.get(idx)?.kind() == SyntaxKind::Less {
        idx = matching(tokens, idx, SyntaxKind::Less, SyntaxKind::Greater)? + 1;
    }
    if tokens.get(idx)?.kind() != SyntaxKind::LParen {
        return None;
    }
    let close = matching(tokens, idx, SyntaxKind::LParen, SyntaxKind::RParen)?;
    if close + 1 != tokens.len() {
        return None;
    }

    let arguments = split_arguments(&tokens[idx + 1..close])
        .into_iter()
        .map(|argument| classify(strip_argument_name(argument), source))
        .collect();
    Some(ExprShape::Call {
        callee: segments(&tokens[..path_len]),
        arguments,
    })
}

fn matching(
    tokens: &[SyntaxToken],
    open_idx: usize,
    open: SyntaxKind,
    close: SyntaxKind,
) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open_idx) {
        if token.kind() == open {
            depth += 1;
        } else if token.kind() == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

fn split_arguments(tokens: &[SyntaxToken]) -> Vec<&[SyntaxToken]> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, token) in tokens.iter().enumerate() {
        match token.kind() {
            SyntaxKind::LParen | SyntaxKind::LBrace | SyntaxKind::LBracket => depth += 1,
            SyntaxKind::RParen | SyntaxKind::RBrace | SyntaxKind::RBracket => depth = depth.saturating_sub(1),
            SyntaxKind::Comma if depth == 0 => {
                parts.push(&tokens[start..idx]);
                start = idx + 1;
            },
            _ => {},
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }
    parts
}

/// `id = R.id.x` -> `R.id.x`
fn strip_argument_name(tokens: &[SyntaxToken]) -> &[SyntaxToken] {
    match tokens {
        [name, equal, rest @ ..] if name.kind() == SyntaxKind::Ident && equal.kind() == SyntaxKind::Equal => rest,
        _ => tokens,
    }
}

fn tokens_text<'a>(
    tokens: &[SyntaxToken],
    source: &'a str,
) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => {
            range_text(source, TextRange::new(first.text_range().start(), last.text_range().end()))
        },
        _ => "",
    }
}

#[cfg(test)]
#[path = "../../tests/src/model/expr_tests.rs"]
mod tests;
