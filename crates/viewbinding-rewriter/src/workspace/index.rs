//! Identifier occurrence tables, one per file.
//!
//! The index is purely lexical. It records where each identifier occurs and
//! how it is qualified, plus which names are declared with which type
//! (`holder: ItemHolder`), which is enough to resolve field references
//! without a Kotlin type checker.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use dashmap::DashMap;
use rowan::{TextRange, TextSize};

use crate::syntax::kind::SyntaxKind;
use crate::syntax::lexer::Lexer;
use crate::vfs::FileId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// `name`
    None,
    /// `this.name` or `this@Outer.name`
    This,
    /// `receiver.name` / `receiver?.name`; `receiver` is set when it is a plain identifier.
    Member { receiver: Option<String> },
    /// The name right after `val`, `var` or `fun`, or a parameter `(name: Type`.
    Declaration,
    /// A named-argument label: `render(name = value)`.
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub range: TextRange,
    pub qualifier: Qualifier,
}

#[derive(Debug, Clone, Default)]
pub struct FileOccurrences {
    identifiers: HashMap<String, Vec<Occurrence>>,
    /// Type leaf name -> identifiers declared with that type.
    typed_names: HashMap<String, HashSet<String>>,
}

impl FileOccurrences {
    pub fn build(text: &str) -> Self {
        let mut occurrences = Self::default();
        occurrences.collect(text, TextSize::from(0));
        occurrences
    }

    /// Indexes `text`, which starts at `base` in the file.
    fn collect(
        &mut self,
        text: &str,
        base: TextSize,
    ) {
        let tokens = significant_tokens(text, base);

        for (i, (kind, token_text, range)) in tokens.iter().enumerate() {
            match kind {
                SyntaxKind::String | SyntaxKind::RawString => {
                    self.collect_templates(token_text, range.start(), *kind == SyntaxKind::RawString);
                    continue;
                },
                SyntaxKind::Ident => {},
                _ => continue,
            }
            let nth_back = |n: usize| i.checked_sub(n).and_then(|idx| tokens.get(idx));
            let next_kind = tokens.get(i + 1).map(|(kind, _, _)| *kind);
            let qualifier = match nth_back(1).map(|(kind, _, _)| *kind) {
                Some(SyntaxKind::KwVal | SyntaxKind::KwVar | SyntaxKind::KwFun) => Qualifier::Declaration,
                Some(SyntaxKind::LParen | SyntaxKind::Comma) if next_kind == Some(SyntaxKind::Colon) => {
                    Qualifier::Declaration
                },
                Some(SyntaxKind::LParen | SyntaxKind::Comma) if next_kind == Some(SyntaxKind::Equal) => Qualifier::Label,
                Some(SyntaxKind::Dot | SyntaxKind::SafeCall) => match nth_back(2) {
                    Some((SyntaxKind::KwThis, _, _)) => Qualifier::This,
                    Some((SyntaxKind::Ident, receiver, _)) => {
                        let labelled_this = matches!(nth_back(3), Some((SyntaxKind::At, _, _)))
                            && matches!(nth_back(4), Some((SyntaxKind::KwThis, _, _)));
                        if labelled_this {
                            Qualifier::This
                        } else {
                            Qualifier::Member {
                                receiver: Some((*receiver).to_string()),
                            }
                        }
                    },
                    _ => Qualifier::Member {
                        receiver: None,
                    },
                },
                _ => Qualifier::None,
            };
            self.push(token_text, *range, qualifier);

            if let Some(type_leaf) = declared_type_leaf(&tokens, i) {
                self.typed_names.entry(type_leaf.to_string()).or_default().insert((*token_text).to_string());
            }
        }
    }

    /// `$name` entries are plain occurrences; `${...}` bodies are indexed like code.
    fn collect_templates(
        &mut self,
        literal: &str,
        start: TextSize,
        raw: bool,
    ) {
        for entry in template_entries(literal, raw) {
            match entry {
                TemplateEntry::Name(span) => {
                    let name = &literal[span.clone()];
                    let offset = start + TextSize::of(&literal[..span.start]);
                    self.push(name, TextRange::at(offset, TextSize::of(name)), Qualifier::None);
                },
                TemplateEntry::Expression(span) => {
                    let offset = start + TextSize::of(&literal[..span.start]);
                    self.collect(&literal[span], offset);
                },
            }
        }
    }

    fn push(
        &mut self,
        name: &str,
        range: TextRange,
        qualifier: Qualifier,
    ) {
        self.identifiers.entry(name.to_string()).or_default().push(Occurrence {
            range,
            qualifier,
        });
    }

    pub fn occurrences(
        &self,
        name: &str,
    ) -> &[Occurrence] {
        self.identifiers.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mentions(
        &self,
        name: &str,
    ) -> bool {
        self.identifiers.contains_key(name)
    }

    /// Whether `name` is declared somewhere in the file as `name: <type_leaf>`.
    pub fn declares_typed(
        &self,
        name: &str,
        type_leaf: &str,
    ) -> bool {
        self.typed_names.get(type_leaf).is_some_and(|names| names.contains(name))
    }
}

/// For `name : a.b.Type`, the leaf `Type`.
fn declared_type_leaf<'a>(
    tokens: &[(SyntaxKind, &'a str, TextRange)],
    name_index: usize,
) -> Option<&'a str> {
    let kind_at = |idx: usize| tokens.get(idx).map(|(kind, _, _)| *kind);
    if kind_at(name_index + 1)? != SyntaxKind::Colon || kind_at(name_index + 2)? != SyntaxKind::Ident {
        return None;
    }
    let mut leaf = name_index + 2;
    while kind_at(leaf + 1) == Some(SyntaxKind::Dot) && kind_at(leaf + 2) == Some(SyntaxKind::Ident) {
        leaf += 2;
    }
    tokens.get(leaf).map(|(_, text, _)| *text)
}

fn significant_tokens(
    text: &str,
    base: TextSize,
) -> Vec<(SyntaxKind, &str, TextRange)> {
    let mut offset = base;
    let mut tokens = Vec::new();
    for (kind, token_text) in Lexer::new(text) {
        let len = TextSize::of(token_text);
        if !kind.is_trivia() {
            tokens.push((kind, token_text, TextRange::at(offset, len)));
        }
        offset += len;
    }
    tokens
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateEntry {
    /// `$name`: the span of `name`.
    Name(Range<usize>),
    /// `${expr}`: the span of `expr`.
    Expression(Range<usize>),
}

/// Template entries of one string literal token, as byte spans into it.
fn template_entries(
    literal: &str,
    raw: bool,
) -> Vec<TemplateEntry> {
    let bytes = literal.as_bytes();
    let is_name_start = |byte: u8| byte.is_ascii_alphabetic() || byte == b'_';
    let is_name_part = |byte: u8| byte.is_ascii_alphanumeric() || byte == b'_';
    let mut entries = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if !raw => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                let body_start = i + 2;
                let mut depth = 1usize;
                let mut end = body_start;
                while end < bytes.len() {
                    match bytes[end] {
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        },
                        _ => {},
                    }
                    end += 1;
                }
                if depth == 0 {
                    entries.push(TemplateEntry::Expression(body_start..end));
                }
                i = end + 1;
            },
            b'$' if bytes.get(i + 1).is_some_and(|byte| is_name_start(*byte)) => {
                let name_start = i + 1;
                let mut end = name_start;
                while end < bytes.len() && is_name_part(bytes[end]) {
                    end += 1;
                }
                entries.push(TemplateEntry::Name(name_start..end));
                i = end;
            },
            _ => i += 1,
        }
    }
    entries
}

/// Occurrence tables for every indexed file.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    files: DashMap<FileId, FileOccurrences>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
        }
    }

    pub fn update(
        &self,
        file: FileId,
        text: &str,
    ) {
        self.files.insert(file, FileOccurrences::build(text));
    }

    pub fn remove(
        &self,
        file: &FileId,
    ) {
        self.files.remove(file);
    }

    pub fn occurrences(
        &self,
        file: &FileId,
        name: &str,
    ) -> Vec<Occurrence> {
        self.files.get(file).map(|entry| entry.occurrences(name).to_vec()).unwrap_or_default()
    }

    pub fn declares_typed(
        &self,
        file: &FileId,
        name: &str,
        type_leaf: &str,
    ) -> bool {
        self.files.get(file).is_some_and(|entry| entry.declares_typed(name, type_leaf))
    }

    /// Files containing `name` as an identifier, sorted.
    pub fn files_mentioning(
        &self,
        name: &str,
    ) -> Vec<FileId> {
        let mut files: Vec<FileId> =
            self.files.iter().filter(|entry| entry.value().mentions(name)).map(|entry| entry.key().clone()).collect();
        files.sort();
        files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src/workspace/index_tests.rs"]
mod tests;
