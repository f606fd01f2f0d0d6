use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::{kind::SyntaxKind, lexer::Lexer};

/// Soft keywords that may precede a declaration keyword.
pub(crate) const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "internal",
    "open",
    "final",
    "abstract",
    "sealed",
    "data",
    "enum",
    "annotation",
    "inner",
    "value",
    "companion",
    "override",
    "lateinit",
    "const",
    "inline",
    "noinline",
    "crossinline",
    "suspend",
    "tailrec",
    "operator",
    "infix",
    "external",
    "expect",
    "actual",
    "vararg",
    "reified",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declaration {
    Class,
    Function,
    Property,
}

pub struct Parser<'a> {
    tokens: Vec<(SyntaxKind, &'a str)>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let tokens: Vec<_> = Lexer::new(input).collect();
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
        }
    }

    pub fn parse(mut self) -> GreenNode {
        self.start_node(SyntaxKind::Root);
        self.parse_root();
        self.finish_node();
        self.builder.finish()
    }

    fn start_node(
        &mut self,
        kind: SyntaxKind,
    ) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn parse_root(&mut self) {
        while !self.is_eof() {
            self.skip_trivia();
            if self.is_eof() {
                break;
            }

            match self.peek() {
                SyntaxKind::KwPackage => self.parse_package_header(),
                SyntaxKind::KwImport => self.parse_import_directive(),
                _ => self.parse_member(),
            }
        }
    }

    fn parse_package_header(&mut self) {
        self.start_node(SyntaxKind::PackageHeader);
        self.bump(); // package
        self.skip_inline_trivia();
        while self.at(SyntaxKind::Ident) || self.at(SyntaxKind::Dot) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_import_directive(&mut self) {
        self.start_node(SyntaxKind::ImportDirective);
        self.bump(); // import
        self.skip_inline_trivia();
        while self.at(SyntaxKind::Ident) || self.at(SyntaxKind::Dot) || self.at(SyntaxKind::Star) {
            self.bump();
        }
        if self.at_non_trivia_same_line(SyntaxKind::KwAs) {
            self.skip_trivia();
            self.bump();
            self.skip_inline_trivia();
            if self.at(SyntaxKind::Ident) {
                self.bump();
            }
        }
        self.finish_node();
    }

    /// Parses one declaration, or skips one token (or balanced group) when
    /// the input does not start a declaration.
    fn parse_member(&mut self) {
        let start_pos = self.pos;
        match self.classify_declaration() {
            Some(Declaration::Class) => self.parse_class_decl(),
            Some(Declaration::Function) => self.parse_function_decl(),
            Some(Declaration::Property) => self.parse_property_decl(),
            None => self.skip_item(),
        }

        // Ensure progress to avoid infinite loops on unexpected syntax.
        if self.pos == start_pos {
            self.bump();
        }
    }

    fn skip_item(&mut self) {
        match self.peek() {
            SyntaxKind::LBrace => self.consume_balanced(SyntaxKind::LBrace, SyntaxKind::RBrace),
            SyntaxKind::LParen => self.consume_balanced(SyntaxKind::LParen, SyntaxKind::RParen),
            SyntaxKind::LBracket => self.consume_balanced(SyntaxKind::LBracket, SyntaxKind::RBracket),
            _ => self.bump(),
        }
    }

    fn parse_class_decl(&mut self) {
        self.start_node(SyntaxKind::ClassDecl);
        self.parse_modifiers();

        // `fun interface`
        if self.at(SyntaxKind::KwFun) {
            self.bump();
            self.skip_trivia();
        }
        self.bump(); // class / interface / object

        if self.at_non_trivia_same_line(SyntaxKind::Ident) {
            self.skip_trivia();
            self.bump();
        }
        if self.at_non_trivia(SyntaxKind::Less) {
            self.skip_trivia();
            self.parse_type_params();
        }
        if self.looks_like_primary_ctor() {
            self.skip_trivia();
            self.parse_primary_ctor();
        }
        if self.at_non_trivia(SyntaxKind::Colon) {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_supertype_list();
        }
        if self.at_non_trivia_text("where") {
            self.skip_trivia();
            while !self.is_eof() && !self.at(SyntaxKind::LBrace) && !self.at(SyntaxKind::RBrace) {
                self.bump();
            }
        }
        if self.at_non_trivia(SyntaxKind::LBrace) {
            self.skip_trivia();
            self.parse_class_body();
        }

        self.finish_node();
    }

    fn parse_type_params(&mut self) {
        self.start_node(SyntaxKind::TypeParams);
        self.consume_balanced(SyntaxKind::Less, SyntaxKind::Greater);
        self.finish_node();
    }

    fn parse_primary_ctor(&mut self) {
        self.start_node(SyntaxKind::PrimaryCtor);
        self.parse_modifiers();
        if self.at(SyntaxKind::KwConstructor) {
            self.bump();
            self.skip_trivia();
        }
        if self.at(SyntaxKind::LParen) {
            self.consume_balanced(SyntaxKind::LParen, SyntaxKind::RParen);
        }
        self.finish_node();
    }

    fn parse_supertype_list(&mut self) {
        self.start_node(SyntaxKind::SupertypeList);
        loop {
            self.parse_supertype_entry();
            if self.at_non_trivia(SyntaxKind::Comma) {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                continue;
            }
            break;
        }
        self.finish_node();
    }

    fn parse_supertype_entry(&mut self) {
        self.start_node(SyntaxKind::SupertypeEntry);
        self.parse_type_ref();
        if self.at_non_trivia_same_line(SyntaxKind::LParen) {
            self.skip_trivia();
            self.parse_value_arg_list();
        }
        if self.at_non_trivia(SyntaxKind::KwBy) {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_expression(&[SyntaxKind::Comma, SyntaxKind::LBrace], true);
        }
        self.finish_node();
    }

    fn parse_class_body(&mut self) {
        self.start_node(SyntaxKind::ClassBody);
        self.bump(); // LBrace

        while !self.is_eof() {
            self.skip_trivia();
            if self.is_eof() || self.at(SyntaxKind::RBrace) {
                break;
            }
            self.parse_member();
        }

        if self.at(SyntaxKind::RBrace) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_property_decl(&mut self) {
        self.start_node(SyntaxKind::PropertyDecl);
        self.parse_modifiers();
        self.bump(); // val / var

        if self.at_non_trivia(SyntaxKind::Less) {
            self.skip_trivia();
            self.parse_type_params();
        }

        if self.at_non_trivia(SyntaxKind::LParen) {
            // Destructuring declaration.
            self.skip_trivia();
            self.consume_balanced(SyntaxKind::LParen, SyntaxKind::RParen);
        } else {
            self.skip_inline_trivia();
            self.parse_receiver_and_name();
        }

        if self.at_non_trivia(SyntaxKind::Colon) {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_type_ref();
        }

        if self.at_non_trivia(SyntaxKind::Equal) {
            self.skip_trivia();
            self.start_node(SyntaxKind::Initializer);
            self.bump();
            self.skip_trivia();
            self.parse_expression(&[], true);
            self.finish_node();
        } else if self.at_non_trivia(SyntaxKind::KwBy) {
            self.skip_trivia();
            self.start_node(SyntaxKind::PropertyDelegate);
            self.bump();
            self.skip_trivia();
            self.parse_expression(&[], true);
            self.finish_node();
        }

        while self.looks_like_accessor() {
            self.skip_trivia();
            self.parse_property_accessor();
        }

        self.finish_node();
    }

    fn parse_property_accessor(&mut self) {
        self.start_node(SyntaxKind::PropertyAccessor);
        self.parse_modifiers();
        self.bump(); // get / set
        if self.at_non_trivia_same_line(SyntaxKind::LParen) {
            self.skip_trivia();
            self.consume_balanced(SyntaxKind::LParen, SyntaxKind::RParen);
        }
        if self.at_non_trivia(SyntaxKind::Colon) {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_type_ref();
        }
        if self.at_non_trivia(SyntaxKind::Equal) {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_expression(&[], true);
        } else if self.at_non_trivia(SyntaxKind::LBrace) {
            self.skip_trivia();
            self.parse_block();
        }
        self.finish_node();
    }

    fn parse_function_decl(&mut self) {
        self.start_node(SyntaxKind::FunctionDecl);
        self.parse_modifiers();
        self.bump(); // fun

        if self.at_non_trivia(SyntaxKind::Less) {
            self.skip_trivia();
            self.parse_type_params();
        }
        self.skip_inline_trivia();
        self.parse_receiver_and_name();

        if self.at_non_trivia(SyntaxKind::LParen) {
            self.skip_trivia();
            self.start_node(SyntaxKind::ParamList);
            self.consume_balanced(SyntaxKind::LParen, SyntaxKind::RParen);
            self.finish_node();
        }
        if self.at_non_trivia(SyntaxKind::Colon) {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_type_ref();
        }
        if self.at_non_trivia_text("where") {
            self.skip_trivia();
            while !self.is_eof()
                && !self.at(SyntaxKind::LBrace)
                && !self.at(SyntaxKind::Equal)
                && !self.at(SyntaxKind::RBrace)
            {
                self.bump();
            }
        }

        if self.at_non_trivia(SyntaxKind::Equal) {
            self.skip_trivia();
            self.start_node(SyntaxKind::FunctionBody);
            self.bump();
            self.skip_trivia();
            self.parse_expression(&[], true);
            self.finish_node();
        } else if self.at_non_trivia(SyntaxKind::LBrace) {
            self.skip_trivia();
            self.start_node(SyntaxKind::FunctionBody);
            self.parse_block();
            self.finish_node();
        }

        self.finish_node();
    }

    /// Consumes `Receiver.name`, `List<T>.name` or a plain `name`.
    fn parse_receiver_and_name(&mut self) {
        loop {
            match self.peek() {
                SyntaxKind::Ident => self.bump(),
                SyntaxKind::Less => self.consume_balanced(SyntaxKind::Less, SyntaxKind::Greater),
                SyntaxKind::Question => self.bump(),
                SyntaxKind::Dot if self.nth_raw(1) == Some(SyntaxKind::Ident) => self.bump(),
                _ => break,
            }
        }
    }

    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.consume_balanced(SyntaxKind::LBrace, SyntaxKind::RBrace);
        self.finish_node();
    }

    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TypeRef);
        self.parse_modifiers();

        if self.at(SyntaxKind::LParen) {
            self.consume_balanced(SyntaxKind::LParen, SyntaxKind::RParen);
            if self.at_non_trivia(SyntaxKind::Arrow) {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.parse_type_ref();
            }
        } else {
            while self.at(SyntaxKind::Ident) {
                self.bump();
                if self.at(SyntaxKind::Less) {
                    self.parse_type_arg_list();
                }
                if self.at(SyntaxKind::Dot) && self.nth_raw(1) == Some(SyntaxKind::Ident) {
                    self.bump();
                    continue;
                }
                break;
            }
        }

        while self.at(SyntaxKind::Question) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TypeArgList);
        self.bump(); // <

        while !self.is_eof() {
            self.skip_trivia();
            if self.is_eof()
                || self.at(SyntaxKind::Greater)
                || self.at(SyntaxKind::LBrace)
                || self.at(SyntaxKind::RBrace)
                || self.at(SyntaxKind::Semicolon)
                || self.at(SyntaxKind::Equal)
            {
                break;
            }

            let pos_before = self.pos;
            if self.at(SyntaxKind::Star) {
                self.bump();
            } else {
                if self.at(SyntaxKind::KwIn) || (self.at_text("out") && self.nth_non_trivia_kind(1) == Some(SyntaxKind::Ident)) {
                    self.bump();
                    self.skip_trivia();
                }
                self.parse_type_ref();
            }
            self.skip_trivia();

            if self.at(SyntaxKind::Comma) {
                self.bump();
            } else if self.pos == pos_before {
                self.bump();
            }
        }

        if self.at(SyntaxKind::Greater) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_value_arg_list(&mut self) {
        self.start_node(SyntaxKind::ValueArgList);
        self.bump(); // (

        while !self.is_eof() {
            self.skip_trivia();
            if self.is_eof() || self.at(SyntaxKind::RParen) || self.at(SyntaxKind::RBrace) {
                break;
            }

            let pos_before = self.pos;
            self.start_node(SyntaxKind::ValueArg);
            self.parse_expression(&[SyntaxKind::Comma, SyntaxKind::RParen], false);
            self.finish_node();
            self.skip_trivia();

            if self.at(SyntaxKind::Comma) {
                self.bump();
            } else if self.pos == pos_before {
                self.bump();
            }
        }

        if self.at(SyntaxKind::RParen) {
            self.bump();
        }
        self.finish_node();
    }

    /// Consumes an expression as a flat token run.
    ///
    /// Stops at depth zero on any of `terminators`, on an unmatched closer,
    /// on `;`, and (when `newline_sensitive`) on a line break that does not
    /// continue the expression. Trailing trivia is left for the caller.
    fn parse_expression(
        &mut self,
        terminators: &[SyntaxKind],
        newline_sensitive: bool,
    ) {
        if self.is_eof() || self.ends_expression(self.peek(), terminators, 0) {
            return;
        }

        self.start_node(SyntaxKind::Expr);
        let mut depth = 0usize;
        let mut last_significant = None;

        while !self.is_eof() {
            let kind = self.peek();

            if kind.is_trivia() {
                let next_idx = self.skip_trivia_from(self.pos);
                let Some(&(next_kind, _)) = self.tokens.get(next_idx) else {
                    break;
                };
                if depth == 0 {
                    if self.ends_expression(next_kind, terminators, depth) {
                        break;
                    }
                    let crosses_line = self.tokens[self.pos..next_idx].iter().any(|(_, text)| text.contains('\n'));
                    if newline_sensitive && crosses_line && !continues_expression(last_significant, next_kind) {
                        break;
                    }
                }
                while self.pos < next_idx {
                    self.bump();
                }
                continue;
            }

            if self.ends_expression(kind, terminators, depth) {
                break;
            }

            match kind {
                SyntaxKind::LParen | SyntaxKind::LBrace | SyntaxKind::LBracket => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBrace | SyntaxKind::RBracket => depth = depth.saturating_sub(1),
                _ => {},
            }
            self.bump();
            last_significant = Some(kind);
        }

        self.finish_node();
    }

    fn ends_expression(
        &self,
        kind: SyntaxKind,
        terminators: &[SyntaxKind],
        depth: usize,
    ) -> bool {
        if depth > 0 {
            return false;
        }
        terminators.contains(&kind)
            || matches!(kind, SyntaxKind::RParen | SyntaxKind::RBrace | SyntaxKind::RBracket | SyntaxKind::Semicolon)
    }

    fn parse_modifiers(&mut self) {
        if !self.at(SyntaxKind::At) && !self.at_modifier_keyword() {
            return;
        }

        self.start_node(SyntaxKind::Modifiers);
        loop {
            if self.at(SyntaxKind::At) {
                let end = self.skip_annotation_from(self.pos);
                while self.pos < end {
                    self.bump();
                }
            } else if self.at_modifier_keyword() {
                self.bump();
            } else {
                break;
            }

            let next_idx = self.skip_trivia_from(self.pos);
            match self.tokens.get(next_idx) {
                Some(&(SyntaxKind::At, _)) => self.skip_trivia(),
                Some(&(SyntaxKind::Ident, text)) if MODIFIER_KEYWORDS.contains(&text) => self.skip_trivia(),
                _ => break,
            }
        }
        self.finish_node();
        self.skip_trivia();
    }

    fn classify_declaration(&self) -> Option<Declaration> {
        let mut idx = self.pos;
        loop {
            idx = self.skip_trivia_from(idx);
            let &(kind, text) = self.tokens.get(idx)?;
            match kind {
                SyntaxKind::At => idx = self.skip_annotation_from(idx),
                SyntaxKind::Ident if MODIFIER_KEYWORDS.contains(&text) => idx += 1,
                SyntaxKind::KwClass | SyntaxKind::KwInterface | SyntaxKind::KwObject => {
                    return Some(Declaration::Class);
                },
                SyntaxKind::KwFun => {
                    let next = self.skip_trivia_from(idx + 1);
                    return match self.tokens.get(next) {
                        Some(&(SyntaxKind::KwInterface, _)) => Some(Declaration::Class),
                        _ => Some(Declaration::Function),
                    };
                },
                SyntaxKind::KwVal | SyntaxKind::KwVar => return Some(Declaration::Property),
                _ => return None,
            }
        }
    }

    fn looks_like_primary_ctor(&self) -> bool {
        let mut idx = self.pos;
        loop {
            idx = self.skip_trivia_from(idx);
            match self.tokens.get(idx) {
                Some(&(SyntaxKind::At, _)) => idx = self.skip_annotation_from(idx),
                Some(&(SyntaxKind::Ident, text)) if MODIFIER_KEYWORDS.contains(&text) => idx += 1,
                Some(&(SyntaxKind::KwConstructor, _)) => return true,
                Some(&(SyntaxKind::LParen, _)) => {
                    // A bare `(` only opens the constructor when it sits on the header line.
                    return idx == self.skip_trivia_from(self.pos) && self.at_non_trivia_same_line(SyntaxKind::LParen);
                },
                _ => return false,
            }
        }
    }

    fn looks_like_accessor(&self) -> bool {
        let mut idx = self.pos;
        let mut saw_modifier = false;
        loop {
            idx = self.skip_trivia_from(idx);
            match self.tokens.get(idx) {
                Some(&(SyntaxKind::At, _)) => {
                    idx = self.skip_annotation_from(idx);
                    saw_modifier = true;
                },
                Some(&(SyntaxKind::Ident, "get" | "set")) => {
                    let next = self.skip_trivia_from(idx + 1);
                    return saw_modifier || matches!(self.tokens.get(next), Some(&(SyntaxKind::LParen, _)));
                },
                Some(&(SyntaxKind::Ident, text)) if MODIFIER_KEYWORDS.contains(&text) => {
                    idx += 1;
                    saw_modifier = true;
                },
                _ => return false,
            }
        }
    }

    /// Returns the index just past the annotation starting at `idx`.
    fn skip_annotation_from(
        &self,
        idx: usize,
    ) -> usize {
        let mut idx = idx + 1; // @
        if matches!(self.tokens.get(idx), Some(&(SyntaxKind::LBracket, _))) {
            return self.balanced_end(idx, SyntaxKind::LBracket, SyntaxKind::RBracket);
        }
        while let Some(&(kind, _)) = self.tokens.get(idx) {
            if kind != SyntaxKind::Ident {
                break;
            }
            idx += 1;
            match self.tokens.get(idx) {
                Some(&(SyntaxKind::Dot | SyntaxKind::Colon, _)) => idx += 1,
                _ => break,
            }
        }
        if matches!(self.tokens.get(idx), Some(&(SyntaxKind::LParen, _))) {
            idx = self.balanced_end(idx, SyntaxKind::LParen, SyntaxKind::RParen);
        }
        idx
    }

    fn balanced_end(
        &self,
        idx: usize,
        open: SyntaxKind,
        close: SyntaxKind,
    ) -> usize {
        let mut depth = 0usize;
        let mut idx = idx;
        while let Some(&(kind, _)) = self.tokens.get(idx) {
            idx += 1;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
        }
        idx
    }

    fn consume_balanced(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
    ) {
        if !self.at(open) {
            return;
        }
        let end = self.balanced_end(self.pos, open, close);
        while self.pos < end {
            self.bump();
        }
    }

    fn skip_trivia(&mut self) {
        while !self.is_eof() && self.peek().is_trivia() {
            self.bump();
        }
    }

    /// Skips whitespace and comments that do not cross a line break.
    fn skip_inline_trivia(&mut self) {
        while !self.is_eof() {
            let (kind, text) = self.tokens[self.pos];
            if !kind.is_trivia() || text.contains('\n') {
                break;
            }
            self.bump();
        }
    }

    fn skip_trivia_from(
        &self,
        idx: usize,
    ) -> usize {
        let mut idx = idx;
        while let Some(&(kind, _)) = self.tokens.get(idx) {
            if !kind.is_trivia() {
                break;
            }
            idx += 1;
        }
        idx
    }

    fn nth_raw(
        &self,
        nth: usize,
    ) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + nth).map(|(kind, _)| *kind)
    }

    fn nth_non_trivia_kind(
        &self,
        nth: usize,
    ) -> Option<SyntaxKind> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|(kind, _)| !kind.is_trivia())
            .nth(nth)
            .map(|(kind, _)| *kind)
    }

    fn at_non_trivia(
        &self,
        kind: SyntaxKind,
    ) -> bool {
        self.nth_non_trivia_kind(0) == Some(kind)
    }

    fn at_non_trivia_text(
        &self,
        text: &str,
    ) -> bool {
        let idx = self.skip_trivia_from(self.pos);
        matches!(self.tokens.get(idx), Some(&(SyntaxKind::Ident, t)) if t == text)
    }

    fn at_non_trivia_same_line(
        &self,
        kind: SyntaxKind,
    ) -> bool {
        let idx = self.skip_trivia_from(self.pos);
        let crosses_line = self.tokens[self.pos.min(idx)..idx].iter().any(|(_, text)| text.contains('\n'));
        !crosses_line && matches!(self.tokens.get(idx), Some(&(k, _)) if k == kind)
    }

    fn at_modifier_keyword(&self) -> bool {
        matches!(self.tokens.get(self.pos), Some(&(SyntaxKind::Ident, text)) if MODIFIER_KEYWORDS.contains(&text))
    }

    fn at_text(
        &self,
        text: &str,
    ) -> bool {
        matches!(self.tokens.get(self.pos), Some(&(_, t)) if t == text)
    }

    fn peek(&self) -> SyntaxKind {
        if self.is_eof() {
            return SyntaxKind::Error;
        }
        self.tokens[self.pos].0
    }

    fn at(
        &self,
        kind: SyntaxKind,
    ) -> bool {
        !self.is_eof() && self.peek() == kind
    }

    fn bump(&mut self) {
        if !self.is_eof() {
            let (kind, text) = self.tokens[self.pos];
            self.builder.token(kind.into(), text);
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Whether a line break between `prev` and `next` keeps an expression going.
fn continues_expression(
    prev: Option<SyntaxKind>,
    next: SyntaxKind,
) -> bool {
    if matches!(
        next,
        SyntaxKind::Dot | SyntaxKind::SafeCall | SyntaxKind::Elvis | SyntaxKind::AndAnd | SyntaxKind::OrOr | SyntaxKind::KwElse
    ) {
        return true;
    }
    matches!(
        prev,
        Some(
            SyntaxKind::Dot
                | SyntaxKind::SafeCall
                | SyntaxKind::Elvis
                | SyntaxKind::Equal
                | SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Star
                | SyntaxKind::Slash
                | SyntaxKind::Percent
                | SyntaxKind::AndAnd
                | SyntaxKind::OrOr
                | SyntaxKind::Comma
                | SyntaxKind::Arrow
                | SyntaxKind::EqualEqual
                | SyntaxKind::NotEqual
                | SyntaxKind::Less
                | SyntaxKind::Greater
                | SyntaxKind::LessEqual
                | SyntaxKind::GreaterEqual
                | SyntaxKind::DotDot
                | SyntaxKind::KwAs
                | SyntaxKind::KwIn
                | SyntaxKind::KwIs
        )
    )
}

#[cfg(test)]
#[path = "../../tests/src/syntax/cst_parser_tests.rs"]
mod tests;
