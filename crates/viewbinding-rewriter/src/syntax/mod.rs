pub mod ast;
pub mod cst;
pub mod cst_parser;
pub mod helpers;
pub mod kind;
pub mod lexer;

use std::sync::Arc;

use crate::syntax::cst::SyntaxNode;
use crate::syntax::cst_parser::Parser;

/// Immutable syntax snapshot of one Kotlin source file.
#[derive(Clone)]
pub struct SyntaxTree {
    green: rowan::GreenNode,
    source: Arc<str>,
}

impl SyntaxTree {
    pub fn parse(source: &str) -> Self {
        let parser = Parser::new(source);
        let green = parser.parse();
        Self {
            green,
            source: Arc::from(source),
        }
    }

    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{:#?}", self.root())
    }
}
