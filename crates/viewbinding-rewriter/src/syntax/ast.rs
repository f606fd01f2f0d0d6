use rowan::TextRange;

use crate::syntax::cst::{SyntaxNode, SyntaxToken};
use crate::syntax::kind::SyntaxKind;

pub trait AstNode: Sized {
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn range(&self) -> TextRange {
        self.syntax().text_range()
    }
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn cast(syntax: SyntaxNode) -> Option<Self> {
                if syntax.kind() == SyntaxKind::$kind {
                    Some(Self { syntax })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(PackageHeader, PackageHeader);
ast_node!(ImportDirective, ImportDirective);
ast_node!(Modifiers, Modifiers);
ast_node!(ClassDecl, ClassDecl);
ast_node!(SupertypeList, SupertypeList);
ast_node!(SupertypeEntry, SupertypeEntry);
ast_node!(TypeRef, TypeRef);
ast_node!(TypeArgList, TypeArgList);
ast_node!(ValueArgList, ValueArgList);
ast_node!(ValueArg, ValueArg);
ast_node!(ClassBody, ClassBody);
ast_node!(PropertyDecl, PropertyDecl);
ast_node!(Initializer, Initializer);
ast_node!(PropertyDelegate, PropertyDelegate);
ast_node!(FunctionDecl, FunctionDecl);
ast_node!(FunctionBody, FunctionBody);
ast_node!(Block, Block);
ast_node!(Expr, Expr);

fn direct_tokens(syntax: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    syntax.children_with_tokens().filter_map(|element| element.into_token())
}

fn has_direct_token(
    syntax: &SyntaxNode,
    kind: SyntaxKind,
) -> bool {
    direct_tokens(syntax).any(|token| token.kind() == kind)
}

/// Joins the direct `Ident`/`.` tokens of a node into a dotted path.
fn dotted_path(syntax: &SyntaxNode) -> Option<String> {
    let path: String = direct_tokens(syntax)
        .filter(|token| matches!(token.kind(), SyntaxKind::Ident | SyntaxKind::Dot | SyntaxKind::Star))
        .map(|token| token.text().to_string())
        .collect();
    (!path.is_empty()).then_some(path)
}

impl Root {
    pub fn package(&self) -> Option<PackageHeader> {
        self.syntax.children().find_map(PackageHeader::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDirective> {
        self.syntax.children().filter_map(ImportDirective::cast)
    }

    /// Every class declaration in the file, nested ones included, in document order.
    pub fn all_classes(&self) -> impl Iterator<Item = ClassDecl> {
        self.syntax.descendants().filter_map(ClassDecl::cast)
    }
}

impl PackageHeader {
    pub fn path(&self) -> Option<String> {
        dotted_path(&self.syntax)
    }
}

impl ImportDirective {
    pub fn path(&self) -> Option<String> {
        let mut path = String::new();
        for token in direct_tokens(&self.syntax) {
            match token.kind() {
                SyntaxKind::KwAs => break,
                SyntaxKind::Ident | SyntaxKind::Dot | SyntaxKind::Star => path.push_str(token.text()),
                _ => {},
            }
        }
        (!path.is_empty()).then_some(path)
    }

    pub fn alias(&self) -> Option<String> {
        direct_tokens(&self.syntax)
            .skip_while(|token| token.kind() != SyntaxKind::KwAs)
            .find(|token| token.kind() == SyntaxKind::Ident)
            .map(|token| token.text().to_string())
    }
}

impl Modifiers {
    pub fn has(
        &self,
        keyword: &str,
    ) -> bool {
        direct_tokens(&self.syntax).any(|token| token.kind() == SyntaxKind::Ident && token.text() == keyword)
    }
}

impl ClassDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.syntax.children().find_map(Modifiers::cast)
    }

    pub fn keyword_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).find(|token| {
            matches!(token.kind(), SyntaxKind::KwClass | SyntaxKind::KwInterface | SyntaxKind::KwObject)
        })
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).find(|token| token.kind() == SyntaxKind::Ident)
    }

    pub fn supertypes(&self) -> impl Iterator<Item = SupertypeEntry> {
        self.syntax
            .children()
            .find_map(SupertypeList::cast)
            .into_iter()
            .flat_map(|list| list.syntax.children())
            .filter_map(SupertypeEntry::cast)
    }

    pub fn body(&self) -> Option<ClassBody> {
        self.syntax.children().find_map(ClassBody::cast)
    }
}

impl SupertypeEntry {
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }

    pub fn value_args(&self) -> Option<ValueArgList> {
        self.syntax.children().find_map(ValueArgList::cast)
    }

    pub fn is_delegated(&self) -> bool {
        has_direct_token(&self.syntax, SyntaxKind::KwBy)
    }
}

impl TypeRef {
    /// Dotted name without type arguments or nullability, e.g. `com.example.Base`.
    pub fn name(&self) -> Option<String> {
        dotted_path(&self.syntax)
    }

    /// Range covering the dotted name tokens only.
    pub fn name_range(&self) -> Option<TextRange> {
        let mut tokens = direct_tokens(&self.syntax).filter(|token| matches!(token.kind(), SyntaxKind::Ident | SyntaxKind::Dot));
        let first = tokens.next()?;
        let last = tokens.last().unwrap_or_else(|| first.clone());
        Some(TextRange::new(first.text_range().start(), last.text_range().end()))
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        self.syntax.children().find_map(TypeArgList::cast)
    }

    pub fn is_nullable(&self) -> bool {
        has_direct_token(&self.syntax, SyntaxKind::Question)
    }
}

impl TypeArgList {
    /// Ranges of the comma-separated arguments, trivia excluded.
    pub fn argument_ranges(&self) -> Vec<TextRange> {
        let mut ranges = Vec::new();
        let mut current: Option<TextRange> = None;
        for element in self.syntax.children_with_tokens() {
            let kind = element.kind();
            if kind.is_trivia() || matches!(kind, SyntaxKind::Less | SyntaxKind::Greater) {
                continue;
            }
            if kind == SyntaxKind::Comma {
                ranges.extend(current.take());
                continue;
            }
            let range = element.text_range();
            current = Some(match current {
                Some(existing) => existing.cover(range),
                None => range,
            });
        }
        ranges.extend(current);
        ranges
    }

    pub fn closing_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).filter(|token| token.kind() == SyntaxKind::Greater).last()
    }
}

impl ValueArgList {
    pub fn args(&self) -> impl Iterator<Item = ValueArg> {
        self.syntax.children().filter_map(ValueArg::cast)
    }

    pub fn closing_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).filter(|token| token.kind() == SyntaxKind::RParen).last()
    }
}

impl ValueArg {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

impl ClassBody {
    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).find(|token| token.kind() == SyntaxKind::LBrace)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyDecl> {
        self.syntax.children().filter_map(PropertyDecl::cast)
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDecl> {
        self.syntax.children().filter_map(FunctionDecl::cast)
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> {
        self.syntax.children().filter_map(ClassDecl::cast)
    }
}

impl PropertyDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.syntax.children().find_map(Modifiers::cast)
    }

    /// The property name; for extension properties this is the identifier after the receiver.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.syntax).filter(|token| token.kind() == SyntaxKind::Ident).last()
    }

    pub fn is_var(&self) -> bool {
        has_direct_token(&self.syntax, SyntaxKind::KwVar)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }

    pub fn initializer(&self) -> Option<Initializer> {
        self.syntax.children().find_map(Initializer::cast)
    }

    pub fn delegate(&self) -> Option<PropertyDelegate> {
        self.syntax.children().find_map(PropertyDelegate::cast)
    }
}

impl Initializer {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

impl PropertyDelegate {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

impl FunctionDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.syntax.children().find_map(Modifiers::cast)
    }

    /// The last identifier before the parameter list, so receivers and `where` clauses are skipped.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .take_while(|element| element.kind() != SyntaxKind::ParamList)
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == SyntaxKind::Ident)
            .last()
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        self.syntax.children().find_map(TypeRef::cast)
    }

    pub fn body(&self) -> Option<FunctionBody> {
        self.syntax.children().find_map(FunctionBody::cast)
    }
}

impl FunctionBody {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn block(&self) -> Option<Block> {
        self.syntax.children().find_map(Block::cast)
    }
}
