//! The rewriter's view of a Kotlin file, lowered from the syntax tree.
//!
//! Everything here is an immutable snapshot: a rewrite produces new text,
//! which is parsed again into a fresh [`CompilationUnit`].

pub mod expr;

use rowan::{TextRange, TextSize};
use serde::Serialize;

pub use expr::ExprShape;

use crate::syntax::SyntaxTree;
use crate::syntax::ast::{self, AstNode};
use crate::syntax::helpers::{node_text, range_text, significant_tokens};
use crate::syntax::kind::SyntaxKind;
use crate::vfs::FileId;

#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub file: FileId,
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<ImportDeclaration>,
    /// Every class in the file, nested ones included, in document order.
    pub classes: Vec<ClassDeclaration>,
    tree: SyntaxTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDeclaration {
    pub name: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub path: String,
    pub alias: Option<String>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: String,
    /// Dotted through enclosing classes, e.g. `ItemAdapter.Holder`.
    pub qualified_name: String,
    pub name_range: TextRange,
    pub supertypes: Vec<SupertypeReference>,
    pub fields: Vec<FieldDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub range: TextRange,
    /// Range of `{ ... }`, braces included.
    pub body_range: Option<TextRange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupertypeReference {
    /// Name as written, possibly qualified: `com.example.BaseActivity`.
    pub name: String,
    pub name_range: TextRange,
    pub type_arguments: Option<TypeArgumentList>,
    pub constructor_arguments: Option<ValueArgumentList>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArgumentList {
    pub arguments: Vec<TypeArgument>,
    /// Offset of the closing `>`, if the list is closed.
    pub closing: Option<TextSize>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArgument {
    pub text: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueArgumentList {
    pub arguments: Vec<ValueArgument>,
    /// Offset of the closing `)`, if the list is closed.
    pub closing: Option<TextSize>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueArgument {
    pub text: String,
    pub shape: ExprShape,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInitializer {
    None,
    /// `val x = <expr>`
    Value(ExprShape),
    /// `val x by <expr>`
    Delegate(ExprShape),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub name_range: TextRange,
    /// Dotted type name without type arguments or `?`.
    pub declared_type: Option<String>,
    pub initializer: FieldInitializer,
    pub visibility: Visibility,
    pub is_lateinit: bool,
    pub is_var: bool,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    None,
    /// `fun f() = <expr>`
    Expression(ExprShape),
    /// `fun f() { ... }`; carries the returned expression when the block is a lone `return`.
    Block(Option<ExprShape>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub name_range: TextRange,
    pub is_override: bool,
    pub return_type: Option<String>,
    pub body: MethodBody,
    pub range: TextRange,
}

impl CompilationUnit {
    pub fn parse(
        file: FileId,
        text: &str,
    ) -> Self {
        let tree = SyntaxTree::parse(text);
        let source = tree.source();
        let root = tree.root();

        let (package, imports, classes) = match ast::Root::cast(root) {
            Some(root) => {
                let package = root.package().and_then(|header| {
                    Some(PackageDeclaration {
                        name: header.path()?,
                        range: header.range(),
                    })
                });
                let imports = root
                    .imports()
                    .filter_map(|import| {
                        Some(ImportDeclaration {
                            path: import.path()?,
                            alias: import.alias(),
                            range: import.range(),
                        })
                    })
                    .collect();
                let classes = root.all_classes().filter_map(|class| lower_class(&class, source)).collect();
                (package, imports, classes)
            },
            None => (None, Vec::new(), Vec::new()),
        };

        Self {
            file,
            package,
            imports,
            classes,
            tree,
        }
    }

    pub fn text(&self) -> &str {
        self.tree.source()
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn class(
        &self,
        qualified_name: &str,
    ) -> Option<&ClassDeclaration> {
        self.classes.iter().find(|class| class.qualified_name == qualified_name)
    }

    /// Re-parses `text` as the next version of this file.
    pub fn with_text(
        &self,
        text: &str,
    ) -> Self {
        Self::parse(self.file.clone(), text)
    }
}

impl ClassDeclaration {
    pub fn field(
        &self,
        name: &str,
    ) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn method(
        &self,
        name: &str,
    ) -> Option<&MethodDeclaration> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Offset just past the body's `{`.
    pub fn body_open(&self) -> Option<TextSize> {
        self.body_range.map(|range| range.start() + TextSize::from(1))
    }
}

impl SupertypeReference {
    /// `com.example.BaseActivity` -> `BaseActivity`
    pub fn bare_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

impl FieldDeclaration {
    /// Last segment of the declared type: `CustomBinding` for `com.example.CustomBinding`.
    pub fn type_leaf(&self) -> Option<&str> {
        let declared = self.declared_type.as_deref()?;
        declared.rsplit('.').next()
    }
}

fn lower_class(
    class: &ast::ClassDecl,
    source: &str,
) -> Option<ClassDeclaration> {
    let is_companion = class.modifiers().is_some_and(|m| m.has("companion"));
    let (name, name_range) = match class.name_token() {
        Some(token) => (token.text().to_string(), token.text_range()),
        None if is_companion => ("Companion".to_string(), class.keyword_token()?.text_range()),
        None => return None,
    };

    let mut qualified: Vec<String> = class
        .syntax()
        .ancestors()
        .skip(1)
        .filter_map(ast::ClassDecl::cast)
        .filter_map(|outer| outer.name_token().map(|token| token.text().to_string()))
        .collect();
    qualified.reverse();
    qualified.push(name.clone());

    let supertypes = class.supertypes().filter_map(|entry| lower_supertype(&entry, source)).collect();
    let body = class.body();
    let fields = body
        .iter()
        .flat_map(|body| body.properties())
        .filter_map(|property| lower_field(&property, source))
        .collect();
    let methods = body
        .iter()
        .flat_map(|body| body.functions())
        .filter_map(|function| lower_method(&function, source))
        .collect();

    Some(ClassDeclaration {
        name,
        qualified_name: qualified.join("."),
        name_range,
        supertypes,
        fields,
        methods,
        range: class.range(),
        body_range: body.map(|body| body.range()),
    })
}

fn lower_supertype(
    entry: &ast::SupertypeEntry,
    source: &str,
) -> Option<SupertypeReference> {
    let type_ref = entry.type_ref()?;
    let name = type_ref.name()?;
    let name_range = type_ref.name_range()?;

    let type_arguments = type_ref.type_args().map(|list| TypeArgumentList {
        arguments: list
            .argument_ranges()
            .into_iter()
            .map(|range| TypeArgument {
                text: range_text(source, range).to_string(),
                range,
            })
            .collect(),
        closing: list.closing_token().map(|token| token.text_range().start()),
        range: list.range(),
    });

    let constructor_arguments = entry.value_args().map(|list| ValueArgumentList {
        arguments: list
            .args()
            .map(|arg| ValueArgument {
                text: node_text(arg.syntax(), source).to_string(),
                shape: arg.expr().map_or(
                    ExprShape::Other {
                        text: String::new(),
                    },
                    |expr| ExprShape::from_expr(&expr, source),
                ),
                range: arg.range(),
            })
            .collect(),
        closing: list.closing_token().map(|token| token.text_range().start()),
        range: list.range(),
    });

    Some(SupertypeReference {
        name,
        name_range,
        type_arguments,
        constructor_arguments,
        range: entry.range(),
    })
}

fn lower_field(
    property: &ast::PropertyDecl,
    source: &str,
) -> Option<FieldDeclaration> {
    let name_token = property.name_token()?;
    let modifiers = property.modifiers();
    let has = |keyword: &str| modifiers.as_ref().is_some_and(|m| m.has(keyword));

    let visibility = if has("private") {
        Visibility::Private
    } else if has("protected") {
        Visibility::Protected
    } else if has("internal") {
        Visibility::Internal
    } else {
        Visibility::Public
    };

    let initializer = if let Some(delegate) = property.delegate() {
        delegate.expr().map_or(FieldInitializer::None, |expr| FieldInitializer::Delegate(ExprShape::from_expr(&expr, source)))
    } else if let Some(init) = property.initializer() {
        init.expr().map_or(FieldInitializer::None, |expr| FieldInitializer::Value(ExprShape::from_expr(&expr, source)))
    } else {
        FieldInitializer::None
    };

    Some(FieldDeclaration {
        name: name_token.text().to_string(),
        name_range: name_token.text_range(),
        declared_type: property.type_ref().and_then(|ty| ty.name()),
        initializer,
        visibility,
        is_lateinit: has("lateinit"),
        is_var: property.is_var(),
        range: property.range(),
    })
}

fn lower_method(
    function: &ast::FunctionDecl,
    source: &str,
) -> Option<MethodDeclaration> {
    let name_token = function.name_token()?;
    let body = match function.body() {
        Some(body) => match (body.expr(), body.block()) {
            (Some(expr), _) => MethodBody::Expression(ExprShape::from_expr(&expr, source)),
            (None, Some(block)) => MethodBody::Block(lone_return(&block, source)),
            (None, None) => MethodBody::None,
        },
        None => MethodBody::None,
    };

    Some(MethodDeclaration {
        name: name_token.text().to_string(),
        name_range: name_token.text_range(),
        is_override: function.modifiers().is_some_and(|m| m.has("override")),
        return_type: function.return_type().and_then(|ty| ty.name()),
        body,
        range: function.range(),
    })
}

/// `{ return R.layout.x }` -> the shape of `R.layout.x`.
fn lone_return(
    block: &ast::Block,
    source: &str,
) -> Option<ExprShape> {
    let tokens = significant_tokens(block.syntax());
    let inner = tokens.get(1..tokens.len().checked_sub(1)?)?;
    let (first, rest) = inner.split_first()?;
    if first.kind() != SyntaxKind::KwReturn || rest.is_empty() {
        return None;
    }
    let rest = match rest.last() {
        Some(last) if last.kind() == SyntaxKind::Semicolon => &rest[..rest.len() - 1],
        _ => rest,
    };
    Some(ExprShape::from_tokens(rest, source))
}

#[cfg(test)]
#[path = "../../tests/src/model/model_tests.rs"]
mod tests;
