use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    Error = 0,
    Whitespace,
    Comment,

    // Identifiers & Literals
    Ident,
    Integer,
    Float,
    String,
    RawString,
    Char,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Less,
    Greater,
    Comma,
    Dot,
    DotDot,
    SafeCall,
    Elvis,
    Semicolon,
    Colon,
    DoubleColon,
    Question,
    At,
    Arrow,

    // Operators
    Equal,
    EqualEqual,
    EqualEqualEqual,
    NotEqual,
    NotEqualEqual,
    LessEqual,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AndAnd,
    OrOr,
    Amp,
    Pipe,
    Exclaim,
    ExclaimExclaim,
    Caret,
    Tilde,

    // Hard keywords the parser cares about
    KwPackage,
    KwImport,
    KwClass,
    KwInterface,
    KwObject,
    KwFun,
    KwVal,
    KwVar,
    KwBy,
    KwReturn,
    KwThis,
    KwSuper,
    KwConstructor,
    KwTypealias,
    KwAs,
    KwIn,
    KwIs,
    KwIf,
    KwElse,
    KwWhen,
    KwNull,
    KwTrue,
    KwFalse,

    // Nodes
    Root,
    PackageHeader,
    ImportDirective,
    Modifiers,
    ClassDecl,
    TypeParams,
    PrimaryCtor,
    SupertypeList,
    SupertypeEntry,
    TypeRef,
    TypeArgList,
    ValueArgList,
    ValueArg,
    ClassBody,
    PropertyDecl,
    PropertyDelegate,
    PropertyAccessor,
    Initializer,
    FunctionDecl,
    ParamList,
    FunctionBody,
    Block,
    Expr,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = ())]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//.*", allow_greedy = true)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("?.")]
    SafeCall,
    #[token("?:")]
    Elvis,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token("->")]
    Arrow,

    // Operators (multi-char first)
    #[token("===")]
    EqualEqualEqual,
    #[token("!==")]
    NotEqualEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!!")]
    ExclaimExclaim,
    #[token("=")]
    Equal,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("!")]
    Exclaim,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // Keywords
    #[token("package")]
    KwPackage,
    #[token("import")]
    KwImport,
    #[token("class")]
    KwClass,
    #[token("interface")]
    KwInterface,
    #[token("object")]
    KwObject,
    #[token("fun")]
    KwFun,
    #[token("val")]
    KwVal,
    #[token("var")]
    KwVar,
    #[token("by")]
    KwBy,
    #[token("return")]
    KwReturn,
    #[token("this")]
    KwThis,
    #[token("super")]
    KwSuper,
    #[token("constructor")]
    KwConstructor,
    #[token("typealias")]
    KwTypealias,
    #[token("as")]
    KwAs,
    #[token("in")]
    KwIn,
    #[token("is")]
    KwIs,
    #[token("if")]
    KwIf,
    #[token("else")]
    KwElse,
    #[token("when")]
    KwWhen,
    #[token("null")]
    KwNull,
    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    #[regex(r"`[^`\n]+`")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*")]
    #[regex(r"0[bB][01_]+[uUlL]*")]
    #[regex(r"[0-9][0-9_]*[uUlL]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fF]?")]
    #[regex(r"[0-9][0-9_]*[fF]")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,
}

impl From<TokenKind> for SyntaxKind {
    fn from(token: TokenKind) -> Self {
        match token {
            TokenKind::Whitespace => SyntaxKind::Whitespace,
            TokenKind::Comment => SyntaxKind::Comment,
            TokenKind::LParen => SyntaxKind::LParen,
            TokenKind::RParen => SyntaxKind::RParen,
            TokenKind::LBrace => SyntaxKind::LBrace,
            TokenKind::RBrace => SyntaxKind::RBrace,
            TokenKind::LBracket => SyntaxKind::LBracket,
            TokenKind::RBracket => SyntaxKind::RBracket,
            TokenKind::Less => SyntaxKind::Less,
            TokenKind::Greater => SyntaxKind::Greater,
            TokenKind::Comma => SyntaxKind::Comma,
            TokenKind::Dot => SyntaxKind::Dot,
            TokenKind::DotDot => SyntaxKind::DotDot,
            TokenKind::SafeCall => SyntaxKind::SafeCall,
            TokenKind::Elvis => SyntaxKind::Elvis,
            TokenKind::Semicolon => SyntaxKind::Semicolon,
            TokenKind::Colon => SyntaxKind::Colon,
            TokenKind::DoubleColon => SyntaxKind::DoubleColon,
            TokenKind::Question => SyntaxKind::Question,
            TokenKind::At => SyntaxKind::At,
            TokenKind::Arrow => SyntaxKind::Arrow,
            TokenKind::EqualEqualEqual => SyntaxKind::EqualEqualEqual,
            TokenKind::NotEqualEqual => SyntaxKind::NotEqualEqual,
            TokenKind::EqualEqual => SyntaxKind::EqualEqual,
            TokenKind::NotEqual => SyntaxKind::NotEqual,
            TokenKind::LessEqual => SyntaxKind::LessEqual,
            TokenKind::GreaterEqual => SyntaxKind::GreaterEqual,
            TokenKind::PlusPlus => SyntaxKind::PlusPlus,
            TokenKind::MinusMinus => SyntaxKind::MinusMinus,
            TokenKind::PlusEqual => SyntaxKind::PlusEqual,
            TokenKind::MinusEqual => SyntaxKind::MinusEqual,
            TokenKind::StarEqual => SyntaxKind::StarEqual,
            TokenKind::SlashEqual => SyntaxKind::SlashEqual,
            TokenKind::PercentEqual => SyntaxKind::PercentEqual,
            TokenKind::AndAnd => SyntaxKind::AndAnd,
            TokenKind::OrOr => SyntaxKind::OrOr,
            TokenKind::ExclaimExclaim => SyntaxKind::ExclaimExclaim,
            TokenKind::Equal => SyntaxKind::Equal,
            TokenKind::Plus => SyntaxKind::Plus,
            TokenKind::Minus => SyntaxKind::Minus,
            TokenKind::Star => SyntaxKind::Star,
            TokenKind::Slash => SyntaxKind::Slash,
            TokenKind::Percent => SyntaxKind::Percent,
            TokenKind::Amp => SyntaxKind::Amp,
            TokenKind::Pipe => SyntaxKind::Pipe,
            TokenKind::Exclaim => SyntaxKind::Exclaim,
            TokenKind::Caret => SyntaxKind::Caret,
            TokenKind::Tilde => SyntaxKind::Tilde,
            TokenKind::KwPackage => SyntaxKind::KwPackage,
            TokenKind::KwImport => SyntaxKind::KwImport,
            TokenKind::KwClass => SyntaxKind::KwClass,
            TokenKind::KwInterface => SyntaxKind::KwInterface,
            TokenKind::KwObject => SyntaxKind::KwObject,
            TokenKind::KwFun => SyntaxKind::KwFun,
            TokenKind::KwVal => SyntaxKind::KwVal,
            TokenKind::KwVar => SyntaxKind::KwVar,
            TokenKind::KwBy => SyntaxKind::KwBy,
            TokenKind::KwReturn => SyntaxKind::KwReturn,
            TokenKind::KwThis => SyntaxKind::KwThis,
            TokenKind::KwSuper => SyntaxKind::KwSuper,
            TokenKind::KwConstructor => SyntaxKind::KwConstructor,
            TokenKind::KwTypealias => SyntaxKind::KwTypealias,
            TokenKind::KwAs => SyntaxKind::KwAs,
            TokenKind::KwIn => SyntaxKind::KwIn,
            TokenKind::KwIs => SyntaxKind::KwIs,
            TokenKind::KwIf => SyntaxKind::KwIf,
            TokenKind::KwElse => SyntaxKind::KwElse,
            TokenKind::KwWhen => SyntaxKind::KwWhen,
            TokenKind::KwNull => SyntaxKind::KwNull,
            TokenKind::KwTrue => SyntaxKind::KwTrue,
            TokenKind::KwFalse => SyntaxKind::KwFalse,
            TokenKind::Ident => SyntaxKind::Ident,
            TokenKind::Integer => SyntaxKind::Integer,
            TokenKind::Float => SyntaxKind::Float,
            TokenKind::String => SyntaxKind::String,
            TokenKind::RawString => SyntaxKind::RawString,
            TokenKind::Char => SyntaxKind::Char,
        }
    }
}
