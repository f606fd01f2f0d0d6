    use super::*;

    fn lex(input: &str) -> Vec<(SyntaxKind, &str)> {
        Lexer::new(input).collect()
    }

    fn significant(input: &str) -> Vec<(SyntaxKind, &str)> {
        lex(input).into_iter().filter(|(kind, _)| !kind.is_trivia()).collect()
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("class fun val");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::KwClass, "class"),
                (SyntaxKind::Whitespace, " "),
                (SyntaxKind::KwFun, "fun"),
                (SyntaxKind::Whitespace, " "),
                (SyntaxKind::KwVal, "val"),
            ]
        );
    }

    #[test]
    fn test_soft_keywords_are_identifiers() {
        let tokens = significant("private lateinit override get");
        assert!(tokens.iter().all(|(kind, _)| *kind == SyntaxKind::Ident));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(lex("classes"), vec![(SyntaxKind::Ident, "classes")]);
        assert_eq!(lex("value"), vec![(SyntaxKind::Ident, "value")]);
    }

    #[test]
    fn test_backticked_identifier() {
        assert_eq!(lex("`is`"), vec![(SyntaxKind::Ident, "`is`")]);
    }

    #[test]
    fn test_null_safety_operators() {
        let tokens = significant("a?.b ?: c!!");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::Ident, "a"),
                (SyntaxKind::SafeCall, "?."),
                (SyntaxKind::Ident, "b"),
                (SyntaxKind::Elvis, "?:"),
                (SyntaxKind::Ident, "c"),
                (SyntaxKind::ExclaimExclaim, "!!"),
            ]
        );
    }

    #[test]
    fn test_callable_reference() {
        let tokens = significant("ItemBinding::inflate");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::Ident, "ItemBinding"),
                (SyntaxKind::DoubleColon, "::"),
                (SyntaxKind::Ident, "inflate"),
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = significant(r#"12 0xFF 3.5f 1e3 "a\"b" 'c'"#);
        let kinds: Vec<_> = tokens.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Integer,
                SyntaxKind::Integer,
                SyntaxKind::Float,
                SyntaxKind::Float,
                SyntaxKind::String,
                SyntaxKind::Char,
            ]
        );
    }

    #[test]
    fn test_raw_string_spans_lines() {
        let input = "\"\"\"line one\nline \"two\"\n\"\"\"";
        assert_eq!(lex(input), vec![(SyntaxKind::RawString, input)]);
    }

    #[test]
    fn test_comments() {
        let tokens = lex("// line\n/* block\n comment */x");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::Comment, "// line"),
                (SyntaxKind::Whitespace, "\n"),
                (SyntaxKind::Comment, "/* block\n comment */"),
                (SyntaxKind::Ident, "x"),
            ]
        );
    }

    #[test]
    fn test_unknown_characters_are_errors() {
        let tokens = lex("a # b");
        assert_eq!(tokens[2], (SyntaxKind::Error, "#"));
        let text: String = tokens.iter().map(|(_, text)| *text).collect();
        assert_eq!(text, "a # b");
    }
