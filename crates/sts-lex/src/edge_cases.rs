//! Edge case tests for sts-lex

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token};
    use sts_util::Handler;

    fn lex_all(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next();
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn single_char_identifier() {
        let t = lex_all("x");
        assert_eq!(t[0], Token::Ident(sts_util::Symbol::intern("x")));
    }

    #[test]
    fn long_identifier() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("let {} = 1;", name));
        assert!(t.contains(&Token::Ident(sts_util::Symbol::intern(&name))));
    }

    #[test]
    fn keywords_are_not_identifiers() {
        let t = lex_all("function let if");
        assert_eq!(t[0], Token::Function);
        assert_eq!(t[1], Token::Let);
    }

    #[test]
    fn hex_bounds() {
        let t = lex_all("0x0 0xFF");
        assert_eq!(t[0], Token::IntegerLit(0));
        assert_eq!(t[1], Token::IntegerLit(255));
    }

    #[test]
    fn binary_literal() {
        let t = lex_all("0b0 0b1010");
        assert_eq!(t[1], Token::IntegerLit(10));
    }

    #[test]
    fn octal_literal() {
        let t = lex_all("0o0 0o77");
        assert_eq!(t[1], Token::IntegerLit(63));
    }

    #[test]
    fn empty_string_literal() {
        let t = lex_all("\"\"");
        if let Token::StringLit(s) = &t[0] {
            assert_eq!(s.as_str(), "");
        } else {
            panic!("expected a string literal");
        }
    }

    #[test]
    fn all_binary_operators() {
        let t = lex_all("+ - * / % == != < > <= >= && || !");
        assert!(t.contains(&Token::Plus));
        assert!(t.contains(&Token::EqEq));
        assert!(t.contains(&Token::NotEq));
        assert!(t.contains(&Token::AmpAmp));
        assert!(t.contains(&Token::PipePipe));
    }

    #[test]
    fn all_delimiters() {
        let t = lex_all("( ) { } [ ] , ; : . ...");
        assert!(t.contains(&Token::LParen));
        assert!(t.contains(&Token::DotDotDot));
    }

    #[test]
    fn nested_delimiters() {
        let t = lex_all("((()))");
        assert_eq!(t.iter().filter(|x| **x == Token::LParen).count(), 3);
    }

    #[test]
    fn case_sensitive_keywords() {
        let t = lex_all("Function function");
        assert_eq!(t[0], Token::Ident(sts_util::Symbol::intern("Function")));
        assert_eq!(t[1], Token::Function);
    }

    #[test]
    fn boolean_literals() {
        let t = lex_all("true false");
        assert_eq!(t[0], Token::True);
        assert_eq!(t[1], Token::False);
    }

    #[test]
    fn at_sign_for_decorators() {
        assert!(lex_all("@decorator").contains(&Token::At));
    }

    #[test]
    fn tilde_bitwise_not() {
        assert!(lex_all("~x").contains(&Token::Tilde));
    }

    #[test]
    fn scientific_notation_floats() {
        let t = lex_all("1e10 1.5e-3");
        assert!(t.iter().all(|x| matches!(x, Token::FloatLit(_))));
    }

    #[test]
    fn max_integer_literal() {
        let t = lex_all("18446744073709551615");
        assert!(matches!(t[0], Token::IntegerLit(_)));
    }

    #[test]
    fn all_statement_keywords() {
        let t = lex_all(
            "function let if else while for break continue return enum class switch try catch finally",
        );
        assert!(t.contains(&Token::Function));
        assert!(t.contains(&Token::Enum));
        assert!(t.contains(&Token::Class));
        assert!(t.contains(&Token::Switch));
    }

    #[test]
    fn invalid_hex_prefix_reports_error() {
        let h = Handler::new();
        let t = Lexer::new("0x", &h).next();
        assert!(matches!(t, Token::IntegerLit(_) | Token::Invalid(_)));
    }

    #[test]
    fn invalid_binary_prefix_reports_error() {
        let h = Handler::new();
        let t = Lexer::new("0b", &h).next();
        assert!(matches!(t, Token::IntegerLit(_) | Token::Invalid(_)));
    }

    #[test]
    fn unterminated_string_reports_error() {
        let h = Handler::new();
        let _ = Lexer::new("\"unterminated", &h).next();
        assert!(h.has_errors());
    }

    #[test]
    fn unterminated_regexp_reports_error() {
        let h = Handler::new();
        let mut lexer = Lexer::new("/unterminated\n", &h);
        lexer.next();
        let _ = lexer.rescan_slash_as_regexp();
        assert!(h.has_errors());
    }

    #[test]
    fn stray_character_reports_error_and_recovers() {
        let h = Handler::new();
        let mut lexer = Lexer::new("@#$%", &h);
        while lexer.next() != Token::Eof {}
        assert!(h.has_errors());
    }

    #[test]
    fn mixed_valid_and_invalid_characters() {
        let h = Handler::new();
        let mut lexer = Lexer::new("let x = # 1;", &h);
        while lexer.next() != Token::Eof {}
        assert!(h.has_errors());
    }

    #[test]
    fn consecutive_increment_operators() {
        assert_eq!(lex_all("+++"), vec![Token::PlusPlus, Token::Plus]);
    }

    #[test]
    fn whitespace_variations() {
        let t = lex_all("let\tx\n=\n1");
        assert!(t.contains(&Token::Let));
        assert!(t.contains(&Token::IntegerLit(1)));
    }

    #[test]
    fn leading_zeros_still_lex() {
        assert!(!lex_all("007").is_empty());
    }
}
