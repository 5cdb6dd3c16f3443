//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Token};
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;
use sts_util::Symbol;

impl<'a> Lexer<'a> {
    /// Reads an identifier starting at the cursor, returning a keyword
    /// token if its text matches a reserved word and `Token::Ident`
    /// otherwise.
    pub(crate) fn read_identifier(&mut self) -> Token {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.scan_start);
        keyword_from_ident(text).unwrap_or_else(|| Token::Ident(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use crate::token::Token;
    use sts_util::{Handler, Symbol};

    fn lex(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next()
    }

    #[test]
    fn simple_identifier() {
        assert_eq!(lex("foo"), Token::Ident(Symbol::intern("foo")));
    }

    #[test]
    fn identifier_with_digits_and_underscore() {
        assert_eq!(lex("foo_bar_123"), Token::Ident(Symbol::intern("foo_bar_123")));
    }

    #[test]
    fn keywords() {
        assert_eq!(lex("let"), Token::Let);
        assert_eq!(lex("function"), Token::Function);
        assert_eq!(lex("if"), Token::If);
        assert_eq!(lex("else"), Token::Else);
        assert_eq!(lex("while"), Token::While);
        assert_eq!(lex("switch"), Token::Switch);
        assert_eq!(lex("enum"), Token::Enum);
        assert_eq!(lex("class"), Token::Class);
        assert_eq!(lex("true"), Token::True);
        assert_eq!(lex("false"), Token::False);
        assert_eq!(lex("return"), Token::Return);
        assert_eq!(lex("break"), Token::Break);
        assert_eq!(lex("continue"), Token::Continue);
        assert_eq!(lex("for"), Token::For);
        assert_eq!(lex("const"), Token::Const);
        assert_eq!(lex("static"), Token::Static);
        assert_eq!(lex("as"), Token::As);
        assert_eq!(lex("type"), Token::Type);
        assert_eq!(lex("import"), Token::Import);
        assert_eq!(lex("export"), Token::Export);
        assert_eq!(lex("instanceof"), Token::Instanceof);
        assert_eq!(lex("typeof"), Token::Typeof);
        assert_eq!(lex("yield"), Token::Yield);
    }

    #[test]
    fn identifier_that_merely_starts_like_a_keyword() {
        assert_eq!(lex("lettuce"), Token::Ident(Symbol::intern("lettuce")));
        assert_eq!(lex("classify"), Token::Ident(Symbol::intern("classify")));
    }
}
