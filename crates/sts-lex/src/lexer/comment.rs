//! Whitespace and comment skipping.
//!
//! Comments and whitespace never produce tokens; they are skipped in one
//! pass by [`Lexer::skip_trivia`], which also tracks whether a line break
//! was crossed so the parser can approximate automatic semicolon
//! insertion per `nextTokenOnNewLine`.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments, returning whether a line break was
    /// crossed while doing so.
    pub(crate) fn skip_trivia(&mut self) -> bool {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{FEFF}') {
                self.cursor.advance();
            }
        }

        let mut saw_newline = false;
        loop {
            if self.cursor.is_at_end() {
                return saw_newline;
            }

            match self.cursor.current_char() {
                '\n' => {
                    saw_newline = true;
                    self.cursor.advance();
                },
                ' ' | '\t' | '\r' => {
                    self.cursor.advance();
                },
                '/' => match self.cursor.peek_char(1) {
                    '/' => self.skip_line_comment(),
                    '*' => {
                        if self.skip_block_comment() {
                            saw_newline = true;
                        }
                    },
                    _ => return saw_newline,
                },
                _ => return saw_newline,
            }
        }
    }

    /// Skips a `/* ... */` block comment (non-nested). Returns whether the
    /// comment body contained a line break.
    fn skip_block_comment(&mut self) -> bool {
        self.cursor.advance();
        self.cursor.advance();
        let mut saw_newline = false;

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated block comment".to_string());
                return saw_newline;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return saw_newline;
            }
            if self.cursor.current_char() == '\n' {
                saw_newline = true;
            }
            self.cursor.advance();
        }
    }

    /// Skips a `//` line comment, stopping before the terminating newline.
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use sts_util::Handler;

    fn ident_after(source: &str) -> crate::token::Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next()
    }

    #[test]
    fn skips_leading_whitespace() {
        assert_eq!(
            ident_after("   hello"),
            crate::token::Token::Ident(sts_util::Symbol::intern("hello"))
        );
    }

    #[test]
    fn skips_line_comment() {
        assert_eq!(
            ident_after("// comment\nhello"),
            crate::token::Token::Ident(sts_util::Symbol::intern("hello"))
        );
    }

    #[test]
    fn skips_block_comment() {
        assert_eq!(
            ident_after("/* comment */hello"),
            crate::token::Token::Ident(sts_util::Symbol::intern("hello"))
        );
    }

    #[test]
    fn reports_newline_crossed_before_next_token() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("foo\nbar", &handler);
        lexer.next();
        assert!(lexer.next_token_on_new_line());
    }

    #[test]
    fn reports_no_newline_on_same_line() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("foo bar", &handler);
        lexer.next();
        assert!(!lexer.next_token_on_new_line());
    }
}
