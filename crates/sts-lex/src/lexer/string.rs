//! String and regexp literal lexing.
//!
//! String literals accept both `"..."` and `'...'` delimiters, matching
//! the source language's grammar. Regexp literals are never reached by
//! ordinary dispatch — `/` always scans as division or a compound
//! assignment first — they're only produced by
//! [`Lexer::rescan_slash_as_regexp`] when the parser knows grammar
//! position makes a regexp the only legal reading.

use crate::token::Token;
use crate::unicode::{parse_hex_byte, parse_hex_codepoint};
use crate::Lexer;
use sts_util::Symbol;

impl<'a> Lexer<'a> {
    /// Reads a `"..."` or `'...'` string literal, decoding escapes.
    pub(crate) fn read_string(&mut self) -> Token {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                break;
            }

            let c = self.cursor.current_char();

            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\n' {
                self.report_error("unterminated string literal".to_string());
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                if let Some(escaped) = self.parse_escape() {
                    content.push(escaped);
                }
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        Token::StringLit(Symbol::intern(&content))
    }

    /// Reads a `/body/flags` regexp literal. Assumes the cursor is
    /// positioned at the opening `/`.
    pub(crate) fn read_regexp(&mut self) -> Token {
        let start = self.cursor.position();
        self.cursor.advance();

        let mut in_class = false;
        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated regular expression literal".to_string());
                break;
            }
            let c = self.cursor.current_char();
            if c == '\n' {
                self.report_error("unterminated regular expression literal".to_string());
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                if !self.cursor.is_at_end() {
                    self.cursor.advance();
                }
                continue;
            }
            if c == '[' {
                in_class = true;
            } else if c == ']' {
                in_class = false;
            } else if c == '/' && !in_class {
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }

        while crate::unicode::is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        Token::RegexpLit(Symbol::intern(self.cursor.slice_from(start)))
    }

    /// Parses a backslash escape sequence (the backslash itself has
    /// already been consumed). Recognizes `\n \r \t \\ \' \" \0 \xHH
    /// \uHHHH`; anything else is reported and dropped.
    fn parse_escape(&mut self) -> Option<char> {
        if self.cursor.is_at_end() {
            self.report_error("unterminated escape sequence".to_string());
            return None;
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            '0' => Some('\0'),
            'x' => {
                let hex = self.take_hex_digits(2);
                match parse_hex_byte(&hex) {
                    Some(b) => Some(b as char),
                    None => {
                        self.report_error("invalid hex escape sequence".to_string());
                        None
                    },
                }
            },
            'u' => {
                let hex = self.take_hex_digits(4);
                match parse_hex_codepoint(&hex).and_then(char::from_u32) {
                    Some(ch) => Some(ch),
                    None => {
                        self.report_error("invalid unicode escape sequence".to_string());
                        None
                    },
                }
            },
            other => {
                self.report_error(format!("unknown escape sequence: \\{}", other));
                None
            },
        }
    }

    fn take_hex_digits(&mut self, count: usize) -> String {
        let mut hex = String::new();
        for _ in 0..count {
            let h = self.cursor.current_char();
            if h.is_ascii_hexdigit() {
                hex.push(h);
                self.cursor.advance();
            } else {
                break;
            }
        }
        hex
    }
}
