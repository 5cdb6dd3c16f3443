//! Numeric literal lexing: decimal, hex (`0x`), octal (`0o`), binary
//! (`0b`) integers, and decimal floats with an optional exponent.

use crate::token::Token;
use crate::unicode::is_digit_in_base;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Reads an integer or floating-point literal starting at the cursor.
    pub(crate) fn read_integer_or_float(&mut self) -> Token {
        let start = self.scan_start;

        if self.cursor.current_char() == '0' {
            self.cursor.advance();
            match self.cursor.current_char() {
                'x' | 'X' => {
                    self.cursor.advance();
                    return self.read_radix_integer(16, start);
                },
                'b' | 'B' => {
                    self.cursor.advance();
                    return self.read_radix_integer(2, start);
                },
                'o' | 'O' => {
                    self.cursor.advance();
                    return self.read_radix_integer(8, start);
                },
                _ => {},
            }
        }

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float = (self.cursor.current_char() == '.'
            && self.cursor.peek_char(1).is_ascii_digit())
            || self.cursor.current_char() == 'e'
            || self.cursor.current_char() == 'E';

        if !is_float {
            let text = self.cursor.slice_from(start);
            return match text.parse::<u64>() {
                Ok(value) => Token::IntegerLit(value),
                Err(e) => {
                    self.report_error(format!("integer literal overflow: {}", e));
                    Token::IntegerLit(0)
                },
            };
        }

        if self.cursor.current_char() == '.' {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if self.cursor.current_char() == 'e' || self.cursor.current_char() == 'E' {
            let exp_start = self.cursor.position();
            self.cursor.advance();
            if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
                self.cursor.advance();
            }
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }

            let after_e_pos = exp_start + 1;
            let has_sign = after_e_pos < self.cursor.position()
                && (self.cursor.source()[after_e_pos..].starts_with('+')
                    || self.cursor.source()[after_e_pos..].starts_with('-'));
            let min_expected_pos = if has_sign { exp_start + 2 } else { exp_start + 1 };

            if self.cursor.position() < min_expected_pos {
                self.report_error("no digits in float exponent".to_string());
            }
        }

        let text = self.cursor.slice_from(start);
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Token::FloatLit(value),
            Ok(_) => {
                self.report_error(format!("floating point literal '{}' is not finite", text));
                Token::FloatLit(0.0)
            },
            Err(e) => {
                self.report_error(format!("invalid floating point literal '{}': {}", text, e));
                Token::FloatLit(0.0)
            },
        }
    }

    /// Reads the digits of a `0x`/`0o`/`0b`-prefixed integer. `start` is
    /// the position of the leading `0`.
    fn read_radix_integer(&mut self, base: u32, start: usize) -> Token {
        let digit_start = self.cursor.position();

        loop {
            let c = self.cursor.current_char();
            if c == '_' || is_digit_in_base(c, base) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        if digit_start == self.cursor.position() {
            self.report_error(format!("no digits after base-{} prefix", base));
            return Token::IntegerLit(0);
        }

        let full_text = self.cursor.slice_from(start);
        let digits_text = full_text[2..].replace('_', "");

        match u64::from_str_radix(&digits_text, base) {
            Ok(value) => Token::IntegerLit(value),
            Err(e) => {
                self.report_error(format!("integer literal overflow: {}", e));
                Token::IntegerLit(0)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::Token;
    use sts_util::Handler;

    fn lex(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next()
    }

    #[test]
    fn decimal_integers() {
        assert_eq!(lex("42"), Token::IntegerLit(42));
        assert_eq!(lex("0"), Token::IntegerLit(0));
        assert_eq!(lex("123456"), Token::IntegerLit(123456));
    }

    #[test]
    fn hex_integers() {
        assert_eq!(lex("0xFF"), Token::IntegerLit(0xFF));
        assert_eq!(lex("0xAB_CD"), Token::IntegerLit(0xABCD));
        assert_eq!(lex("0x0"), Token::IntegerLit(0));
    }

    #[test]
    fn binary_integers() {
        assert_eq!(lex("0b1010"), Token::IntegerLit(0b1010));
        assert_eq!(lex("0b1111_0000"), Token::IntegerLit(0b1111_0000));
    }

    #[test]
    fn octal_integers() {
        assert_eq!(lex("0o777"), Token::IntegerLit(0o777));
        assert_eq!(lex("0o0"), Token::IntegerLit(0));
    }

    #[test]
    fn float_literal() {
        assert!(matches!(lex("3.14"), Token::FloatLit(f) if (f - 3.14).abs() < 0.001));
    }

    #[test]
    fn float_with_exponent() {
        assert!(matches!(lex("1e10"), Token::FloatLit(f) if (f - 1e10).abs() < 1.0));
    }

    #[test]
    fn float_with_negative_exponent() {
        assert!(matches!(lex("2.5e-3"), Token::FloatLit(f) if (f - 2.5e-3).abs() < 0.0001));
    }

    #[test]
    fn zero_followed_by_dot_is_still_a_float() {
        assert!(matches!(lex("0.5"), Token::FloatLit(f) if (f - 0.5).abs() < 0.0001));
    }
}
