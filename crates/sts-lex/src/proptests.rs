//! Property-based round-trip tests for literal lexing.

#[cfg(test)]
mod tests {
    use crate::token::Token;
    use proptest::prelude::*;
    use sts_util::Handler;

    fn lex_one(source: &str) -> Token {
        let handler = Handler::new();
        crate::Lexer::new(source, &handler).next()
    }

    proptest! {
        /// Any non-negative decimal integer, re-printed and re-lexed,
        /// decodes back to the same magnitude.
        #[test]
        fn decimal_integer_round_trips(n in 0u64..=u64::MAX) {
            let source = n.to_string();
            let tok = lex_one(&source);
            prop_assert_eq!(tok, Token::IntegerLit(n));
        }

        /// Any `u32` printed in hex with a `0x` prefix decodes back to
        /// the same magnitude.
        #[test]
        fn hex_integer_round_trips(n in any::<u32>()) {
            let source = format!("0x{n:x}");
            let tok = lex_one(&source);
            prop_assert_eq!(tok, Token::IntegerLit(n as u64));
        }

        /// A string literal built from printable ASCII (excluding the
        /// delimiter and backslash, which would themselves need
        /// escaping) lexes back to exactly the characters it was built
        /// from.
        #[test]
        fn unescaped_ascii_string_round_trips(s in "[\\x20\\x21\\x23-\\x5B\\x5D-\\x7E]{0,32}") {
            let source = format!("\"{s}\"");
            let tok = lex_one(&source);
            prop_assert_eq!(tok, Token::StringLit(sts_util::Symbol::intern(&s)));
        }

        /// `\xHH` escapes decode to the byte the hex digits spell out,
        /// for every byte value.
        #[test]
        fn hex_byte_escape_round_trips(byte in any::<u8>()) {
            let source = format!("\"\\x{byte:02x}\"");
            let tok = lex_one(&source);
            let expected = (byte as char).to_string();
            prop_assert_eq!(tok, Token::StringLit(sts_util::Symbol::intern(&expected)));
        }
    }
}
