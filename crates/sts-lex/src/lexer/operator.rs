//! Operator and punctuator lexing.
//!
//! Comments are skipped as trivia before any of these run (see
//! `comment.rs`), so `/` here only ever resolves to division or a
//! compound assignment; regexp literals are produced separately by
//! [`Lexer::rescan_slash_as_regexp`].

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `+`, `++`, `+=`
    pub(crate) fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('+') {
            Token::PlusPlus
        } else if self.cursor.match_char('=') {
            Token::PlusEq
        } else {
            Token::Plus
        }
    }

    /// `-`, `--`, `-=`
    pub(crate) fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('-') {
            Token::MinusMinus
        } else if self.cursor.match_char('=') {
            Token::MinusEq
        } else {
            Token::Minus
        }
    }

    /// `*`, `**`, `*=`, `**=`
    pub(crate) fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            if self.cursor.match_char('=') {
                Token::StarStarEq
            } else {
                Token::StarStar
            }
        } else if self.cursor.match_char('=') {
            Token::StarEq
        } else {
            Token::Star
        }
    }

    /// `/`, `/=`
    pub(crate) fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::SlashEq
        } else {
            Token::Slash
        }
    }

    /// `%`, `%=`
    pub(crate) fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::PercentEq
        } else {
            Token::Percent
        }
    }

    /// `=`, `==`, `===`
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                Token::EqEqEq
            } else {
                Token::EqEq
            }
        } else {
            Token::Eq
        }
    }

    /// `!`, `!=`, `!==`
    pub(crate) fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                Token::NotEqEq
            } else {
                Token::NotEq
            }
        } else {
            Token::Bang
        }
    }

    /// `<`, `<=`, `<<`, `<<=`
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::LtEq
        } else if self.cursor.match_char('<') {
            if self.cursor.match_char('=') {
                Token::ShlEq
            } else {
                Token::Shl
            }
        } else {
            Token::Lt
        }
    }

    /// `>`, `>=`, `>>`, `>>=`
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::GtEq
        } else if self.cursor.match_char('>') {
            if self.cursor.match_char('=') {
                Token::ShrEq
            } else {
                Token::Shr
            }
        } else {
            Token::Gt
        }
    }

    /// `&`, `&&`, `&=`
    pub(crate) fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            Token::AmpAmp
        } else if self.cursor.match_char('=') {
            Token::AmpEq
        } else {
            Token::Amp
        }
    }

    /// `|`, `||`, `|=`
    pub(crate) fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            Token::PipePipe
        } else if self.cursor.match_char('=') {
            Token::PipeEq
        } else {
            Token::Pipe
        }
    }

    /// `^`, `^=`
    pub(crate) fn lex_caret(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::CaretEq
        } else {
            Token::Caret
        }
    }

    /// `.`, `...`
    pub(crate) fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1) == '.' {
            self.cursor.advance();
            self.cursor.advance();
            Token::DotDotDot
        } else {
            Token::Dot
        }
    }
}
