//! Core lexer state machine: buffering, checkpointing, and dispatch.

use sts_util::diagnostic::{Handler, Level};
use sts_util::span::FileId;
use sts_util::Span;

use crate::cursor::{Cursor, CursorSnapshot};
use crate::token::Token;

/// A token the lexer has scanned but not yet handed to the caller via
/// [`Lexer::next`], plus the position/line-break bookkeeping `peek`
/// needs to answer without re-scanning.
#[derive(Clone)]
struct Pending {
    token: Token,
    start: usize,
    end: usize,
    start_line: u32,
    start_column: u32,
    newline_before: bool,
}

/// Saved lexer state for a single speculative-parse checkpoint.
///
/// Only one checkpoint is ever live at a time; a second `mark()` before
/// `reset()` simply overwrites the first.
#[derive(Clone)]
struct Checkpoint {
    cursor: CursorSnapshot,
    token: Token,
    token_pos: usize,
    token_end: usize,
    token_start_line: u32,
    token_start_column: u32,
    pending: Option<Pending>,
}

/// Streaming tokenizer over a single source buffer.
///
/// `Lexer` buffers at most one token of lookahead (`peek`) and one saved
/// checkpoint (`mark`/`reset`); it performs no I/O and borrows its
/// [`Handler`] rather than owning it, so multiple lexers in a `Program`
/// (one per `Source`) can all report into the same diagnostic store.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    file_id: FileId,

    /// The most recently consumed token (set by `next`).
    token: Token,
    /// Starting byte offset of `token`.
    token_pos: usize,
    /// Ending byte offset of `token`.
    token_end: usize,
    token_start_line: u32,
    token_start_column: u32,

    pending: Option<Pending>,
    checkpoint: Option<Checkpoint>,

    /// Start position of the token currently being scanned; used so that
    /// diagnostics raised mid-scan (e.g. "unterminated string") point at
    /// the literal being read rather than the previously consumed token,
    /// and so literal readers know where their token began.
    pub(crate) scan_start: usize,
    scan_start_line: u32,
    scan_start_column: u32,

    pub(crate) bom_checked: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`, reporting into `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self::with_file(source, handler, FileId::DUMMY)
    }

    /// Creates a lexer that stamps every [`Span`] it produces with `file_id`.
    pub fn with_file(source: &'a str, handler: &'a Handler, file_id: FileId) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file_id,
            token: Token::Eof,
            token_pos: 0,
            token_end: 0,
            token_start_line: 1,
            token_start_column: 1,
            pending: None,
            checkpoint: None,
            scan_start: 0,
            scan_start_line: 1,
            scan_start_column: 1,
            bom_checked: false,
        }
    }

    /// The most recently consumed token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Starting byte offset of the most recently consumed token.
    pub fn token_pos(&self) -> usize {
        self.token_pos
    }

    /// The tokenizer's current scanning cursor (byte offset).
    pub fn pos(&self) -> usize {
        self.cursor.position()
    }

    /// Whether a line break separates the current cursor from the next
    /// (possibly not-yet-buffered) token.
    pub fn next_token_on_new_line(&mut self) -> bool {
        self.ensure_pending();
        self.pending.as_ref().unwrap().newline_before
    }

    /// Returns the next token without consuming it.
    ///
    /// `skip_newline_before` is accepted for contract symmetry with
    /// [`Lexer::next`]; peeking never advances `token`/`token_pos`
    /// regardless of its value.
    pub fn peek(&mut self) -> Token {
        self.ensure_pending();
        self.pending.as_ref().unwrap().token.clone()
    }

    /// Advances past and returns the next token.
    pub fn next(&mut self) -> Token {
        self.ensure_pending();
        let pending = self.pending.take().expect("ensure_pending populates pending");
        self.token = pending.token.clone();
        self.token_pos = pending.start;
        self.token_end = pending.end;
        self.token_start_line = pending.start_line;
        self.token_start_column = pending.start_column;
        pending.token
    }

    /// Advances iff the peeked token equals `expected`, returning whether
    /// it did.
    pub fn skip(&mut self, expected: &Token) -> bool {
        if self.peek() == *expected {
            self.next();
            true
        } else {
            false
        }
    }

    /// Saves a single checkpoint of lexer state for a speculative parse.
    ///
    /// Overwrites any previously saved checkpoint; only one is supported.
    pub fn mark(&mut self) {
        self.ensure_pending();
        log::trace!("lexer checkpoint saved at byte {}", self.cursor.position());
        self.checkpoint = Some(Checkpoint {
            cursor: self.cursor.snapshot(),
            token: self.token.clone(),
            token_pos: self.token_pos,
            token_end: self.token_end,
            token_start_line: self.token_start_line,
            token_start_column: self.token_start_column,
            pending: self.pending.clone(),
        });
    }

    /// Restores the lexer to the state saved by the last `mark()`.
    ///
    /// # Panics
    /// Panics if called without a preceding `mark()` — a programmer error.
    pub fn reset(&mut self) {
        let cp = self.checkpoint.take().expect("reset() called without mark()");
        log::trace!("lexer checkpoint rolled back to byte {}", cp.token_pos);
        self.cursor.restore(cp.cursor);
        self.token = cp.token;
        self.token_pos = cp.token_pos;
        self.token_end = cp.token_end;
        self.token_start_line = cp.token_start_line;
        self.token_start_column = cp.token_start_column;
        self.pending = cp.pending;
    }

    /// The range of the most recently consumed token.
    pub fn range(&self) -> Span {
        Span::with_file(
            self.token_pos,
            self.token_end,
            self.file_id,
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// The range `[start_pos, end_pos)`, both explicit byte offsets.
    /// Line/column are taken from the current token's start, matching the
    /// precision the parser actually needs them for (diagnostic display).
    pub fn range_between(&self, start_pos: usize, end_pos: usize) -> Span {
        Span::with_file(
            start_pos,
            end_pos,
            self.file_id,
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Re-scans the most recently consumed `/` or `/=` token as a regexp
    /// literal instead. Only valid to call immediately after `next()`
    /// returned `Token::Slash` or `Token::SlashEq`; used by the parser when
    /// grammar position makes a regexp the only legal reading.
    pub fn rescan_slash_as_regexp(&mut self) -> Token {
        debug_assert!(matches!(self.token, Token::Slash | Token::SlashEq));
        self.cursor.restore(CursorSnapshot {
            position: self.token_pos,
            line: self.token_start_line,
            column: self.token_start_column,
        });
        self.pending = None;
        let tok = self.read_regexp();
        self.token = tok.clone();
        self.token_end = self.cursor.position();
        tok
    }

    fn ensure_pending(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let newline_before = self.skip_trivia();
        let start = self.cursor.position();
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();
        self.scan_start = start;
        self.scan_start_line = start_line;
        self.scan_start_column = start_column;
        let token = self.scan_token();
        let end = self.cursor.position();
        self.pending = Some(Pending {
            token,
            start,
            end,
            start_line,
            start_column,
            newline_before,
        });
    }

    fn scan_token(&mut self) -> Token {
        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::Semicolon),
            '@' => self.single(Token::At),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '^' => self.lex_caret(),
            '~' => self.single(Token::Tilde),
            ':' => self.single(Token::Colon),
            '.' => self.lex_dot(),
            '?' => self.single(Token::Question),
            '"' | '\'' => self.read_string(),
            c if crate::unicode::is_ascii_ident_start(c) => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_integer_or_float(),
            c => {
                self.cursor.advance();
                self.report_error(format!("unexpected character '{}'", c));
                Token::Invalid(c.to_string())
            },
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.cursor.advance();
        token
    }

    pub(crate) fn report_error(&self, message: String) {
        self.report(Level::Error, message);
    }

    pub(crate) fn report_warning(&self, message: String) {
        self.report(Level::Warning, message);
    }

    fn report(&self, level: Level, message: String) {
        use sts_util::diagnostic::DiagnosticBuilder;
        let span = Span::with_file(
            self.scan_start,
            self.cursor.position(),
            self.file_id,
            self.scan_start_line,
            self.scan_start_column,
        );
        let builder = match level {
            Level::Error => DiagnosticBuilder::error(message),
            _ => DiagnosticBuilder::warning(message),
        };
        builder.span(span).emit(self.handler);
    }
}
