//! sts-par - recursive-descent parser for the disciplined source-language
//! subset described by `sts-lex`'s token set.
//!
//! The crate exposes three entry points: [`Parser::parse_file`] feeds
//! one compilation unit in, [`Parser::next_file`]
//! drains module-dependency paths discovered along the way, and
//! [`Parser::finish`] hands back the accumulated [`Program`]. Everything in
//! between — tokenizing, building the AST, and recording diagnostics — is an
//! implementation detail the host never touches directly.
//!
//! ```
//! use sts_par::Parser;
//!
//! let mut parser = Parser::new();
//! parser.parse_file("const x: i32 = 1;", "main.ts", true).unwrap();
//! assert_eq!(parser.next_file(), None);
//! let program = parser.finish();
//! assert_eq!(program.sources.len(), 1);
//! ```

pub mod ast;
mod expr;
mod items;
mod stmt;
mod types;

#[cfg(test)]
mod edge_cases;

pub use ast::*;

use std::collections::{HashSet, VecDeque};

use sts_lex::{Lexer, Token};
use sts_util::diagnostic::{DiagnosticCode, Handler, Level};
use sts_util::span::FileId;
use sts_util::Span;
use thiserror::Error;

/// One parsed compilation unit.
#[derive(Debug)]
pub struct Source {
    /// The path exactly as given to [`Parser::parse_file`].
    pub original_path: String,
    /// Slash-canonicalized, `.`/`..`-resolved, extension-stripped path.
    /// Unique across a [`Program`].
    pub normalized_path: String,
    pub text: String,
    pub is_entry: bool,
    pub statements: Vec<TopLevelStmt>,
}

/// The root aggregate: every [`Source`] parsed so far plus the shared
/// diagnostic store. Owned exclusively by the [`Parser`] until
/// [`Parser::finish`] hands it to the caller.
pub struct Program {
    pub sources: Vec<Source>,
    pub handler: Handler,
}

impl Program {
    fn new() -> Self {
        Self {
            sources: Vec::new(),
            handler: Handler::new(),
        }
    }
}

/// Tunable knobs threaded through [`Parser::new`]/[`Parser::with_config`]:
/// the ambient configuration layer a production front end always
/// carries (bounding pathological input, and letting an embedder
/// recognize additional source-file extensions when resolving imports).
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Recursion ceiling for expression/type parsing, guarding against
    /// stack overflow on deeply nested or adversarial input.
    pub max_expr_depth: usize,
    /// Extensions elided from a path during normalization, tried in
    /// order. The source language's own extension is always included.
    pub extensions: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_expr_depth: 256,
            extensions: vec![".ts".to_string()],
        }
    }
}

/// The single hard-failure path out of the parser: every other error is
/// a recoverable diagnostic recorded in the `Handler`.
#[derive(Debug, Error)]
pub enum ParserError {
    /// `parseFile` was called with a path that normalizes to one
    /// already present in the `Program`.
    #[error("duplicate source: '{0}' has already been parsed")]
    DuplicateSource(String),
}

/// The recursive-descent parser driving tokenizer, AST factory, and
/// work-list together.
pub struct Parser {
    program: Program,
    /// FIFO of normalized module paths pending host retrieval via
    /// `next_file`.
    backlog: VecDeque<String>,
    /// Every path ever enqueued or parsed; `backlog ⊆ seenlog` always.
    seenlog: HashSet<String>,
    config: ParserConfig,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            program: Program::new(),
            backlog: VecDeque::new(),
            seenlog: HashSet::new(),
            config,
        }
    }

    /// A handle to the shared diagnostic store.
    pub fn diagnostics(&self) -> &Handler {
        &self.program.handler
    }

    /// Parses one compilation unit, appending its `Source` to the
    /// `Program` and enqueueing any module paths it imports/re-exports.
    ///
    /// Fails hard iff `normalize_path(path)` collides with a source
    /// already parsed; every other failure surfaces as a diagnostic and
    /// the file's top-level loop simply stops early (already-parsed
    /// siblings are retained).
    pub fn parse_file(&mut self, text: &str, path: &str, is_entry: bool) -> Result<(), ParserError> {
        let normalized_path = normalize_path(path, &self.config.extensions);
        if self.program.sources.iter().any(|s| s.normalized_path == normalized_path) {
            return Err(ParserError::DuplicateSource(normalized_path));
        }
        self.seenlog.insert(normalized_path.clone());

        let source_id = SourceId(self.program.sources.len());
        let file_id = FileId::new(source_id.0);
        let lexer = Lexer::with_file(text, &self.program.handler, file_id);

        log::trace!("parsing source '{normalized_path}' (entry={is_entry})");

        let mut fp = FileParser {
            lexer,
            handler: &self.program.handler,
            source_id,
            normalized_path: &normalized_path,
            config: &self.config,
            backlog: &mut self.backlog,
            seenlog: &mut self.seenlog,
            decorators: Vec::new(),
            modifier_pool: None,
        };
        let statements = fp.parse_top_level();

        self.program.sources.push(Source {
            original_path: path.to_string(),
            normalized_path,
            text: text.to_string(),
            is_entry,
            statements,
        });
        Ok(())
    }

    /// Dequeues the next discovered dependency path, or `None` if the
    /// backlog is empty. Never returns the same path twice over the
    /// parser's lifetime (it was already added to `seenlog` when
    /// enqueued).
    pub fn next_file(&mut self) -> Option<String> {
        let path = self.backlog.pop_front();
        if let Some(p) = &path {
            log::trace!("dequeued work-list entry '{p}'");
        }
        path
    }

    /// Returns the accumulated `Program`.
    ///
    /// # Panics
    /// Panics if the backlog is not empty — the host is expected to
    /// drain `next_file` before finishing.
    pub fn finish(self) -> Program {
        assert!(
            self.backlog.is_empty(),
            "Parser::finish: backlog is not empty ({} pending paths)",
            self.backlog.len()
        );
        self.program
    }
}

/// `/`-canonicalizes `raw`, collapses `./`/`../` segments, and strips a
/// recognized source-file extension. Case is preserved.
pub fn normalize_path(raw: &str, extensions: &[String]) -> String {
    let slashed = raw.replace('\\', "/");
    let mut stripped = slashed.as_str();
    for ext in extensions {
        if let Some(rest) = stripped.strip_suffix(ext.as_str()) {
            stripped = rest;
            break;
        }
    }
    collapse_path(stripped)
}

/// Resolves `raw_import` (as written in an `import`/`export … from`
/// directive) against the normalized path of the importing source.
pub fn resolve_module_path(importer_normalized: &str, raw_import: &str, extensions: &[String]) -> String {
    if raw_import.starts_with("./") || raw_import.starts_with("../") {
        let dir = match importer_normalized.rfind('/') {
            Some(idx) => &importer_normalized[..idx],
            None => "",
        };
        let combined = if dir.is_empty() {
            raw_import.to_string()
        } else {
            format!("{dir}/{raw_import}")
        };
        normalize_path(&combined, extensions)
    } else {
        normalize_path(raw_import, extensions)
    }
}

fn collapse_path(path: &str) -> String {
    let is_absolute = path.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => match stack.last() {
                Some(&top) if top != ".." => {
                    stack.pop();
                }
                _ if !is_absolute => stack.push(".."),
                _ => {}
            },
            s => stack.push(s),
        }
    }
    let joined = stack.join("/");
    if is_absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

// ============================================================================
// Per-file parsing state
// ============================================================================

/// The state threaded through one `parseFile` call: the tokenizer, the
/// shared diagnostic store, and the work-list. Expression, statement,
/// declaration, and type parsing are each implemented as `impl`  blocks
/// on this type, split across `expr.rs`/`stmt.rs`/`items.rs`/`types.rs`
/// the way the source's own grammar sections are split.
pub(crate) struct FileParser<'a> {
    pub(crate) lexer: Lexer<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) source_id: SourceId,
    pub(crate) normalized_path: &'a str,
    pub(crate) config: &'a ParserConfig,
    pub(crate) backlog: &'a mut VecDeque<String>,
    pub(crate) seenlog: &'a mut HashSet<String>,
    /// Decorators accumulated ahead of a declaration, cleared once
    /// attached (or reported unattached at end of top-level loop).
    pub(crate) decorators: Vec<Decorator>,
    /// The reusable modifier-list slot. A pure amortized-allocation
    /// optimization; correctness never depends on it actually being
    /// reused.
    pub(crate) modifier_pool: Option<Vec<Modifier>>,
}

impl<'a> FileParser<'a> {
    pub(crate) fn take_modifier_buf(&mut self) -> Vec<Modifier> {
        self.modifier_pool.take().unwrap_or_default()
    }

    pub(crate) fn recycle_modifier_buf(&mut self, mut buf: Vec<Modifier>) {
        buf.clear();
        self.modifier_pool = Some(buf);
    }

    pub(crate) fn peek(&mut self) -> Token {
        self.lexer.peek()
    }

    pub(crate) fn bump(&mut self) -> Token {
        self.lexer.next()
    }

    /// Advances past the peeked token iff it equals `expected`.
    pub(crate) fn eat(&mut self, expected: &Token) -> bool {
        self.lexer.skip(expected)
    }

    pub(crate) fn at(&mut self, token: &Token) -> bool {
        self.peek() == *token
    }

    pub(crate) fn span(&self) -> Span {
        self.lexer.range()
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.span())
    }

    /// Consumes the peeked token if it equals `expected`; otherwise
    /// emits `code`/`message` at the current position and leaves the
    /// cursor untouched (recoverable).
    pub(crate) fn expect(&mut self, expected: &Token, code: DiagnosticCode) -> bool {
        if self.eat(expected) {
            true
        } else {
            let found = self.peek();
            self.error(code, self.span(), format!("'{}' expected", expected_text(expected, &found)));
            false
        }
    }

    /// Consumes a trailing `;` if present; the source language's
    /// automatic-semicolon-insertion means a missing one is never an
    /// error as long as the next token starts a new statement or the
    /// line ends.
    pub(crate) fn eat_semicolon(&mut self) {
        self.eat(&Token::Semicolon);
    }

    pub(crate) fn error(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        self.handler.error(code, span, message);
    }

    pub(crate) fn warning(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        self.handler.warning(code, span, message);
    }

    pub(crate) fn info(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        self.handler.info(code, span, message);
    }

    pub(crate) fn has_errors(&self) -> bool {
        self.handler.error_count() > 0
    }
}

fn expected_text(expected: &Token, found: &Token) -> String {
    format!("{}' expected but got '{}", expected.describe(), found.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_extension_and_dots() {
        let exts = vec![".ts".to_string()];
        assert_eq!(normalize_path("./a/b/../c.ts", &exts), "a/c");
        assert_eq!(normalize_path("a/./b.ts", &exts), "a/b");
        assert_eq!(normalize_path("/abs/path.ts", &exts), "/abs/path");
    }

    #[test]
    fn resolve_relative_import_against_importer_directory() {
        let exts = vec![".ts".to_string()];
        assert_eq!(resolve_module_path("src/foo/bar", "./other", &exts), "src/foo/other");
        assert_eq!(resolve_module_path("src/foo/bar", "../sibling", &exts), "src/sibling");
    }

    #[test]
    fn next_file_drains_backlog_in_fifo_order() {
        let mut parser = Parser::new();
        parser
            .parse_file(
                "export { a } from \"./one\"; export { b } from \"./two\";",
                "entry.ts",
                true,
            )
            .unwrap();
        assert_eq!(parser.next_file(), Some("one".to_string()));
        assert_eq!(parser.next_file(), Some("two".to_string()));
        assert_eq!(parser.next_file(), None);
    }

    #[test]
    fn duplicate_parse_file_is_a_hard_error() {
        let mut parser = Parser::new();
        parser.parse_file("const x = 1;", "a.ts", true).unwrap();
        let err = parser.parse_file("const y = 2;", "a.ts", false).unwrap_err();
        assert!(matches!(err, ParserError::DuplicateSource(_)));
    }

    #[test]
    #[should_panic(expected = "backlog is not empty")]
    fn finish_with_nonempty_backlog_panics() {
        let mut parser = Parser::new();
        parser.parse_file("export { a } from \"./one\";", "entry.ts", true).unwrap();
        let _ = parser.finish();
    }

    #[test]
    fn finish_after_draining_backlog_succeeds() {
        let mut parser = Parser::new();
        parser.parse_file("const x: i32 = 1;", "entry.ts", true).unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        assert_eq!(program.sources.len(), 1);
    }
}
