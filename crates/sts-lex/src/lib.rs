//! Tokenizer for the disciplined source-language subset.
//!
//! `sts-lex` turns UTF-8 source text into a stream of [`Token`]s. It is a
//! streaming lexer: callers drive it with [`Lexer::next`] /
//! [`Lexer::peek`] rather than collecting a `Vec<Token>` up front, which
//! is what lets [`sts_par`](../sts_par/index.html)'s parser perform
//! context-sensitive lookahead (e.g. disambiguating `a < b` from a
//! type-argument list) without re-lexing.
//!
//! The lexer exposes exactly one saved checkpoint ([`Lexer::mark`] /
//! [`Lexer::reset`]) for the parser's speculative parses; nesting
//! checkpoints is not supported, matching the grammar's single-slot
//! backtracking needs.

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod unicode;

#[cfg(test)]
mod edge_cases;
#[cfg(test)]
mod proptests;

pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token};
