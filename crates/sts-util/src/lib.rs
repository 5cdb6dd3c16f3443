//! Shared foundation types for the front end: diagnostics, source spans,
//! string interning, and the typed-index/index-vector helpers built on
//! top of them.
//!
//! Nothing in this crate is specific to the source language's grammar —
//! it is the ambient stack every phase of a front end needs, split out
//! so `sts-lex` and `sts-par` can each depend on exactly this and
//! nothing else.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use error::{
    DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SourceMapError,
    SourceMapResult, SymbolError, SymbolResult,
};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
