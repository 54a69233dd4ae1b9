//! # bedrock-base
//!
//! Pure structural atoms shared by every stage of the bedrock compiler
//! front end: arena allocation, string interning, byte spans, and the
//! per-file source buffers that spans are measured against.
//!
//! This crate has no knowledge of the language's grammar or semantics. It
//! exists so that the lexer, parser, and HIR layers share one definition of
//! "span," one interner, and one arena type instead of each rolling their
//! own.
//!
//! ## Design Principles
//!
//! - No I/O: callers read files and hand this crate the bytes.
//! - No panics on the happy path: only [`Interner::resolve`] and
//!   [`source::SourceSet::get`] assume a valid id, matching the append-only,
//!   never-invalidated contract those ids carry elsewhere in the pipeline.
//!
//! ```rust
//! use bedrock_base::{Interner, Span};
//!
//! let mut interner = Interner::new();
//! let sym = interner.intern("hello");
//! assert_eq!(interner.resolve(sym), "hello");
//! assert_eq!(Span::new(0, 5).len(), 5);
//! ```

pub mod arena;
pub mod error;
pub mod intern;
pub mod source;
pub mod span;

pub use arena::Arena;
pub use error::{Result, SpannedError};
pub use intern::{Interner, Symbol, SymbolEq};
pub use source::{FileId, SourceFile, SourceSet};
pub use span::Span;
