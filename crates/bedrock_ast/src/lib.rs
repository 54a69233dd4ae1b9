//! # bedrock-ast
//!
//! Arena-allocated abstract syntax tree nodes: statements, expressions, and
//! type expressions, plus [`AstContext`] which bundles one arena per node
//! family and a handful of builder methods.
//!
//! The AST is a transient, single-compilation-unit structure: node
//! children are ordinary Rust references sharing one arena lifetime. Once a
//! file's top-level declarations are registered into the HIR (see
//! `bedrock_hir`), cross-file references switch to ids, never pointers.

pub mod context;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use bedrock_base::Arena;
pub use context::AstContext;
pub use expr::Expr;
pub use stmt::{Param, Stmt, TypeDeclKind, Visibility};
pub use ty::Ty;
