//! # bedrock-parser
//!
//! Recursive-descent statement/type parsing plus a Pratt expression parser,
//! built on top of [`bedrock_token`]'s fixed precedence tables and
//! [`bedrock_ast`]'s arena-backed node types.
//!
//! The entry point is [`parse_file`], which lexes and parses one source
//! file into a [`bedrock_ast::Stmt::File`] root plus whatever diagnostics
//! accumulated along the way. Callers that already have tokens (tests,
//! incremental re-parses of a buffer) can drive [`Parser`] directly.

mod common;
mod expr;
mod parser;
mod stmt;
mod ty;

pub use parser::{Parser, ParserMode};

use bedrock_ast::{AstContext, Stmt};
use bedrock_base::{FileId, Interner, Span};
use bedrock_token::{DiagnosticList, Token, TokenKind};

/// Lexes `source` and parses it as a complete file, returning the root
/// [`Stmt::File`] node and the diagnostics collected during parsing.
///
/// `name` is interned and stamped on the root node so downstream error
/// reporting can recover the file's display path without threading it
/// through every node.
pub fn parse_file<'ast>(
    source: &[u8],
    file: FileId,
    path: &str,
    interner: &mut Interner,
    ctx: &'ast AstContext<'ast>,
) -> (&'ast Stmt<'ast>, DiagnosticList) {
    let tokens = bedrock_lexer::lex(source, interner);
    let name_symbol = interner.intern(path);
    let name = Token::new(TokenKind::StringLiteral, name_symbol, Span::new(0, 0), 1, 1);
    let mut parser = Parser::new(&tokens, file, ctx);
    let root = parser.parse_file(name);
    (root, parser.diagnostics)
}
