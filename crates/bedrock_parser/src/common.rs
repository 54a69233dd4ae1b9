//! Shared constants used across parser submodules, following the
//! small-`common`-module convention: a `COPULAS`-style grouped constant
//! rather than a `matches!` arm repeated at every call site.

use bedrock_token::TokenKind;

/// Tokens the statement-level synchronizer stops at after a parse error.
/// Intentionally the intersection of what different recovery points need,
/// widened in practice by a few per-context tokens (see `Parser::sync`).
pub const STMT_SYNC_SET: &[TokenKind] = &[
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::KwFn,
    TokenKind::KwMt,
    TokenKind::KwDt,
];

pub const VISIBILITY_TOKENS: &[TokenKind] = &[TokenKind::KwPub, TokenKind::KwHid];

pub const TYPE_DECL_TOKENS: &[TokenKind] = &[
    TokenKind::KwStruct,
    TokenKind::KwUnion,
    TokenKind::KwVariant,
    TokenKind::KwContract,
    TokenKind::KwDeftype,
];

pub const FUNCTION_TOKENS: &[TokenKind] = &[TokenKind::KwFn, TokenKind::KwMt, TokenKind::KwDt];
