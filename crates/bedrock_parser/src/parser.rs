//! The parser's cursor, primitive token operations, and error recovery.

use crate::common::STMT_SYNC_SET;
use bedrock_ast::AstContext;
use bedrock_base::{FileId, Span, Symbol};
use bedrock_token::{Diagnostic, DiagnosticCode, DiagnosticList, Token, TokenKind};

/// Disambiguates `<`/`>` as comparison operators (`Normal`) versus generic
/// argument-list brackets (`BanLessThanAndGreaterThan`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserMode {
    Normal,
    BanLessThanAndGreaterThan,
}

pub struct Parser<'t, 'ast> {
    pub(crate) tokens: &'t [Token],
    pub(crate) pos: usize,
    pub(crate) file: FileId,
    pub(crate) mode: ParserMode,
    /// The most recently discarded token during synchronization, eligible
    /// to be "rescued" by exactly one subsequent `match_kind` call.
    pub(crate) discarded: Option<Token>,
    pub(crate) loop_depth: u32,
    pub ctx: &'ast AstContext<'ast>,
    pub diagnostics: DiagnosticList,
    /// Set when an `expect` failure could not safely resynchronize within
    /// the current file (e.g. expected `)`, found EOF); callers check this
    /// to stop attempting further top-level statements.
    pub(crate) eof_recovery_failed: bool,
}

impl<'t, 'ast> Parser<'t, 'ast> {
    pub fn new(tokens: &'t [Token], file: FileId, ctx: &'ast AstContext<'ast>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            mode: ParserMode::Normal,
            discarded: None,
            loop_depth: 0,
            ctx,
            diagnostics: DiagnosticList::new(),
            eof_recovery_failed: false,
        }
    }

    pub fn peek(&self) -> Token {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[idx]
    }

    pub fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn eat(&mut self) -> Token {
        let tok = self.peek();
        if !self.at_eof() {
            self.pos += 1;
        }
        tok
    }

    /// Consumes and returns the current token if it matches `kind`. Also
    /// rescues a single previously discarded token of the right kind, so a
    /// synchronizer that over-consumed can still satisfy an immediately
    /// following expectation.
    pub fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().kind == kind {
            return Some(self.eat());
        }
        if let Some(tok) = self.discarded {
            if tok.kind == kind {
                self.discarded = None;
                return Some(tok);
            }
        }
        None
    }

    /// Consumes a token of `kind`, or emits an `expected-token` diagnostic
    /// and returns a zero-length synthetic token of that kind at the
    /// current position so callers can keep building a well-shaped AST.
    pub fn expect(&mut self, kind: TokenKind) -> Token {
        if let Some(tok) = self.match_kind(kind) {
            return tok;
        }
        let at = self.peek();
        self.diagnostics.push(
            Diagnostic::new(self.file, at.span, DiagnosticCode::ExpectedToken).expecting(kind),
        );
        if at.kind == TokenKind::Eof {
            self.eof_recovery_failed = true;
        }
        Token::new(kind, Symbol::EMPTY, Span::new(at.span.start, at.span.start), at.line, at.column)
    }

    pub fn push_diagnostic(&mut self, code: DiagnosticCode, span: Span) {
        self.diagnostics.push(Diagnostic::new(self.file, span, code));
    }

    /// Discards tokens until one in `set` (or end-of-file) is reached,
    /// tracking the last discarded token as the rescue candidate.
    pub fn sync(&mut self, set: &[TokenKind]) {
        while !self.at_eof() && !set.contains(&self.peek().kind) {
            self.discarded = Some(self.eat());
        }
    }

    pub fn sync_default(&mut self) {
        self.sync(STMT_SYNC_SET);
    }

    pub fn enter_ban_lt_gt(&mut self) -> ParserMode {
        std::mem::replace(&mut self.mode, ParserMode::BanLessThanAndGreaterThan)
    }

    pub fn restore_mode(&mut self, mode: ParserMode) {
        self.mode = mode;
    }

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        self.loop_depth -= 1;
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_ast::{Arena, Expr, Param, Stmt, Ty};
    use bedrock_base::Interner;

    fn make_tokens(src: &str, interner: &mut Interner) -> Vec<Token> {
        bedrock_lexer::lex(src.as_bytes(), interner)
    }

    #[test]
    fn expect_success_consumes_token() {
        let mut interner = Interner::new();
        let tokens = make_tokens("(", &mut interner);
        let exprs: Arena<Expr> = Arena::new();
        let stmts: Arena<Stmt> = Arena::new();
        let types: Arena<Ty> = Arena::new();
        let params: Arena<Param> = Arena::new();
        let tok_arena: Arena<Token> = Arena::new();
        let ctx = AstContext::new(&exprs, &stmts, &types, &params, &tok_arena);
        let mut parser = Parser::new(&tokens, FileId(1), &ctx);
        let tok = parser.expect(TokenKind::LParen);
        assert_eq!(tok.kind, TokenKind::LParen);
        assert!(parser.diagnostics.is_empty());
    }

    #[test]
    fn expect_failure_emits_diagnostic_and_synthesizes_token() {
        let mut interner = Interner::new();
        let tokens = make_tokens("{", &mut interner);
        let exprs: Arena<Expr> = Arena::new();
        let stmts: Arena<Stmt> = Arena::new();
        let types: Arena<Ty> = Arena::new();
        let params: Arena<Param> = Arena::new();
        let tok_arena: Arena<Token> = Arena::new();
        let ctx = AstContext::new(&exprs, &stmts, &types, &params, &tok_arena);
        let mut parser = Parser::new(&tokens, FileId(1), &ctx);
        let tok = parser.expect(TokenKind::RParen);
        assert_eq!(tok.kind, TokenKind::RParen);
        assert_eq!(parser.diagnostics.len(), 1);
    }

    #[test]
    fn sync_stops_at_sync_set_member() {
        let mut interner = Interner::new();
        let tokens = make_tokens("garbage garbage ;", &mut interner);
        let exprs: Arena<Expr> = Arena::new();
        let stmts: Arena<Stmt> = Arena::new();
        let types: Arena<Ty> = Arena::new();
        let params: Arena<Param> = Arena::new();
        let tok_arena: Arena<Token> = Arena::new();
        let ctx = AstContext::new(&exprs, &stmts, &types, &params, &tok_arena);
        let mut parser = Parser::new(&tokens, FileId(1), &ctx);
        parser.sync_default();
        assert!(parser.check(TokenKind::Semicolon));
        assert!(parser.discarded.is_some());
    }
}
