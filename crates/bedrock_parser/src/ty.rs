//! Type-expression parsing.

use crate::parser::{Parser, ParserMode};
use bedrock_ast::Ty;
use bedrock_token::{DiagnosticCode, TokenKind, BUILTIN_TYPE_KEYWORDS};

impl<'t, 'ast> Parser<'t, 'ast> {
    /// Parses a type: optional leading `mut`, a base (builtin keyword or
    /// identifier path), then any number of trailing modifiers (`mut`,
    /// `&`/`*`, `[]`, `[N]`, generic arguments).
    pub fn parse_type(&mut self) -> &'ast Ty<'ast> {
        let leading_mut = self.match_kind(TokenKind::KwMut);

        let mut base = self.parse_base_type();

        if let Some(mut_tok) = self.match_kind(TokenKind::KwMut) {
            if leading_mut.is_some() {
                self.push_diagnostic(DiagnosticCode::RedundantMut, mut_tok.span);
            }
            base = self.rebase_mutable(base, mut_tok);
        } else if let Some(mut_tok) = leading_mut {
            base = self.rebase_mutable(base, mut_tok);
        }

        loop {
            match self.peek().kind {
                TokenKind::GenericSep | TokenKind::Lt => {
                    base = self.parse_generic_args(base);
                }
                TokenKind::Amp | TokenKind::Star => {
                    let sigil = self.eat();
                    let mutable = self.match_kind(TokenKind::KwMut).is_some();
                    base = self.ctx.alloc_ty(Ty::Ref { sigil, mutable, inner: base });
                }
                TokenKind::LBracket => {
                    base = self.parse_bracket_suffix(base);
                }
                _ => break,
            }
        }

        base
    }

    fn rebase_mutable(&self, ty: &'ast Ty<'ast>, _mut_tok: bedrock_token::Token) -> &'ast Ty<'ast> {
        match ty {
            Ty::Base { path, last, .. } => self.ctx.alloc_ty(Ty::Base { path, mutable: true, last: *last }),
            other => self.ctx.alloc_ty(*other),
        }
    }

    fn parse_base_type(&mut self) -> &'ast Ty<'ast> {
        let tok = self.peek();
        if BUILTIN_TYPE_KEYWORDS.contains(&tok.kind) {
            self.eat();
            let path = self.ctx.alloc_tokens(vec![tok]);
            return self.ctx.alloc_ty(Ty::Base { path, mutable: false, last: tok });
        }
        if tok.kind == TokenKind::Identifier || tok.kind == TokenKind::KwSelfType {
            let mut segments = vec![self.eat()];
            while self.check(TokenKind::DotDot) && self.peek_at(1).kind == TokenKind::Identifier {
                self.eat();
                segments.push(self.eat());
            }
            let last = *segments.last().unwrap();
            let path = self.ctx.alloc_tokens(segments);
            return self.ctx.alloc_ty(Ty::Base { path, mutable: false, last });
        }
        self.push_diagnostic(DiagnosticCode::ExpectedType, tok.span);
        self.sync_default();
        let last = self.discarded.unwrap_or(tok);
        self.ctx.alloc_ty(Ty::Invalid { first: tok, last })
    }

    fn parse_generic_args(&mut self, inner: &'ast Ty<'ast>) -> &'ast Ty<'ast> {
        // `::<...>` or a bare `<...>`; either opener puts the parser in
        // angle-bracket mode so `<`/`>` stop acting as comparisons.
        if self.check(TokenKind::GenericSep) {
            self.eat();
        }
        let opener = self.expect(TokenKind::Lt);
        let _ = opener;
        let saved = self.enter_ban_lt_gt();
        let mut args = Vec::new();
        if !self.check(TokenKind::Gt) {
            loop {
                args.push(*self.parse_type());
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.restore_mode(saved);
        let last = self.expect(TokenKind::Gt);
        let args = self.ctx.alloc_types(args);
        self.ctx.alloc_ty(Ty::Generic { inner, args, last })
    }

    fn parse_bracket_suffix(&mut self, inner: &'ast Ty<'ast>) -> &'ast Ty<'ast> {
        let lbracket = self.eat();
        if self.check(TokenKind::RBracket) {
            let rbracket = self.eat();
            return self.ctx.alloc_ty(Ty::Slice { inner, mutable: false, lbracket, rbracket });
        }
        if self.check(TokenKind::KwMut) {
            self.eat();
            let rbracket = self.expect(TokenKind::RBracket);
            return self.ctx.alloc_ty(Ty::Slice { inner, mutable: true, lbracket, rbracket });
        }
        let size = self.expect(TokenKind::IntLiteral);
        let rbracket = self.expect(TokenKind::RBracket);
        self.ctx.alloc_ty(Ty::Array { inner, size, lbracket, rbracket })
    }

    /// Parses a `fn(T, T) -> T` function-pointer type after the `fn`
    /// keyword has already been consumed by the caller (statement parsing
    /// also uses `fn` to start a declaration, so callers disambiguate by
    /// context before dispatching here).
    pub fn parse_fn_ptr_type(&mut self, fn_kw: bedrock_token::Token) -> &'ast Ty<'ast> {
        self.expect(TokenKind::LParen);
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(*self.parse_type());
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        let rparen = self.expect(TokenKind::RParen);
        let (ret, last) = if self.match_kind(TokenKind::Arrow).is_some() {
            let ret_ty = self.parse_type();
            (Some(ret_ty), ret_ty.last_token())
        } else {
            (None, rparen)
        };
        let params = self.ctx.alloc_types(params);
        self.ctx.alloc_ty(Ty::FnPtr { fn_kw, params, ret, last })
    }
}
