//! Statement and top-level declaration parsing.

use crate::common::{FUNCTION_TOKENS, TYPE_DECL_TOKENS, VISIBILITY_TOKENS};
use crate::parser::Parser;
use bedrock_ast::{Param, Stmt, TypeDeclKind, Visibility};
use bedrock_token::{DiagnosticCode, Token, TokenKind, BUILTIN_TYPE_KEYWORDS};

impl<'t, 'ast> Parser<'t, 'ast> {
    /// Parses an entire file: a flat list of top-level statements,
    /// terminated by end-of-file. Stops early only if a synchronization
    /// attempt could not safely recover (expected token, found EOF).
    pub fn parse_file(&mut self, name: Token) -> &'ast Stmt<'ast> {
        let mut statements = Vec::new();
        while !self.at_eof() && !self.eof_recovery_failed {
            statements.push(*self.parse_statement());
        }
        let statements = self.ctx.alloc_stmts(statements);
        self.ctx.alloc_stmt(Stmt::File { name, statements })
    }

    pub fn parse_statement(&mut self) -> &'ast Stmt<'ast> {
        let tok = self.peek();

        if VISIBILITY_TOKENS.contains(&tok.kind) {
            return self.parse_visibility();
        }

        match tok.kind {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwModule => self.parse_module(),
            TokenKind::KwImport => self.parse_import(),
            TokenKind::KwUse => self.parse_use(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwBreak => self.parse_break(),
            TokenKind::Semicolon => {
                let semi = self.eat();
                self.push_diagnostic(DiagnosticCode::ExtraneousSemicolon, semi.span);
                self.ctx.alloc_stmt(Stmt::Empty { semi })
            }
            _ if FUNCTION_TOKENS.contains(&tok.kind) => self.parse_fn_decl(),
            _ if TYPE_DECL_TOKENS.contains(&tok.kind) => self.parse_type_decl(),
            _ if self.starts_var_decl() => self.parse_var_decl(),
            _ => {
                let expr = self.parse_expression();
                let semi = self.expect(TokenKind::Semicolon);
                self.ctx.alloc_stmt(Stmt::ExprStmt { expr, semi })
            }
        }
    }

    fn starts_var_decl(&self) -> bool {
        let tok = self.peek();
        if BUILTIN_TYPE_KEYWORDS.contains(&tok.kind) || tok.kind == TokenKind::KwMut {
            return true;
        }
        // `Identifier Identifier` (type name, then variable name) begins a
        // variable declaration; a bare identifier followed by anything
        // else is an expression statement.
        tok.kind == TokenKind::Identifier && self.peek_at(1).kind == TokenKind::Identifier
    }

    fn parse_visibility(&mut self) -> &'ast Stmt<'ast> {
        let modifier = self.eat();
        let visibility = if modifier.kind == TokenKind::KwPub {
            Visibility::Public
        } else {
            Visibility::Hidden
        };
        if VISIBILITY_TOKENS.contains(&self.peek().kind) {
            let extra = self.eat();
            self.push_diagnostic(DiagnosticCode::ExtraneousVisibilityModifier, extra.span);
        }
        let inner = self.parse_statement();
        self.ctx.alloc_stmt(Stmt::Visibility { modifier, visibility, inner })
    }

    pub fn parse_block(&mut self) -> &'ast Stmt<'ast> {
        let lbrace = self.expect(TokenKind::LBrace);
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            statements.push(*self.parse_statement());
        }
        let rbrace = self.expect(TokenKind::RBrace);
        let statements = self.ctx.alloc_stmts(statements);
        self.ctx.alloc_stmt(Stmt::Block { lbrace, statements, rbrace })
    }

    fn parse_module(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let name = self.expect(TokenKind::Identifier);
        if name.kind == TokenKind::Identifier {
            // nothing further to validate; identifiers are always valid
            // module names once lexed.
        } else {
            self.push_diagnostic(DiagnosticCode::InvalidModuleName, name.span);
        }
        self.expect(TokenKind::LBrace);
        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            body.push(*self.parse_statement());
        }
        let rbrace = self.expect(TokenKind::RBrace);
        let body = self.ctx.alloc_stmts(body);
        self.ctx.alloc_stmt(Stmt::Module { kw, name, body, rbrace })
    }

    fn parse_import(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let path = self.expect(TokenKind::StringLiteral);
        let semi = self.expect(TokenKind::Semicolon);
        self.ctx.alloc_stmt(Stmt::Import { kw, path, semi })
    }

    fn parse_use(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let mut segments = vec![self.expect(TokenKind::Identifier)];
        while self.match_kind(TokenKind::DotDot).is_some() {
            segments.push(self.expect(TokenKind::Identifier));
        }
        let semi = self.expect(TokenKind::Semicolon);
        let path = self.ctx.alloc_tokens(segments);
        self.ctx.alloc_stmt(Stmt::Use { kw, path, semi })
    }

    fn parse_var_decl(&mut self) -> &'ast Stmt<'ast> {
        let first = self.peek();
        let ty = self.parse_type();
        let name = self.expect(TokenKind::Identifier);
        let init = if self.match_kind(TokenKind::Eq).is_some() {
            Some(self.parse_expression())
        } else {
            None
        };
        if !self.check(TokenKind::Semicolon) && init.is_none() {
            self.push_diagnostic(DiagnosticCode::IncompleteVarDeclaration, self.peek().span);
        }
        let semi = self.expect(TokenKind::Semicolon);
        self.ctx.alloc_stmt(Stmt::VarDecl { first, ty, name, init, semi })
    }

    /// `fn`/`mt`/`dt` all share this shape; `mt`/`dt` additionally allow a
    /// `Type..name` scope prefix identifying the receiver type.
    fn parse_fn_decl(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let mut scope_prefix = None;
        let mut name = self.expect(TokenKind::Identifier);
        if self.check(TokenKind::DotDot) && self.peek_at(1).kind == TokenKind::Identifier {
            self.eat();
            scope_prefix = Some(name);
            name = self.eat();
        }

        self.expect(TokenKind::LParen);
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let ty = self.parse_type();
                let pname = self.expect(TokenKind::Identifier);
                params.push(Param { name: pname, ty });
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen);

        let ret = if self.match_kind(TokenKind::Arrow).is_some() {
            Some(self.parse_type())
        } else {
            None
        };

        let (body, last) = if self.check(TokenKind::LBrace) {
            let block = self.parse_block();
            (Some(block), block.last_token())
        } else {
            let semi = self.expect(TokenKind::Semicolon);
            (None, semi)
        };

        let params = self.ctx.alloc_params(params);
        self.ctx.alloc_stmt(Stmt::FnDecl { kw, scope_prefix, name, params, ret, body, last })
    }

    fn parse_if(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let cond = self.parse_expression();
        let then_branch = self.parse_braced_body();
        let else_branch = if self.match_kind(TokenKind::KwElse).is_some() {
            if self.check(TokenKind::KwIf) {
                Some(self.parse_if())
            } else {
                Some(self.parse_braced_body())
            }
        } else {
            None
        };
        self.ctx.alloc_stmt(Stmt::If { kw, cond, then_branch, else_branch })
    }

    /// A loop/branch body must be a brace-delimited block; per the
    /// normative grammar a bare single statement is not allowed there.
    fn parse_braced_body(&mut self) -> &'ast Stmt<'ast> {
        if self.check(TokenKind::LBrace) {
            return self.parse_block();
        }
        let tok = self.peek();
        self.push_diagnostic(DiagnosticCode::ExpectedStatement, tok.span);
        self.parse_block()
    }

    fn parse_while(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let cond = self.parse_expression();
        self.enter_loop();
        let body = self.parse_braced_body();
        self.exit_loop();
        self.ctx.alloc_stmt(Stmt::While { kw, cond, body })
    }

    /// Distinguishes C-style `for (init; cond; step)` from `for pat in
    /// iterable` by the presence of `in` at the position an iterator would
    /// appear; if both could parse, `for-in` wins.
    fn parse_for(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        if self.peek().kind == TokenKind::Identifier && self.peek_at(1).kind == TokenKind::KwIn {
            let pattern = self.eat();
            self.eat(); // `in`
            let iterable = self.parse_expression();
            self.enter_loop();
            let body = self.parse_braced_body();
            self.exit_loop();
            return self.ctx.alloc_stmt(Stmt::ForIn { kw, pattern, iterable, body });
        }

        let init = if self.check(TokenKind::Semicolon) {
            self.eat();
            None
        } else {
            Some(self.parse_statement())
        };
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.expect(TokenKind::Semicolon);
        let step = if self.check(TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.enter_loop();
        let body = self.parse_braced_body();
        self.exit_loop();
        self.ctx.alloc_stmt(Stmt::ForC { kw, init, cond, step, body })
    }

    fn parse_return(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression())
        };
        let semi = self.expect(TokenKind::Semicolon);
        self.ctx.alloc_stmt(Stmt::Return { kw, value, semi })
    }

    fn parse_break(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        if !self.in_loop() {
            self.push_diagnostic(DiagnosticCode::BreakOutsideLoop, kw.span);
        }
        let semi = self.expect(TokenKind::Semicolon);
        self.ctx.alloc_stmt(Stmt::Break { kw, semi })
    }

    fn parse_type_decl(&mut self) -> &'ast Stmt<'ast> {
        let kw = self.eat();
        let kind = match kw.kind {
            TokenKind::KwStruct => TypeDeclKind::Struct,
            TokenKind::KwUnion => TypeDeclKind::Union,
            TokenKind::KwVariant => TypeDeclKind::Variant,
            TokenKind::KwContract => TypeDeclKind::Contract,
            _ => TypeDeclKind::Deftype,
        };
        let name = self.expect(TokenKind::Identifier);
        self.expect(TokenKind::LBrace);
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            let ty = self.parse_type();
            let fname = self.expect(TokenKind::Identifier);
            fields.push(Param { name: fname, ty });
            if self.match_kind(TokenKind::Comma).is_none() {
                self.match_kind(TokenKind::Semicolon);
            }
        }
        let rbrace = self.expect(TokenKind::RBrace);
        let fields = self.ctx.alloc_params(fields);
        self.ctx.alloc_stmt(Stmt::TypeDecl { kw, kind, name, fields, rbrace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_ast::{Arena, AstContext, Expr, Ty};
    use bedrock_base::{FileId, Interner, Symbol};
    use bedrock_token::Span;

    macro_rules! with_ctx {
        ($ctx:ident, $body:block) => {{
            let exprs = Arena::new();
            let stmts = Arena::new();
            let types = Arena::new();
            let params = Arena::new();
            let tok_arena = Arena::new();
            let $ctx = AstContext::new(&exprs, &stmts, &types, &params, &tok_arena);
            $body
        }};
    }

    fn toks(src: &str) -> Vec<Token> {
        let mut interner = Interner::new();
        bedrock_lexer::lex(src.as_bytes(), &mut interner)
    }

    fn file_name() -> Token {
        Token::new(TokenKind::StringLiteral, Symbol::EMPTY, Span::new(0, 0), 0, 0)
    }

    #[test]
    fn empty_file_has_no_statements() {
        let tokens = toks("");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let file = parser.parse_file(file_name());
            match file {
                Stmt::File { statements, .. } => assert!(statements.is_empty()),
                _ => panic!("expected file"),
            }
            assert!(parser.diagnostics.is_empty());
        });
    }

    #[test]
    fn module_declaration_parses_empty_body() {
        let tokens = toks("mod Alpha {}");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let file = parser.parse_file(file_name());
            match file {
                Stmt::File { statements, .. } => {
                    assert_eq!(statements.len(), 1);
                    match &statements[0] {
                        Stmt::Module { body, .. } => assert!(body.is_empty()),
                        _ => panic!("expected module"),
                    }
                }
                _ => panic!("expected file"),
            }
            assert!(parser.diagnostics.is_empty());
        });
    }

    #[test]
    fn missing_close_brace_emits_one_expected_token_diagnostic() {
        let tokens = toks("fn foo( {}");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let file = parser.parse_file(file_name());
            assert_eq!(parser.diagnostics.error_count(), 1);
            match file {
                Stmt::File { statements, .. } => match &statements[0] {
                    Stmt::FnDecl { body, .. } => assert!(body.is_some()),
                    _ => panic!("expected fn decl"),
                },
                _ => panic!("expected file"),
            }
        });
    }

    #[test]
    fn redefinition_parses_two_fn_decls() {
        let tokens = toks("fn f() {} fn f() {}");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let file = parser.parse_file(file_name());
            match file {
                Stmt::File { statements, .. } => assert_eq!(statements.len(), 2),
                _ => panic!("expected file"),
            }
        });
    }

    #[test]
    fn break_outside_loop_is_diagnosed() {
        let tokens = toks("break;");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let _ = parser.parse_file(file_name());
            assert_eq!(parser.diagnostics.error_count(), 1);
        });
    }

    #[test]
    fn var_decl_parses_type_name_and_initializer() {
        let tokens = toks("i32 x = 1;");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let file = parser.parse_file(file_name());
            match file {
                Stmt::File { statements, .. } => match &statements[0] {
                    Stmt::VarDecl { init, .. } => assert!(init.is_some()),
                    _ => panic!("expected var decl"),
                },
                _ => panic!("expected file"),
            }
        });
    }
}
