//! Pratt/precedence-climbing expression parsing.

use crate::parser::{Parser, ParserMode};
use bedrock_ast::Expr;
use bedrock_token::{binary_precedence, is_assignment_op, prefix_precedence, Assoc, DiagnosticCode, TokenKind};

impl<'t, 'ast> Parser<'t, 'ast> {
    /// Parses a full expression at the loosest precedence (the assignment
    /// family, level 16).
    pub fn parse_expression(&mut self) -> &'ast Expr<'ast> {
        self.parse_binary(16)
    }

    fn parse_binary(&mut self, max_level: u8) -> &'ast Expr<'ast> {
        let mut left = self.parse_unary();
        loop {
            let op = self.peek();
            if self.mode == ParserMode::BanLessThanAndGreaterThan
                && matches!(op.kind, TokenKind::Lt | TokenKind::Gt)
            {
                break;
            }
            let Some((level, assoc)) = binary_precedence(op.kind) else {
                break;
            };
            if level > max_level {
                break;
            }
            self.eat();
            let next_max = match assoc {
                Assoc::Left => level - 1,
                Assoc::Right => level,
            };
            let right = self.parse_binary(next_max);
            left = if is_assignment_op(op.kind) {
                self.ctx.assign(left, op, right)
            } else {
                self.ctx.binary(left, op, right)
            };
        }
        left
    }

    fn parse_unary(&mut self) -> &'ast Expr<'ast> {
        if prefix_precedence(self.peek().kind).is_some() {
            let op = self.eat();
            let operand = self.parse_unary();
            return self.ctx.pre_unary(op, operand);
        }
        let primary = self.parse_primary();
        self.parse_postfix(primary)
    }

    fn parse_postfix(&mut self, mut expr: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        loop {
            match self.peek().kind {
                TokenKind::LParen => {
                    self.eat();
                    let args = self.parse_call_args();
                    let rparen = self.expect(TokenKind::RParen);
                    expr = self.ctx.call(expr, args, rparen);
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = self.eat();
                    expr = self.ctx.post_unary(expr, op);
                }
                TokenKind::Dot | TokenKind::Arrow => {
                    let op = self.eat();
                    let field = self.expect(TokenKind::Identifier);
                    let segments = self.ctx.alloc_tokens(vec![field]);
                    let rhs = self.ctx.alloc_expr(Expr::Path { segments });
                    expr = self.ctx.binary(expr, op, rhs);
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_call_args(&mut self) -> Vec<Expr<'ast>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(*self.parse_expression());
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        args
    }

    /// Parses an identifier path (`Foo..bar`), greedily consuming `..`
    /// segments followed immediately by another identifier. This is the
    /// heuristic that disambiguates `..` as a path separator from `..` as
    /// the range operator: the range operator's right-hand side is rarely
    /// a bare identifier immediately following two dots in declaration and
    /// call position, so "next token is an identifier" is treated as
    /// "this is a path", matching how the rest of the grammar uses `..`.
    pub fn parse_path(&mut self) -> &'ast Expr<'ast> {
        let mut segments = vec![self.eat()];
        while self.check(TokenKind::DotDot) && self.peek_at(1).kind == TokenKind::Identifier {
            self.eat();
            segments.push(self.eat());
        }
        let segments = self.ctx.alloc_tokens(segments);
        self.ctx.alloc_expr(Expr::Path { segments })
    }

    fn parse_primary(&mut self) -> &'ast Expr<'ast> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::CharLiteral
            | TokenKind::BoolLiteral
            | TokenKind::NullLiteral => {
                self.eat();
                self.ctx.alloc_expr(Expr::Literal { token: tok })
            }
            TokenKind::Identifier | TokenKind::KwSelfId => self.parse_path(),
            TokenKind::LParen => {
                let lparen = self.eat();
                let inner = self.parse_expression();
                let rparen = self.expect(TokenKind::RParen);
                self.ctx.alloc_expr(Expr::Group { lparen, inner, rparen })
            }
            _ => {
                self.push_diagnostic(DiagnosticCode::ExpectedExpression, tok.span);
                self.sync_default();
                let last = self.discarded.unwrap_or(tok);
                self.ctx.alloc_expr(Expr::Invalid { first: tok, last })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_ast::{Arena, AstContext, Param, Stmt, Ty};
    use bedrock_base::{FileId, Interner};
    use bedrock_token::Token;

    fn parse(src: &str) -> (Vec<Token>, Interner) {
        let mut interner = Interner::new();
        let tokens = bedrock_lexer::lex(src.as_bytes(), &mut interner);
        (tokens, interner)
    }

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

    #[test]
    fn precedence_orders_multiplication_before_addition() {
        let (tokens, _interner) = parse("1 + 2 * 3");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let expr = parser.parse_expression();
            match expr {
                Expr::Binary { op, right, .. } => {
                    assert_eq!(op.kind, TokenKind::Plus);
                    match right {
                        Expr::Binary { op, .. } => assert_eq!(op.kind, TokenKind::Star),
                        _ => panic!("expected nested multiplication"),
                    }
                }
                _ => panic!("expected top-level addition"),
            }
        });
    }

    #[test]
    fn assignment_is_right_associative() {
        let (tokens, _interner) = parse("a = b = c");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let expr = parser.parse_expression();
            match expr {
                Expr::Assign { value, .. } => match value {
                    Expr::Assign { .. } => {}
                    _ => panic!("expected right-nested assignment"),
                },
                _ => panic!("expected assignment"),
            }
        });
    }

    #[test]
    fn call_parses_comma_separated_arguments() {
        let (tokens, _interner) = parse("f(1, 2, 3)");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            let expr = parser.parse_expression();
            match expr {
                Expr::Call { args, .. } => assert_eq!(args.len(), 3),
                _ => panic!("expected call"),
            }
        });
    }

    #[test]
    fn ban_lt_gt_mode_stops_before_comparison() {
        let (tokens, _interner) = parse("a < b");
        with_ctx!(ctx, {
            let mut parser = Parser::new(&tokens, FileId(1), &ctx);
            parser.enter_ban_lt_gt();
            let expr = parser.parse_expression();
            match expr {
                Expr::Path { .. } => {}
                _ => panic!("expected bare path, comparison suppressed"),
            }
            assert!(parser.check(TokenKind::Lt));
        });
    }
}
