//! Bundles the per-node-kind arenas and exposes builder methods, following
//! the one-arena-per-node-family pattern: every node kind gets its own
//! [`Arena`], and a handful of builder methods do the allocation so callers
//! never have to spell out `ctx.exprs.alloc(Expr::Binary { .. })` by hand.

use crate::expr::Expr;
use crate::stmt::{Param, Stmt};
use crate::ty::Ty;
use bedrock_base::Arena;
use bedrock_token::Token;

pub struct AstContext<'a> {
    pub exprs: &'a Arena<Expr<'a>>,
    pub stmts: &'a Arena<Stmt<'a>>,
    pub types: &'a Arena<Ty<'a>>,
    pub params: &'a Arena<Param<'a>>,
    pub tokens: &'a Arena<Token>,
}

impl<'a> AstContext<'a> {
    pub fn new(
        exprs: &'a Arena<Expr<'a>>,
        stmts: &'a Arena<Stmt<'a>>,
        types: &'a Arena<Ty<'a>>,
        params: &'a Arena<Param<'a>>,
        tokens: &'a Arena<Token>,
    ) -> Self {
        AstContext { exprs, stmts, types, params, tokens }
    }

    pub fn alloc_expr(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.exprs.alloc(expr)
    }

    pub fn alloc_stmt(&self, stmt: Stmt<'a>) -> &'a Stmt<'a> {
        self.stmts.alloc(stmt)
    }

    pub fn alloc_ty(&self, ty: Ty<'a>) -> &'a Ty<'a> {
        self.types.alloc(ty)
    }

    pub fn alloc_exprs(&self, items: Vec<Expr<'a>>) -> &'a [Expr<'a>] {
        self.exprs.alloc_slice(items)
    }

    pub fn alloc_stmts(&self, items: Vec<Stmt<'a>>) -> &'a [Stmt<'a>] {
        self.stmts.alloc_slice(items)
    }

    pub fn alloc_types(&self, items: Vec<Ty<'a>>) -> &'a [Ty<'a>] {
        self.types.alloc_slice(items)
    }

    pub fn alloc_params(&self, items: Vec<Param<'a>>) -> &'a [Param<'a>] {
        self.params.alloc_slice(items)
    }

    pub fn alloc_tokens(&self, items: Vec<Token>) -> &'a [Token] {
        self.tokens.alloc_slice(items)
    }

    pub fn binary(&self, left: &'a Expr<'a>, op: Token, right: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc_expr(Expr::Binary { left, op, right })
    }

    pub fn pre_unary(&self, op: Token, operand: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc_expr(Expr::PreUnary { op, operand })
    }

    pub fn post_unary(&self, operand: &'a Expr<'a>, op: Token) -> &'a Expr<'a> {
        self.alloc_expr(Expr::PostUnary { operand, op })
    }

    pub fn assign(&self, target: &'a Expr<'a>, op: Token, value: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc_expr(Expr::Assign { target, op, value })
    }

    pub fn call(&self, callee: &'a Expr<'a>, args: Vec<Expr<'a>>, rparen: Token) -> &'a Expr<'a> {
        let args = self.alloc_exprs(args);
        self.alloc_expr(Expr::Call { callee, args, rparen })
    }

    pub fn block(&self, lbrace: Token, statements: Vec<Stmt<'a>>, rbrace: Token) -> &'a Stmt<'a> {
        let statements = self.alloc_stmts(statements);
        self.alloc_stmt(Stmt::Block { lbrace, statements, rbrace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_base::{Span, Symbol};
    use bedrock_token::TokenKind;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, Symbol::EMPTY, Span::new(0, 1), 0, 0)
    }

    #[test]
    fn builder_methods_allocate_into_the_right_arena() {
        let exprs = Arena::new();
        let stmts = Arena::new();
        let types = Arena::new();
        let params = Arena::new();
        let tokens = Arena::new();
        let ctx = AstContext::new(&exprs, &stmts, &types, &params, &tokens);

        let one = ctx.alloc_expr(Expr::Literal { token: tok(TokenKind::IntLiteral) });
        let two = ctx.alloc_expr(Expr::Literal { token: tok(TokenKind::IntLiteral) });
        let sum = ctx.binary(one, tok(TokenKind::Plus), two);
        match sum {
            Expr::Binary { .. } => {}
            _ => panic!("expected Binary"),
        }
    }
}
