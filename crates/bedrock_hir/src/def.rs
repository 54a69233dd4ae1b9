//! Top-level definitions registered out of a file's parsed statements.

use crate::id::ScopeId;
use bedrock_ast::{Stmt, TypeDeclKind, Visibility};
use bedrock_base::{FileId, Span, Symbol};

#[derive(Debug, Clone, Copy)]
pub enum DefPayload<'a> {
    Module { scope: ScopeId },
    Function { stmt: &'a Stmt<'a> },
    Variable { stmt: &'a Stmt<'a> },
    TypeDecl { kind: TypeDeclKind, stmt: &'a Stmt<'a> },
}

#[derive(Debug, Clone, Copy)]
pub struct Def<'a> {
    pub name: Symbol,
    pub file: FileId,
    pub span: Span,
    pub visibility: Visibility,
    pub owner_scope: ScopeId,
    pub payload: DefPayload<'a>,
    /// Set once something references this definition; drives dead-code
    /// detection the way `def_used` does in the wider id-table scheme.
    pub used: bool,
}

impl<'a> Def<'a> {
    pub fn new(
        name: Symbol,
        file: FileId,
        span: Span,
        visibility: Visibility,
        owner_scope: ScopeId,
        payload: DefPayload<'a>,
    ) -> Self {
        Def { name, file, span, visibility, owner_scope, payload, used: false }
    }
}

/// Classifies a top-level statement into the namespace its definition
/// belongs to, stripping any `Stmt::Visibility` wrapper first.
pub fn classify<'a>(stmt: &'a Stmt<'a>) -> (&'a Stmt<'a>, Visibility) {
    match stmt {
        Stmt::Visibility { visibility, inner, .. } => (*inner, *visibility),
        other => (other, Visibility::Hidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_ast::{Arena, AstContext, Param, Ty};
    use bedrock_base::Span;
    use bedrock_token::{Token, TokenKind};

    #[test]
    fn classify_strips_visibility_wrapper() {
        let exprs = Arena::new();
        let stmts = Arena::new();
        let types = Arena::new();
        let params = Arena::new();
        let tokens = Arena::new();
        let ctx = AstContext::new(&exprs, &stmts, &types, &params, &tokens);
        let tok = Token::new(TokenKind::KwPub, bedrock_base::Symbol::EMPTY, Span::new(0, 1), 1, 1);
        let inner = ctx.alloc_stmt(Stmt::Break { kw: tok, semi: tok });
        let wrapped = ctx.alloc_stmt(Stmt::Visibility {
            modifier: tok,
            visibility: Visibility::Public,
            inner,
        });
        let (classified, visibility) = classify(wrapped);
        assert!(matches!(classified, Stmt::Break { .. }));
        assert_eq!(visibility, Visibility::Public);
        let _ = Param { name: tok, ty: ctx.alloc_ty(Ty::Invalid { first: tok, last: tok }) };
    }
}
