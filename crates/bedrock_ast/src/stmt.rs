//! Statement and top-level declaration nodes.

use crate::expr::Expr;
use crate::ty::Ty;
use bedrock_base::Span;
use bedrock_token::Token;

/// A function, method, or destructor parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param<'a> {
    pub name: Token,
    pub ty: &'a Ty<'a>,
}

/// Distinguishes the declaration-bearing keyword a [`Stmt::TypeDecl`] used,
/// since `struct`/`union`/`variant`/`contract`/`deftype` all share one
/// shape (a name plus a field/member list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Struct,
    Union,
    Variant,
    Contract,
    Deftype,
}

/// Visibility carried by a leading `pub`/`hid` modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Hidden,
}

#[derive(Debug, Clone, Copy)]
pub enum Stmt<'a> {
    File {
        name: Token,
        statements: &'a [Stmt<'a>],
    },
    Block {
        lbrace: Token,
        statements: &'a [Stmt<'a>],
        rbrace: Token,
    },
    Module {
        kw: Token,
        name: Token,
        body: &'a [Stmt<'a>],
        rbrace: Token,
    },
    Import {
        kw: Token,
        path: Token,
        semi: Token,
    },
    Use {
        kw: Token,
        path: &'a [Token],
        semi: Token,
    },
    ExprStmt { expr: &'a Expr<'a>, semi: Token },
    VarDecl {
        first: Token,
        ty: &'a Ty<'a>,
        name: Token,
        init: Option<&'a Expr<'a>>,
        semi: Token,
    },
    FnDecl {
        kw: Token,
        scope_prefix: Option<Token>,
        name: Token,
        params: &'a [Param<'a>],
        ret: Option<&'a Ty<'a>>,
        body: Option<&'a Stmt<'a>>,
        last: Token,
    },
    If {
        kw: Token,
        cond: &'a Expr<'a>,
        then_branch: &'a Stmt<'a>,
        else_branch: Option<&'a Stmt<'a>>,
    },
    While {
        kw: Token,
        cond: &'a Expr<'a>,
        body: &'a Stmt<'a>,
    },
    ForC {
        kw: Token,
        init: Option<&'a Stmt<'a>>,
        cond: Option<&'a Expr<'a>>,
        step: Option<&'a Expr<'a>>,
        body: &'a Stmt<'a>,
    },
    ForIn {
        kw: Token,
        pattern: Token,
        iterable: &'a Expr<'a>,
        body: &'a Stmt<'a>,
    },
    Return {
        kw: Token,
        value: Option<&'a Expr<'a>>,
        semi: Token,
    },
    Break { kw: Token, semi: Token },
    TypeDecl {
        kw: Token,
        kind: TypeDeclKind,
        name: Token,
        fields: &'a [Param<'a>],
        rbrace: Token,
    },
    Visibility {
        modifier: Token,
        visibility: Visibility,
        inner: &'a Stmt<'a>,
    },
    Empty { semi: Token },
    /// Produced by error recovery: the parser could not make sense of this
    /// region but has re-synchronized after it.
    Invalid { first: Token, last: Token },
}

impl<'a> Stmt<'a> {
    pub fn first_token(&self) -> Token {
        match self {
            Stmt::File { statements, name } => statements.first().map(|s| s.first_token()).unwrap_or(*name),
            Stmt::Block { lbrace, .. } => *lbrace,
            Stmt::Module { kw, .. } => *kw,
            Stmt::Import { kw, .. } => *kw,
            Stmt::Use { kw, .. } => *kw,
            Stmt::ExprStmt { expr, .. } => expr.first_token(),
            Stmt::VarDecl { first, .. } => *first,
            Stmt::FnDecl { kw, scope_prefix: _, .. } => *kw,
            Stmt::If { kw, .. } => *kw,
            Stmt::While { kw, .. } => *kw,
            Stmt::ForC { kw, .. } => *kw,
            Stmt::ForIn { kw, .. } => *kw,
            Stmt::Return { kw, .. } => *kw,
            Stmt::Break { kw, .. } => *kw,
            Stmt::TypeDecl { kw, .. } => *kw,
            Stmt::Visibility { modifier, .. } => *modifier,
            Stmt::Empty { semi } => *semi,
            Stmt::Invalid { first, .. } => *first,
        }
    }

    pub fn last_token(&self) -> Token {
        match self {
            Stmt::File { statements, name } => statements.last().map(|s| s.last_token()).unwrap_or(*name),
            Stmt::Block { rbrace, .. } => *rbrace,
            Stmt::Module { rbrace, .. } => *rbrace,
            Stmt::Import { semi, .. } => *semi,
            Stmt::Use { semi, .. } => *semi,
            Stmt::ExprStmt { semi, .. } => *semi,
            Stmt::VarDecl { semi, .. } => *semi,
            Stmt::FnDecl { last, .. } => *last,
            Stmt::If { then_branch, else_branch, .. } => {
                else_branch.map(|e| e.last_token()).unwrap_or_else(|| then_branch.last_token())
            }
            Stmt::While { body, .. } => body.last_token(),
            Stmt::ForC { body, .. } => body.last_token(),
            Stmt::ForIn { body, .. } => body.last_token(),
            Stmt::Return { semi, .. } => *semi,
            Stmt::Break { semi, .. } => *semi,
            Stmt::TypeDecl { rbrace, .. } => *rbrace,
            Stmt::Visibility { inner, .. } => inner.last_token(),
            Stmt::Empty { semi } => *semi,
            Stmt::Invalid { last, .. } => *last,
        }
    }

    pub fn span(&self) -> Span {
        self.first_token().span.merge(self.last_token().span)
    }
}
