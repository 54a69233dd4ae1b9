//! `--token-table`, `--pretty-print`, and `--list-files` dumps.

use bedrock_ast::{Expr, Param, Stmt, Ty};
use bedrock_hir::Context;
use bedrock_token::{kind_name, Token};
use std::io::Write;

/// Prints `file_id`'s tokens in three fixed-width columns: kind, line/col,
/// and the interned lexeme text.
pub fn print_token_table(ctx: &Context, file_id: bedrock_base::FileId, out: &mut impl Write) -> std::io::Result<()> {
    let source = ctx.sources.get(file_id);
    let mut interner_copy = ctx.interner.clone();
    let tokens = bedrock_lexer::lex(&source.bytes, &mut interner_copy);
    for tok in &tokens {
        let text = interner_copy.resolve(tok.lexeme);
        writeln!(out, "{:<24} {:>4}:{:<4} {}", kind_name(tok.kind), tok.line + 1, tok.column + 1, text)?;
    }
    Ok(())
}

pub fn print_ast(ctx: &Context, file_id: bedrock_base::FileId, out: &mut impl Write) -> std::io::Result<()> {
    if let Some(root) = ctx.root_stmt_of(file_id) {
        print_stmt(ctx, root, 0, out)?;
    }
    Ok(())
}

pub fn print_list_files(ctx: &Context, out: &mut impl Write) -> std::io::Result<()> {
    for file_id in ctx.file_ids() {
        let path = ctx.path_of(file_id);
        let importees: Vec<&str> = ctx.graph().importees_of(file_id).iter().map(|id| ctx.path_of(*id)).collect();
        writeln!(out, "{path}: [{}]", importees.join(", "))?;
    }
    Ok(())
}

fn indent(out: &mut impl Write, depth: usize) -> std::io::Result<()> {
    write!(out, "{}", "  ".repeat(depth))
}

fn lex(ctx: &Context, tok: Token) -> &str {
    ctx.interner.resolve(tok.lexeme)
}

fn print_stmt(ctx: &Context, stmt: &Stmt, depth: usize, out: &mut impl Write) -> std::io::Result<()> {
    indent(out, depth)?;
    match stmt {
        Stmt::File { statements, .. } => {
            writeln!(out, "File")?;
            for s in *statements {
                print_stmt(ctx, s, depth + 1, out)?;
            }
        }
        Stmt::Block { statements, .. } => {
            writeln!(out, "Block")?;
            for s in *statements {
                print_stmt(ctx, s, depth + 1, out)?;
            }
        }
        Stmt::Module { name, body, .. } => {
            writeln!(out, "Module {}", lex(ctx, *name))?;
            for s in *body {
                print_stmt(ctx, s, depth + 1, out)?;
            }
        }
        Stmt::Import { path, .. } => writeln!(out, "Import {}", lex(ctx, *path))?,
        Stmt::Use { path, .. } => {
            let segs: Vec<&str> = path.iter().map(|t| lex(ctx, *t)).collect();
            writeln!(out, "Use {}", segs.join(".."))?;
        }
        Stmt::ExprStmt { expr, .. } => {
            writeln!(out, "ExprStmt")?;
            print_expr(ctx, expr, depth + 1, out)?;
        }
        Stmt::VarDecl { name, ty, init, .. } => {
            writeln!(out, "VarDecl {}", lex(ctx, *name))?;
            print_ty(ctx, ty, depth + 1, out)?;
            if let Some(init) = init {
                print_expr(ctx, init, depth + 1, out)?;
            }
        }
        Stmt::FnDecl { name, params, ret, body, .. } => {
            writeln!(out, "FnDecl {}", lex(ctx, *name))?;
            for p in *params {
                print_param(ctx, p, depth + 1, out)?;
            }
            if let Some(ret) = ret {
                print_ty(ctx, ret, depth + 1, out)?;
            }
            if let Some(body) = body {
                print_stmt(ctx, body, depth + 1, out)?;
            }
        }
        Stmt::If { cond, then_branch, else_branch, .. } => {
            writeln!(out, "If")?;
            print_expr(ctx, cond, depth + 1, out)?;
            print_stmt(ctx, then_branch, depth + 1, out)?;
            if let Some(else_branch) = else_branch {
                print_stmt(ctx, else_branch, depth + 1, out)?;
            }
        }
        Stmt::While { cond, body, .. } => {
            writeln!(out, "While")?;
            print_expr(ctx, cond, depth + 1, out)?;
            print_stmt(ctx, body, depth + 1, out)?;
        }
        Stmt::ForC { init, cond, step, body, .. } => {
            writeln!(out, "ForC")?;
            if let Some(init) = init {
                print_stmt(ctx, init, depth + 1, out)?;
            }
            if let Some(cond) = cond {
                print_expr(ctx, cond, depth + 1, out)?;
            }
            if let Some(step) = step {
                print_expr(ctx, step, depth + 1, out)?;
            }
            print_stmt(ctx, body, depth + 1, out)?;
        }
        Stmt::ForIn { pattern, iterable, body, .. } => {
            writeln!(out, "ForIn {}", lex(ctx, *pattern))?;
            print_expr(ctx, iterable, depth + 1, out)?;
            print_stmt(ctx, body, depth + 1, out)?;
        }
        Stmt::Return { value, .. } => {
            writeln!(out, "Return")?;
            if let Some(value) = value {
                print_expr(ctx, value, depth + 1, out)?;
            }
        }
        Stmt::Break { .. } => writeln!(out, "Break")?,
        Stmt::TypeDecl { kind, name, fields, .. } => {
            writeln!(out, "TypeDecl {:?} {}", kind, lex(ctx, *name))?;
            for f in *fields {
                print_param(ctx, f, depth + 1, out)?;
            }
        }
        Stmt::Visibility { visibility, inner, .. } => {
            writeln!(out, "Visibility {:?}", visibility)?;
            print_stmt(ctx, inner, depth + 1, out)?;
        }
        Stmt::Empty { .. } => writeln!(out, "Empty")?,
        Stmt::Invalid { .. } => writeln!(out, "Invalid")?,
    }
    Ok(())
}

fn print_param(ctx: &Context, param: &Param, depth: usize, out: &mut impl Write) -> std::io::Result<()> {
    indent(out, depth)?;
    writeln!(out, "Param {}", lex(ctx, param.name))?;
    print_ty(ctx, param.ty, depth + 1, out)
}

fn print_ty(ctx: &Context, ty: &Ty, depth: usize, out: &mut impl Write) -> std::io::Result<()> {
    indent(out, depth)?;
    match ty {
        Ty::Base { path, mutable, .. } => {
            let segs: Vec<&str> = path.iter().map(|t| lex(ctx, *t)).collect();
            writeln!(out, "Ty::Base {} mut={}", segs.join(".."), mutable)
        }
        Ty::Ref { mutable, inner, .. } => {
            writeln!(out, "Ty::Ref mut={}", mutable)?;
            print_ty(ctx, inner, depth + 1, out)
        }
        Ty::Array { inner, size, .. } => {
            writeln!(out, "Ty::Array [{}]", lex(ctx, *size))?;
            print_ty(ctx, inner, depth + 1, out)
        }
        Ty::Slice { inner, mutable, .. } => {
            writeln!(out, "Ty::Slice mut={}", mutable)?;
            print_ty(ctx, inner, depth + 1, out)
        }
        Ty::Generic { inner, args, .. } => {
            writeln!(out, "Ty::Generic")?;
            print_ty(ctx, inner, depth + 1, out)?;
            for a in *args {
                print_ty(ctx, a, depth + 1, out)?;
            }
            Ok(())
        }
        Ty::FnPtr { params, ret, .. } => {
            writeln!(out, "Ty::FnPtr")?;
            for p in *params {
                print_ty(ctx, p, depth + 1, out)?;
            }
            if let Some(ret) = ret {
                print_ty(ctx, ret, depth + 1, out)?;
            }
            Ok(())
        }
        Ty::Variadic { inner, .. } => {
            writeln!(out, "Ty::Variadic")?;
            print_ty(ctx, inner, depth + 1, out)
        }
        Ty::Invalid { .. } => writeln!(out, "Ty::Invalid"),
    }
}

fn print_expr(ctx: &Context, expr: &Expr, depth: usize, out: &mut impl Write) -> std::io::Result<()> {
    indent(out, depth)?;
    match expr {
        Expr::Path { segments } => {
            let segs: Vec<&str> = segments.iter().map(|t| lex(ctx, *t)).collect();
            writeln!(out, "Path {}", segs.join(".."))
        }
        Expr::Literal { token } => writeln!(out, "Literal {}", lex(ctx, *token)),
        Expr::Binary { left, op, right } => {
            writeln!(out, "Binary {}", kind_name(op.kind))?;
            print_expr(ctx, left, depth + 1, out)?;
            print_expr(ctx, right, depth + 1, out)
        }
        Expr::Assign { target, op, value } => {
            writeln!(out, "Assign {}", kind_name(op.kind))?;
            print_expr(ctx, target, depth + 1, out)?;
            print_expr(ctx, value, depth + 1, out)
        }
        Expr::Group { inner, .. } => {
            writeln!(out, "Group")?;
            print_expr(ctx, inner, depth + 1, out)
        }
        Expr::PreUnary { op, operand } => {
            writeln!(out, "PreUnary {}", kind_name(op.kind))?;
            print_expr(ctx, operand, depth + 1, out)
        }
        Expr::PostUnary { operand, op } => {
            writeln!(out, "PostUnary {}", kind_name(op.kind))?;
            print_expr(ctx, operand, depth + 1, out)
        }
        Expr::Call { callee, args, .. } => {
            writeln!(out, "Call")?;
            print_expr(ctx, callee, depth + 1, out)?;
            for a in *args {
                print_expr(ctx, a, depth + 1, out)?;
            }
            Ok(())
        }
        Expr::Invalid { .. } => writeln!(out, "Invalid"),
    }
}
