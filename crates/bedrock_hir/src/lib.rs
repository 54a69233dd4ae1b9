//! # bedrock-hir
//!
//! The id-table HIR layer: pointerless ids over scope/def/diagnostic
//! tables, a four-namespace scope engine, import graph exploration with
//! cycle detection, and [`Context`], the orchestrator that drives
//! lex -> parse -> explore imports -> register top-level definitions for a
//! whole compilation.
//!
//! Everything downstream of parsing addresses nodes by [`id::Id`] rather
//! than by pointer, so semantic passes can hold onto a `DefId` across a
//! borrow of `Context` without fighting the borrow checker the way holding
//! an AST pointer across a mutation would.

pub mod context;
pub mod def;
pub mod id;
pub mod imports;
pub mod scope;

pub use context::{Context, HirError};
pub use def::{Def, DefPayload};
pub use id::{DefId, Id, IdSlice, OptId, ScopeAnonId, ScopeId};
pub use imports::{ImportFrontier, ImportGraph};
pub use scope::{look_up_anon, look_up_named, LookupResult, LookupStatus, Namespace, Scope, ScopeAnon};

#[cfg(test)]
mod tests {
    use super::*;
    use bedrock_ast::{Arena, AstContext};
    use bedrock_token::DiagnosticCode;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    macro_rules! with_ctx {
        ($ctx:ident, $body:block) => {{
            let exprs = Arena::new();
            let stmts = Arena::new();
            let types = Arena::new();
            let params = Arena::new();
            let tokens = Arena::new();
            let $ctx = AstContext::new(&exprs, &stmts, &types, &params, &tokens);
            $body
        }};
    }

    #[test]
    fn empty_file_produces_no_diagnostics_and_no_defs() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(dir.path(), "empty.brk", "");
            let mut ctx = Context::new(&ast);
            let root_id = ctx.process(&path).unwrap();
            assert!(ctx.diagnostics.is_empty());
            assert!(ctx.defs().is_empty());
            assert!(ctx.root_scope_of(root_id).is_some());
        });
    }

    #[test]
    fn two_tokens_parse_as_a_single_expression_statement() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(dir.path(), "two.brk", "a;");
            let mut ctx = Context::new(&ast);
            ctx.process(&path).unwrap();
            assert!(ctx.diagnostics.is_empty());
        });
    }

    #[test]
    fn max_munch_operator_lexes_as_one_token_and_parses_cleanly() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(dir.path(), "munch.brk", "i32 x = 1 <<- 2;");
            let mut ctx = Context::new(&ast);
            ctx.process(&path).unwrap();
            assert!(ctx.diagnostics.is_empty());
        });
    }

    #[test]
    fn unbalanced_braces_recover_with_exactly_one_error() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(dir.path(), "recover.brk", "fn f() { i32 x = 1;\nfn g() {}");
            let mut ctx = Context::new(&ast);
            ctx.process(&path).unwrap();
            assert_eq!(ctx.diagnostics.error_count(), 1);
        });
    }

    #[test]
    fn cyclic_import_is_diagnosed_and_terminates() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            write_file(dir.path(), "a.brk", "import \"b.brk\";");
            let b_path = write_file(dir.path(), "b.brk", "import \"a.brk\";");
            let _ = b_path;
            let a_path = dir.path().join("a.brk");
            let mut ctx = Context::new(&ast);
            ctx.process(&a_path).unwrap();
            let cycle_diag = ctx
                .diagnostics
                .iter()
                .find(|d| d.code == DiagnosticCode::CircularImport)
                .expect("a cycle diagnostic was reported");
            let message = cycle_diag.message();
            assert!(message.contains("a.brk"), "message should name a.brk: {message}");
            assert!(message.contains("b.brk"), "message should name b.brk: {message}");
        });
    }

    #[test]
    fn used_modules_collision_reports_ambiguity() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(
                dir.path(),
                "collide.brk",
                "mod Alpha { fn shared() {} } mod Beta { fn shared() {} } use Alpha; use Beta;",
            );
            let mut ctx = Context::new(&ast);
            let file_id = ctx.process(&path).unwrap();
            assert!(ctx.diagnostics.iter().all(|d| d.code != DiagnosticCode::UnresolvedUsePath));

            let scope_anon = ctx.root_scope_anon_of(file_id).unwrap();
            let shared = ctx.interner.intern("shared");
            let result = ctx.look_up_anon(scope_anon, Namespace::Functions, shared);
            assert_eq!(result.status, LookupStatus::Collision);
            assert_eq!(result.def, None);
        });
    }

    #[test]
    fn redefinition_at_file_scope_chains_a_note_to_the_original() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(dir.path(), "redef.brk", "fn f() {} fn f() {}");
            let mut ctx = Context::new(&ast);
            ctx.process(&path).unwrap();
            let redefs: Vec<_> = ctx
                .diagnostics
                .iter()
                .filter(|d| d.code == DiagnosticCode::Redefinition)
                .collect();
            assert_eq!(redefs.len(), 1);
            assert_eq!(ctx.defs().len(), 1);
        });
    }

    #[test]
    fn missing_import_is_diagnosed_without_panicking() {
        with_ctx!(ast, {
            let dir = tempdir().unwrap();
            let path = write_file(dir.path(), "missing.brk", "import \"nope.brk\";");
            let mut ctx = Context::new(&ast);
            ctx.process(&path).unwrap();
            let missing = ctx
                .diagnostics
                .iter()
                .filter(|d| d.code == DiagnosticCode::ImportedFileDoesNotExist)
                .count();
            assert_eq!(missing, 1);
        });
    }
}
