//! # bedrockc
//!
//! The command-line front end: argument parsing, file I/O, and rendering
//! the HIR orchestrator's diagnostics, token tables, and AST dumps to the
//! terminal. This is the one crate in the workspace allowed to touch the
//! filesystem or print.

pub mod cli;
pub mod dump;
pub mod render;

use bedrock_ast::{Arena, AstContext};
use bedrock_hir::Context;
use cli::Cli;
use std::io::{self, IsTerminal};

/// Runs the compiler over `cli.file` and everything it imports, printing
/// whatever `cli`'s flags request. Returns the process exit code.
pub fn run(cli: &Cli) -> i32 {
    let exprs = Arena::new();
    let stmts = Arena::new();
    let types = Arena::new();
    let params = Arena::new();
    let tokens = Arena::new();
    let ast = AstContext::new(&exprs, &stmts, &types, &params, &tokens);

    let mut ctx = Context::new(&ast);
    ctx.import_search_paths = cli.import_paths.clone();

    if let Err(err) = ctx.process(&cli.file) {
        eprintln!("bedrockc: {err}");
        return 1;
    }

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();

    if cli.token_table {
        for file_id in ctx.file_ids() {
            tracing::debug!(file = ctx.path_of(file_id), "dumping token table");
            let _ = dump::print_token_table(&ctx, file_id, &mut out);
        }
    }

    if cli.pretty_print {
        for file_id in ctx.file_ids() {
            let _ = dump::print_ast(&ctx, file_id, &mut out);
        }
    }

    if cli.list_files {
        let _ = dump::print_list_files(&ctx, &mut out);
    }

    if !cli.silent {
        let _ = render::render_all(&ctx, &mut out, color);
    }

    if ctx.diagnostics.error_count() > 0 {
        1
    } else {
        0
    }
}

/// Installs a `tracing-subscriber` reader of `RUST_LOG` (default: warnings
/// only), matching the base family's LSP binary's own verbosity knob.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}
