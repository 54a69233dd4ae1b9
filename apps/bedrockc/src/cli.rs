//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line front end for the bedrock compiler.
///
/// Accepts a single root source file and drives the lex/parse/import/
/// registration pipeline over it and everything it transitively imports.
#[derive(Parser, Debug)]
#[command(name = "bedrockc", version, about = "The bedrock compiler front end")]
pub struct Cli {
    /// Root source file to compile.
    pub file: PathBuf,

    /// Additional directory to search when resolving `import` paths.
    /// May be repeated; directories are tried in the order given, after the
    /// importing file's own directory.
    #[arg(short = 'I', long = "import-path")]
    pub import_paths: Vec<PathBuf>,

    /// Print each file's token table after lexing.
    #[arg(long)]
    pub token_table: bool,

    /// Print each file's AST after parsing.
    #[arg(long)]
    pub pretty_print: bool,

    /// Suppress diagnostic output. The exit code still reflects success or
    /// failure.
    #[arg(long)]
    pub silent: bool,

    /// Print one line per loaded file with its importees.
    #[arg(long)]
    pub list_files: bool,
}
