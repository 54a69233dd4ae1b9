//! bedrockc - standalone binary entry point.

use clap::Parser as _;

fn main() {
    bedrockc::init_logging();
    let cli = bedrockc::cli::Cli::parse();
    std::process::exit(bedrockc::run(&cli));
}
