use clap::Parser;
use tradescore::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
