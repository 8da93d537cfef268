use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod dishes;
mod engine;
mod listing;
mod recipe;
mod render;
mod templates;
mod workflow;

const HEADER: &str = r"
 ________________________________________
|  .--,--.                               |
|  `.   .'                               |
|   |___|                                |
|  <:o o:>       rcook: Cook your Cpp!   |
|  _'-^-'_                               |
| /   *   \                              |
|________________________________________|
";

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = cli::RootArgs::parse();
    init_tracing(args.verbose);
    println!("{HEADER}");
    match workflow::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
