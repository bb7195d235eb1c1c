use clap::Parser;
use namescrub_core::RunError;
use std::io::{self, IsTerminal};
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;
mod run;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let use_color = !cli.no_color && io::stdout().is_terminal();

    match run::handle_run(&cli, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// Invalid input exits 1, a safety refusal 2, output failures 3.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RunError>()
        .map_or(1, RunError::exit_code)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("NAMESCRUB_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
