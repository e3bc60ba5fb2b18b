mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use error::exit_with_error;

fn init_tracing(cli: &Cli) {
    // `-v` flags pick the default level; RUST_LOG still wins so library
    // targets can be tuned individually.
    let default = match cli.verbose {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> error::CliResult<()> {
    match cli.command {
        Commands::Infer {
            frameworks,
            data,
            queries,
            cache,
            rm_cache,
            cache_dir,
            format,
            export,
        } => commands::infer::run(commands::infer::InferOpts {
            frameworks,
            data,
            queries,
            cache,
            rm_cache,
            cache_dir,
            format,
            export,
        }),

        Commands::Frameworks => commands::frameworks::run(),
    }
}
