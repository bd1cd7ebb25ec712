use clap::Parser;
use tracing_subscriber::EnvFilter;

mod annotation;
mod classify;
mod cli;
mod core;
mod output;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("discordant_reads=debug,info")
    } else {
        EnvFilter::new("discordant_reads=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli::classify::run(cli.args, cli.format)
}
