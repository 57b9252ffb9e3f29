use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod output;
mod parsing;
mod sequence_file;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("barcode_demux=debug,info")
    } else {
        EnvFilter::new("barcode_demux=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Demux(args) => {
            cli::demux::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Split(args) => {
            cli::split::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Info(args) => {
            cli::info::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
