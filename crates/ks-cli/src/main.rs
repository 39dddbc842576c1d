use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("keystone error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags, tracing::level_filters::LevelFilter::current());

    let config = bootstrap::load_config(&flags)?;

    // Rescue works on a scan directory and never reads the log.
    if let cli::Commands::MoveFiles(args) = &cli.command {
        return commands::move_files::handle(args, &config, &flags);
    }

    let ctx = context::AppContext::init(config)
        .context("failed to initialize keystone application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KEYSTONE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
