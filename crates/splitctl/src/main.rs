//! splitctl - split a receipt between friends

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use split_common::SplitConfig;
use splitctl::cli::{Cli, Commands};
use splitctl::commands;
use splitctl::errors::EXIT_GENERAL_ERROR;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            EXIT_GENERAL_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = SplitConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    init_logging(&config, cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Scan { image, json } => commands::scan::run(&config, &image, json, &mut out),
        Commands::Summary { bill, tip, json } => commands::summary::run(&bill, tip, json, &mut out),
        Commands::QuickSplit { bill, json } => commands::quick_split::run(&bill, json, &mut out),
    }
}

fn init_logging(config: &SplitConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
