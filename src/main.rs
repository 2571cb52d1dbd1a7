use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use wallhue::cli::Args;
use wallhue::config::Config;

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn setup_logging(verbose: u8) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("wallhue: {}: {}", record.level(), message))
        })
        .level(level(verbose))
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    let config = Config::from_args(&args).context("invalid arguments")?;
    wallhue::run(&config)
}
