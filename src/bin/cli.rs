// src/bin/cli.rs
use clap::Parser;
use coin_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init(log::LogTarget::Stderr)?;
    cli::run(cli::Cli::parse())
}
