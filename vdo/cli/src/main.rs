use anyhow::Result;
use clap::Parser;

mod app;
mod cdm;
mod cli;
mod service;

use self::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    Cli::parse().run().await
}
