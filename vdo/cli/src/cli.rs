use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use crate::app;
use crate::cdm::WidevineCdm;
use crate::service::{ServiceConfig, VdoClient};

/**
    Fetch Widevine content keys for a VdoCipher-protected stream.
*/
#[derive(Parser)]
#[command(name = "vdo-cli")]
pub struct Cli {
    /**
        Path to the .wvd device file consumed by the Widevine CDM.
    */
    #[arg(long)]
    wvd: Option<PathBuf>,

    /**
        The playback access token issued alongside the stream.
    */
    #[arg(long)]
    token: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Both flags are required; print usage and exit 1 otherwise.
        let (Some(wvd), Some(token)) = (self.wvd, self.token) else {
            Cli::command().print_help()?;
            std::process::exit(1);
        };

        let wvd_data = std::fs::read(&wvd).context("failed to read WVD file")?;
        let cdm = WidevineCdm::from_wvd(&wvd_data)?;

        let client = VdoClient::new(ServiceConfig::default())?;
        let report = app::fetch_keys(&token, &client, &cdm).await?;

        print!("{}", app::render_report(&report));
        Ok(())
    }
}
