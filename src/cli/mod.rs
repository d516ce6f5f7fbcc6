// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod roast;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::DEFAULT_API_URL;

/// Costume roast command line client
#[derive(Parser, Debug)]
#[command(name = "roast-cli")]
#[command(version)]
#[command(about = "Get your Halloween costume roasted from the terminal", long_about = None)]
pub struct Cli {
    /// Base URL of the roast API
    #[arg(long, env = "ROAST_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a costume photo and run the full roast flow
    Roast(roast::RoastArgs),

    /// List narrator voices
    Voices,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Roast(args) => roast::run_roast(&cli.server, args).await,
        Commands::Voices => {
            roast::list_voices();
            Ok(())
        }
    }
}
