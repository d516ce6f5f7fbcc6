// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use costume_roast::{
    api::start_server,
    config::{AppConfig, ServerArgs},
    version,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // .env is optional; real environment variables take precedence
    dotenv::dotenv().ok();

    println!("🎃 Starting {}", version::get_version_string());

    let config = match AppConfig::try_from(ServerArgs::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    start_server(config).await
}
