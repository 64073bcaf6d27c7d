//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(about = "Message store HTTP service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API (config from env; flags override PORT and DATABASE_URL).
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(long)]
        database_url: Option<String>,
    },
}

/// Load ServerConfig from environment, applying CLI overrides.
pub fn load_config(port: Option<u16>, database_url: Option<String>) -> Result<ServerConfig> {
    ServerConfig::load(port, database_url)
}
