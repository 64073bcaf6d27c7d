//! Binary for the message store service.

use anyhow::Result;
use clap::Parser;
use courier_server::{load_config, run_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, database_url } => {
            let config = load_config(port, database_url)?;
            run_server(config).await
        }
    }
}
