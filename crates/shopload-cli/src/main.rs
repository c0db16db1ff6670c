use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod plan;
mod upload;

#[derive(Debug, Parser)]
#[command(name = "shopload")]
#[command(about = "Import product spreadsheets into a Shopify store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import every worksheet of FILE into the configured store.
    Upload {
        file: PathBuf,
        /// Delete all existing products before importing.
        #[arg(long)]
        purge: bool,
    },
    /// Print how FILE would be grouped and classified, without a store.
    Plan { file: PathBuf },
}

fn init_tracing(fallback_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Upload { file, purge } => {
            let config = shopload_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            upload::run_upload(&config, &file, purge).await
        }
        Commands::Plan { file } => {
            dotenvy::dotenv().ok();
            init_tracing("info")?;
            plan::run_plan(&file)
        }
    }
}
