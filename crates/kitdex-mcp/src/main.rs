//! kitdex-mcp binary: serves the component registry over MCP stdio.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kitdex_core::Config;

#[derive(Parser, Debug)]
#[command(name = "kitdex-mcp")]
#[command(version)]
#[command(about = "MCP server for Composer Kit component metadata", long_about = None)]
struct Cli {
    /// Path to configuration file (overrides autodiscovery). Also via `KITDEX_CONFIG`.
    #[arg(long, value_name = "FILE", env = "KITDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter in `RUST_LOG` syntax; logs go to stderr
    #[arg(long, value_name = "FILTER", env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    kitdex_mcp::init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    kitdex_mcp::serve_stdio(config).await?;
    Ok(())
}
