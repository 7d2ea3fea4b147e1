// CLI tool for the Maelstrom AMM
//
// This binary exposes pool inspection, swap and liquidity operations over
// a JSON-RPC endpoint. Structural failures (unknown token, no pool for a
// key) come back with a suggestion; transport failures are safe to retry.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maelstrom")]
#[command(about = "Maelstrom AMM CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// RPC URL to connect to
    #[arg(long, default_value = "http://localhost:5050")]
    rpc_url: String,

    /// Deployment to target (mainnet or testnet)
    #[arg(long, default_value = "mainnet")]
    deployment: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pool discovery and price reads
    Pool(commands::pool::PoolCmd),

    /// Slippage-bounded swaps
    Swap(commands::swap::SwapCmd),

    /// Liquidity position lifecycle
    Liquidity(commands::liquidity::LiquidityCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pool(cmd) => commands::pool::execute(cmd, &cli.rpc_url, &cli.deployment).await,
        Commands::Swap(cmd) => commands::swap::execute(cmd, &cli.rpc_url, &cli.deployment).await,
        Commands::Liquidity(cmd) => {
            commands::liquidity::execute(cmd, &cli.rpc_url, &cli.deployment).await
        }
    }
}
