// Pool inspection commands

use anyhow::Result;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use super::utils::{client, info, parse_token};

#[derive(Args)]
pub struct PoolCmd {
    #[command(subcommand)]
    command: PoolSubcommand,
}

#[derive(Subcommand)]
enum PoolSubcommand {
    /// Read the current pool price
    Price {
        /// First token (symbol or 0x address)
        #[arg(long)]
        token_a: String,

        /// Second token (symbol or 0x address)
        #[arg(long)]
        token_b: String,

        /// Fee in percent (0.05 means 0.05%)
        #[arg(long, default_value = "0.3")]
        fee: Decimal,

        /// Tick spacing in percent
        #[arg(long, default_value = "0.6")]
        tick_spacing: Decimal,
    },

    /// Show the canonical pool key for a token pair
    Key {
        /// First token (symbol or 0x address)
        #[arg(long)]
        token_a: String,

        /// Second token (symbol or 0x address)
        #[arg(long)]
        token_b: String,

        /// Fee in percent
        #[arg(long, default_value = "0.3")]
        fee: Decimal,

        /// Tick spacing in percent
        #[arg(long, default_value = "0.6")]
        tick_spacing: Decimal,
    },
}

pub async fn execute(cmd: PoolCmd, rpc_url: &str, deployment: &str) -> Result<()> {
    match cmd.command {
        PoolSubcommand::Price {
            token_a,
            token_b,
            fee,
            tick_spacing,
        } => {
            let client = client(rpc_url, deployment)?;
            let pool = client
                .pool
                .resolve_pool_key(&parse_token(&token_a)?, &parse_token(&token_b)?, fee, tick_spacing, None)
                .await?;
            let price = client.pool.price(&pool.key).await?;
            let display = client.pool.price_display(&pool).await?;

            info(&format!(
                "Pool {} / {} (fee {fee}%, tick spacing {tick_spacing}%)",
                pool.token0.symbol, pool.token1.symbol
            ));
            info(&format!("Sqrt ratio: {:#x}", price.sqrt_ratio));
            info(&format!("Tick: {}", price.tick));
            info(&format!(
                "Price: {display} {} per {}",
                pool.token1.symbol, pool.token0.symbol
            ));
            Ok(())
        }

        PoolSubcommand::Key {
            token_a,
            token_b,
            fee,
            tick_spacing,
        } => {
            let client = client(rpc_url, deployment)?;
            let pool = client
                .pool
                .resolve_pool_key(&parse_token(&token_a)?, &parse_token(&token_b)?, fee, tick_spacing, None)
                .await?;
            println!("{}", serde_json::to_string_pretty(&pool.key)?);
            info(&format!(
                "token0 = {} ({}), token1 = {} ({})",
                pool.token0.symbol, pool.token0.address, pool.token1.symbol, pool.token1.address
            ));
            Ok(())
        }
    }
}
