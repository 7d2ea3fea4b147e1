// Swap commands

use anyhow::Result;
use clap::{Args, Subcommand};
use maelstrom_sdk::{SwapAmount, SwapRequest};
use rust_decimal::Decimal;

use super::utils::{client, info, parse_token, print_batch, success};

#[derive(Args)]
pub struct SwapCmd {
    #[command(subcommand)]
    command: SwapSubcommand,
}

#[derive(Args)]
struct SwapArgs {
    /// Token to sell (symbol or 0x address)
    #[arg(long)]
    token_in: String,

    /// Token to buy (symbol or 0x address)
    #[arg(long)]
    token_out: String,

    /// Amount in the token's smallest unit
    #[arg(long)]
    amount: u128,

    /// Treat the amount as the desired output instead of the input
    #[arg(long)]
    exact_out: bool,

    /// Fee in percent (0.05 means 0.05%)
    #[arg(long, default_value = "0.3")]
    fee: Decimal,

    /// Tick spacing in percent
    #[arg(long, default_value = "0.6")]
    tick_spacing: Decimal,

    /// Slippage tolerance in percent
    #[arg(long, default_value = "0.5")]
    slippage: Decimal,
}

#[derive(Subcommand)]
enum SwapSubcommand {
    /// Build the swap batch and print it without submitting
    Quote(SwapArgs),

    /// Build, submit and confirm the swap
    Execute(SwapArgs),
}

impl SwapArgs {
    fn request(&self) -> Result<SwapRequest> {
        Ok(SwapRequest {
            token_in: parse_token(&self.token_in)?,
            token_out: parse_token(&self.token_out)?,
            fee_percent: self.fee,
            tick_spacing_percent: self.tick_spacing,
            amount: if self.exact_out {
                SwapAmount::exact_out(self.amount)
            } else {
                SwapAmount::exact_in(self.amount)
            },
            slippage_percent: self.slippage,
            extension: None,
        })
    }
}

pub async fn execute(cmd: SwapCmd, rpc_url: &str, deployment: &str) -> Result<()> {
    match cmd.command {
        SwapSubcommand::Quote(args) => {
            let client = client(rpc_url, deployment)?;
            let plan = client.swap.build_swap(&args.request()?).await?;

            info(&format!(
                "Selling {} for {} ({})",
                plan.pool.token_a().symbol,
                plan.pool.token_b().symbol,
                if plan.is_selling_token0 {
                    "token0 -> token1"
                } else {
                    "token1 -> token0"
                }
            ));
            info(&format!("Expected out: {}", plan.expected_out));
            info(&format!("Minimum out (enforced on-chain): {}", plan.min_out));
            info(&format!("Price limit: {:#x}", plan.sqrt_ratio_limit));
            print_batch(&plan.batch)?;
            Ok(())
        }

        SwapSubcommand::Execute(args) => {
            info("Submitting swap...");
            let client = client(rpc_url, deployment)?;
            let result = client.swap.swap(&args.request()?).await?;
            success(&format!("Swap confirmed! Tx: {}", result.tx_hash));
            info(&format!(
                "Expected {} out, floor was {}",
                result.expected_out, result.min_out
            ));
            Ok(())
        }
    }
}
