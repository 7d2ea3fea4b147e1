// Liquidity position commands

use anyhow::Result;
use clap::{Args, Subcommand};
use maelstrom_sdk::{Bounds, MaelstromClient, ResolvedPool, Tick};
use rust_decimal::Decimal;

use super::utils::{client, info, parse_address, parse_token, print_batch, success};

#[derive(Args)]
pub struct LiquidityCmd {
    #[command(subcommand)]
    command: LiquiditySubcommand,
}

#[derive(Args)]
struct PoolArgs {
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
}

#[derive(Args)]
struct RangeArgs {
    /// Lower tick of the position range
    #[arg(long, allow_hyphen_values = true)]
    lower_tick: i64,

    /// Upper tick of the position range
    #[arg(long, allow_hyphen_values = true)]
    upper_tick: i64,
}

#[derive(Subcommand)]
enum LiquiditySubcommand {
    /// Mint a new position and deposit into it
    Create {
        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Amount of token A, in its smallest unit
        #[arg(long)]
        amount_a: u128,

        /// Amount of token B, in its smallest unit
        #[arg(long)]
        amount_b: u128,

        /// Print the batch instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Deposit more into an existing position
    Add {
        /// Position id
        #[arg(long)]
        position_id: u64,

        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Amount of token A, in its smallest unit
        #[arg(long)]
        amount_a: u128,

        /// Amount of token B, in its smallest unit
        #[arg(long)]
        amount_b: u128,

        /// Print the batch instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Withdraw liquidity, or only collect fees
    Withdraw {
        /// Position id
        #[arg(long)]
        position_id: u64,

        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Liquidity to remove (must be 0 with --collect-fees-only)
        #[arg(long, default_value = "0")]
        liquidity: u128,

        /// Only collect accrued fees, leaving liquidity untouched
        #[arg(long)]
        collect_fees_only: bool,

        /// Floor on token0 proceeds
        #[arg(long, default_value = "0")]
        min_token0: u128,

        /// Floor on token1 proceeds
        #[arg(long, default_value = "0")]
        min_token1: u128,

        /// Print the batch instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Collect accrued fees without touching liquidity
    Collect {
        /// Position id
        #[arg(long)]
        position_id: u64,

        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Print the batch instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Transfer a position NFT
    Transfer {
        /// Position id
        #[arg(long)]
        position_id: u64,

        /// Current owner address
        #[arg(long)]
        from: String,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Print the batch instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

async fn resolve(client: &MaelstromClient, pool: &PoolArgs) -> Result<ResolvedPool> {
    Ok(client
        .pool
        .resolve_pool_key(
            &parse_token(&pool.token_a)?,
            &parse_token(&pool.token_b)?,
            pool.fee,
            pool.tick_spacing,
            None,
        )
        .await?)
}

fn bounds(range: &RangeArgs) -> Result<Bounds> {
    Ok(Bounds::new(
        Tick::from_i64(range.lower_tick),
        Tick::from_i64(range.upper_tick),
    )?)
}

pub async fn execute(cmd: LiquidityCmd, rpc_url: &str, deployment: &str) -> Result<()> {
    match cmd.command {
        LiquiditySubcommand::Create {
            pool,
            range,
            amount_a,
            amount_b,
            dry_run,
        } => {
            let client = client(rpc_url, deployment)?;
            let resolved = resolve(&client, &pool).await?;
            let bounds = bounds(&range)?;

            if dry_run {
                let batch =
                    client
                        .liquidity
                        .build_create_position(&resolved, bounds, amount_a, amount_b)?;
                return print_batch(&batch);
            }

            info("Minting position...");
            let result = client
                .liquidity
                .create_position(&resolved, bounds, amount_a, amount_b)
                .await?;
            success(&format!("Position minted! Id: {}", result.position_id));
            info(&format!("Tx: {}", result.tx_hash));
            Ok(())
        }

        LiquiditySubcommand::Add {
            position_id,
            pool,
            range,
            amount_a,
            amount_b,
            dry_run,
        } => {
            let client = client(rpc_url, deployment)?;
            let resolved = resolve(&client, &pool).await?;
            let bounds = bounds(&range)?;

            if dry_run {
                let batch = client.liquidity.build_add_liquidity(
                    position_id,
                    &resolved,
                    bounds,
                    amount_a,
                    amount_b,
                )?;
                return print_batch(&batch);
            }

            info("Depositing...");
            let result = client
                .liquidity
                .add_liquidity(position_id, &resolved, bounds, amount_a, amount_b)
                .await?;
            success(&format!("Deposit confirmed! Tx: {}", result.tx_hash));
            Ok(())
        }

        LiquiditySubcommand::Withdraw {
            position_id,
            pool,
            range,
            liquidity,
            collect_fees_only,
            min_token0,
            min_token1,
            dry_run,
        } => {
            let client = client(rpc_url, deployment)?;
            let resolved = resolve(&client, &pool).await?;
            let bounds = bounds(&range)?;

            if dry_run {
                let batch = client.liquidity.build_withdraw_liquidity(
                    position_id,
                    &resolved,
                    bounds,
                    liquidity,
                    collect_fees_only,
                    min_token0,
                    min_token1,
                )?;
                return print_batch(&batch);
            }

            info(if collect_fees_only {
                "Collecting fees..."
            } else {
                "Withdrawing liquidity..."
            });
            let result = client
                .liquidity
                .withdraw_liquidity(
                    position_id,
                    &resolved,
                    bounds,
                    liquidity,
                    collect_fees_only,
                    min_token0,
                    min_token1,
                )
                .await?;
            success(&format!("Withdraw confirmed! Tx: {}", result.tx_hash));
            Ok(())
        }

        LiquiditySubcommand::Collect {
            position_id,
            pool,
            range,
            dry_run,
        } => {
            let client = client(rpc_url, deployment)?;
            let resolved = resolve(&client, &pool).await?;
            let bounds = bounds(&range)?;

            if dry_run {
                let batch = client.liquidity.build_withdraw_liquidity(
                    position_id,
                    &resolved,
                    bounds,
                    0,
                    true,
                    0,
                    0,
                )?;
                return print_batch(&batch);
            }

            info("Collecting fees...");
            let result = client
                .liquidity
                .withdraw_liquidity(position_id, &resolved, bounds, 0, true, 0, 0)
                .await?;
            success(&format!("Fees collected! Tx: {}", result.tx_hash));
            Ok(())
        }

        LiquiditySubcommand::Transfer {
            position_id,
            from,
            to,
            dry_run,
        } => {
            let client = client(rpc_url, deployment)?;
            let from = parse_address(&from)?;
            let to = parse_address(&to)?;

            if dry_run {
                let batch = client
                    .liquidity
                    .build_transfer_position(position_id, from, to);
                return print_batch(&batch);
            }

            info("Transferring position...");
            let result = client
                .liquidity
                .transfer_position(position_id, from, to)
                .await?;
            success(&format!("Transfer confirmed! Tx: {}", result.tx_hash));
            Ok(())
        }
    }
}
