//! Position lifecycle example: build the mint, deposit and withdraw
//! batches for a concentrated liquidity position.
//!
//! Batch construction is pure, so this example runs without a node; the
//! submission calls are shown commented out.

use maelstrom_sdk::{
    Bounds, MaelstromClient, ProtocolConfig, Tick, TokenDescriptor,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = MaelstromClient::with_rpc("http://localhost:5050", ProtocolConfig::mainnet());

    let pool = client
        .pool
        .resolve_pool_key(
            &TokenDescriptor::Symbol("ETH".into()),
            &TokenDescriptor::Symbol("USDC".into()),
            "0.3".parse()?,
            "0.6".parse()?,
            None,
        )
        .await?;

    // Provide liquidity between ticks -60000 and 60000.
    let bounds = Bounds::new(Tick::from_i64(-60_000), Tick::from_i64(60_000))?;

    // Mint: transfer both tokens to the positions contract, then
    // mint-and-deposit-and-clear. The position id arrives with the
    // confirmation.
    let mint = client.liquidity.build_create_position(
        &pool,
        bounds,
        1_000_000_000_000_000_000, // 1 ETH
        2_000_000_000,             // 2000 USDC
    )?;
    println!("Mint batch ({} calls):", mint.len());
    println!("{}", serde_json::to_string_pretty(mint.calls())?);
    // let minted = client.liquidity.create_position(&pool, bounds, ..).await?;

    // Top up an existing position; leftovers are cleared back.
    let add = client
        .liquidity
        .build_add_liquidity(42, &pool, bounds, 500_000_000_000_000_000, 1_000_000_000)?;
    println!("\nAdd batch ({} calls):", add.len());
    println!("{}", serde_json::to_string_pretty(add.calls())?);

    // Collect fees without touching liquidity.
    let collect = client
        .liquidity
        .build_withdraw_liquidity(42, &pool, bounds, 0, true, 0, 0)?;
    println!("\nCollect-fees batch ({} calls):", collect.len());
    println!("{}", serde_json::to_string_pretty(collect.calls())?);

    // Drain the position.
    let withdraw = client
        .liquidity
        .build_withdraw_liquidity(42, &pool, bounds, 123_456_789, false, 0, 0)?;
    println!("\nWithdraw batch ({} calls):", withdraw.len());
    println!("{}", serde_json::to_string_pretty(withdraw.calls())?);

    Ok(())
}
