//! Basic usage example for the Maelstrom SDK
//!
//! This example demonstrates:
//! - Creating a client
//! - Resolving a canonical pool key
//! - Reading pool prices

use maelstrom_sdk::{MaelstromClient, ProtocolConfig, TokenDescriptor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create client against a local node
    let client = MaelstromClient::with_rpc("http://localhost:5050", ProtocolConfig::mainnet());

    // Resolve the canonical key for an ETH/USDC pool with a 0.3% fee and
    // 0.6% tick spacing. Argument order does not matter; the resolver
    // sorts the pair and remembers which side was which.
    let eth = TokenDescriptor::Symbol("ETH".into());
    let usdc = TokenDescriptor::Symbol("USDC".into());
    let pool = client
        .pool
        .resolve_pool_key(&eth, &usdc, "0.3".parse()?, "0.6".parse()?, None)
        .await?;

    println!("Pool key:");
    println!("  token0: {} ({})", pool.token0.symbol, pool.token0.address);
    println!("  token1: {} ({})", pool.token1.symbol, pool.token1.address);
    println!("  fee: {}", pool.key.fee);
    println!("  tick spacing: {}", pool.key.tick_spacing);

    // Read the current price (requires a running node with this pool)
    match client.pool.price(&pool.key).await {
        Ok(price) => {
            println!("Sqrt ratio: {:#x}", price.sqrt_ratio);
            println!("Tick: {}", price.tick);
            let display = client.pool.price_display(&pool).await?;
            println!(
                "Price: {display} {} per {}",
                pool.token1.symbol, pool.token0.symbol
            );
        }
        Err(e) => {
            println!("Price read failed: {e}");
        }
    }

    println!("\nSDK Version: {}", maelstrom_sdk::VERSION);

    Ok(())
}
