//! Swap flow example: build a slippage-bounded swap batch and inspect it.
//!
//! The batch follows the pre-fund -> act -> clear pattern: transfer the
//! input token to the router, swap with a direction-correct price limit,
//! then clear-minimum enforces the slippage floor on-chain.

use maelstrom_sdk::{
    MaelstromClient, ProtocolConfig, SwapAmount, SwapRequest, TokenDescriptor,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = MaelstromClient::with_rpc("http://localhost:5050", ProtocolConfig::mainnet());

    // Sell 0.5 ETH for USDC, tolerating 0.5% slippage.
    let request = SwapRequest {
        token_in: TokenDescriptor::Symbol("ETH".into()),
        token_out: TokenDescriptor::Symbol("USDC".into()),
        fee_percent: "0.3".parse()?,
        tick_spacing_percent: "0.6".parse()?,
        amount: SwapAmount::exact_in(500_000_000_000_000_000),
        slippage_percent: "0.5".parse()?,
        extension: None,
    };

    match client.swap.build_swap(&request).await {
        Ok(plan) => {
            println!(
                "Selling {} ({})",
                plan.pool.token_a().symbol,
                if plan.is_selling_token0 {
                    "price limit below current"
                } else {
                    "price limit above current"
                }
            );
            println!("Expected out: {}", plan.expected_out);
            println!("Minimum out:  {}", plan.min_out);
            println!("Batch:");
            println!("{}", serde_json::to_string_pretty(plan.batch.calls())?);

            // To submit instead: client.swap.swap(&request).await?
        }
        Err(e) => {
            println!("Could not build swap: {e}");
            if e.is_retryable() {
                println!("(transport failure; retrying may help)");
            }
        }
    }

    Ok(())
}
