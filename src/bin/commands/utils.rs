// Utility functions for CLI commands

use anyhow::{anyhow, Context, Result};
use maelstrom_sdk::{Address, CallBatch, MaelstromClient, ProtocolConfig, TokenDescriptor};

/// Build a client for the selected deployment.
pub fn client(rpc_url: &str, deployment: &str) -> Result<MaelstromClient> {
    let config = ProtocolConfig::for_deployment(deployment)
        .ok_or_else(|| anyhow!("unknown deployment {deployment:?} (try mainnet or testnet)"))?;
    Ok(MaelstromClient::with_rpc(rpc_url, config))
}

/// Parse a token argument: 0x-prefixed addresses or plain symbols.
pub fn parse_token(s: &str) -> Result<TokenDescriptor> {
    TokenDescriptor::parse(s).context("invalid token")
}

/// Parse a 0x-prefixed address argument.
pub fn parse_address(s: &str) -> Result<Address> {
    Address::from_hex(s).context("invalid address")
}

/// Render a batch the way it will be submitted.
pub fn print_batch(batch: &CallBatch) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(batch.calls())?);
    Ok(())
}

/// Print success message with checkmark
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}
