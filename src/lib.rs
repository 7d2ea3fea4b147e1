//! SDK for interacting with the Maelstrom concentrated liquidity AMM.
//!
//! The SDK turns human-level intents (swap with bounded slippage, open or
//! drain a liquidity position) into the atomic call batches the on-chain
//! contracts expect: pre-fund the periphery with a token transfer,
//! perform the action, then clear leftovers back to the caller. All
//! numeric encodings (Q0.128 fees, signed-magnitude ticks, u256 low/high
//! pairs) are bit-exact with the protocol ABI.
//!
//! Network access sits behind the [`client::Provider`] and
//! [`client::TokenRegistry`] traits; [`client::JsonRpcProvider`] is the
//! default implementation. The SDK itself never retries and never signs —
//! the transport owns the account.

pub mod calls;
pub mod client;
pub mod core;
pub mod prelude;
pub mod protocol;

pub use client::{
    ExecutionResult, JsonRpcProvider, LiquidityService, MaelstromClient, MintResult, PoolService,
    Provider, ResolvedPool, StaticTokenRegistry, SwapPlan, SwapRequest, SwapResult, SwapService,
    TokenRegistry,
};
pub use crate::core::{
    Address, Bounds, Call, CallBatch, Confirmation, Exact, PoolKey, PoolPrice, ProtocolConfig,
    Quote, ResolvedToken, SdkError, SdkResult, SwapAmount, Tick, TokenDescriptor, TxHash,
};

/// SDK version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
