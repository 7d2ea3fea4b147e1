//! Felt-level calldata encoding.
//!
//! The chain accepts calldata as a flat array of field elements in the
//! exact order the contract interface declares. This module owns that
//! ordering: u256 values travel as a low/high pair, signed-magnitude
//! values as a magnitude felt followed by a sign felt, pool keys and
//! bounds in their declared field order. Byte-for-byte conformance is
//! required; there are no compatibility shims.

use alloy_primitives::U256;

use crate::core::{Address, Bounds, PoolKey, Tick, FIELD_PRIME};

/// Entrypoint names understood by the protocol contracts. The transport
/// maps names to selectors when it encodes the transaction envelope.
pub mod entrypoints {
    /// ERC-20 transfer, used to pre-fund a periphery contract.
    pub const TRANSFER: &str = "transfer";
    /// Position NFT transfer.
    pub const NFT_TRANSFER_FROM: &str = "transferFrom";
    /// Mint a position NFT, deposit both tokens, refund leftovers.
    pub const MINT_AND_DEPOSIT: &str = "mint_and_deposit_and_clear_both";
    /// Deposit into an existing position.
    pub const DEPOSIT: &str = "deposit";
    /// Remove liquidity (optionally collecting fees in the same call).
    pub const WITHDRAW: &str = "withdraw";
    /// Collect accrued fees without touching liquidity.
    pub const COLLECT_FEES: &str = "collect_fees";
    /// Execute a swap against a single route node.
    pub const SWAP: &str = "swap";
    /// Sweep a token balance held by a periphery contract back to the caller.
    pub const CLEAR: &str = "clear";
    /// Sweep, reverting unless at least the given amount is returned.
    pub const CLEAR_MINIMUM: &str = "clear_minimum";
}

/// Calldata under construction. Append-only; field order is the caller's
/// responsibility and must follow the contract interface.
#[derive(Debug, Default, Clone)]
pub struct Calldata {
    felts: Vec<U256>,
}

impl Calldata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn felt(mut self, value: U256) -> Self {
        debug_assert!(value < FIELD_PRIME, "calldata felt out of field range");
        self.felts.push(value);
        self
    }

    pub fn address(self, address: Address) -> Self {
        self.felt(address.felt())
    }

    pub fn bool(self, value: bool) -> Self {
        self.felt(U256::from(value as u8))
    }

    pub fn u64(self, value: u64) -> Self {
        self.felt(U256::from(value))
    }

    pub fn u128(self, value: u128) -> Self {
        self.felt(U256::from(value))
    }

    /// u256 as a (low, high) pair of 128-bit felts, low first.
    pub fn u256(self, value: U256) -> Self {
        let low = value & U256::from(u128::MAX);
        let high = value >> 128;
        self.felt(low).felt(high)
    }

    /// Signed-magnitude i129: magnitude felt, then sign felt (1 when
    /// negative). A zero magnitude always encodes a zero sign.
    pub fn i129(self, magnitude: u128, negative: bool) -> Self {
        self.u128(magnitude).bool(negative && magnitude != 0)
    }

    pub fn tick(self, tick: Tick) -> Self {
        self.i129(tick.magnitude, tick.negative)
    }

    /// Pool key in declared order: token0, token1, fee, tick_spacing,
    /// extension.
    pub fn pool_key(self, key: &PoolKey) -> Self {
        self.address(key.token0)
            .address(key.token1)
            .u128(key.fee)
            .u64(key.tick_spacing as u64)
            .address(key.extension)
    }

    /// Bounds in declared order: lower {mag, sign}, upper {mag, sign}.
    pub fn bounds(self, bounds: &Bounds) -> Self {
        self.tick(bounds.lower).tick(bounds.upper)
    }

    pub fn into_vec(self) -> Vec<U256> {
        self.felts
    }
}
