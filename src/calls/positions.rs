//! Calls against the positions periphery contract.
//!
//! The periphery owns the position NFT and performs deposits/withdrawals
//! on behalf of the caller. Token funding arrives via plain ERC-20
//! transfers in the same batch; `clear` calls return whatever the deposit
//! did not consume.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::core::{Address, Bounds, Call, PoolKey};
use crate::protocol::abi::{entrypoints, Calldata};

use super::CallBuilder;

/// Parameters for removing liquidity from a position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WithdrawParams {
    pub id: u64,
    pub liquidity: u128,
    /// Floor on token0 proceeds; the chain reverts below it.
    pub min_token0: u128,
    /// Floor on token1 proceeds; the chain reverts below it.
    pub min_token1: u128,
    /// Collect accrued fees in the same call.
    pub collect_fees: bool,
}

/// Builder for position lifecycle calls.
#[derive(Debug, Clone, Copy)]
pub struct PositionCalls {
    positions: Address,
}

impl PositionCalls {
    pub fn new(positions: Address) -> Self {
        PositionCalls { positions }
    }

    /// Mint a new position NFT, deposit both pre-funded tokens, and refund
    /// leftovers. The minted id is only known once the transaction
    /// confirms.
    ///
    /// `min_liquidity` bounds how little liquidity the deposit may mint;
    /// the services currently pass zero, which leaves that side
    /// unprotected.
    pub fn mint_and_deposit(
        &self,
        pool_key: &PoolKey,
        bounds: &Bounds,
        min_liquidity: u128,
    ) -> Call {
        CallBuilder::new(self.positions, entrypoints::MINT_AND_DEPOSIT)
            .with_calldata(
                Calldata::new()
                    .pool_key(pool_key)
                    .bounds(bounds)
                    .u128(min_liquidity),
            )
            .build()
    }

    /// Deposit pre-funded tokens into an existing position.
    pub fn deposit(
        &self,
        id: u64,
        pool_key: &PoolKey,
        bounds: &Bounds,
        min_liquidity: u128,
    ) -> Call {
        CallBuilder::new(self.positions, entrypoints::DEPOSIT)
            .with_calldata(
                Calldata::new()
                    .u64(id)
                    .pool_key(pool_key)
                    .bounds(bounds)
                    .u128(min_liquidity),
            )
            .build()
    }

    /// Remove liquidity, sending proceeds (and optionally fees) back to
    /// the caller.
    pub fn withdraw(&self, pool_key: &PoolKey, bounds: &Bounds, params: &WithdrawParams) -> Call {
        CallBuilder::new(self.positions, entrypoints::WITHDRAW)
            .with_calldata(
                Calldata::new()
                    .u64(params.id)
                    .pool_key(pool_key)
                    .bounds(bounds)
                    .u128(params.liquidity)
                    .u128(params.min_token0)
                    .u128(params.min_token1)
                    .bool(params.collect_fees),
            )
            .build()
    }

    /// Collect accrued fees without touching liquidity.
    pub fn collect_fees(&self, id: u64, pool_key: &PoolKey, bounds: &Bounds) -> Call {
        CallBuilder::new(self.positions, entrypoints::COLLECT_FEES)
            .with_calldata(Calldata::new().u64(id).pool_key(pool_key).bounds(bounds))
            .build()
    }

    /// Transfer the position NFT. No numeric logic; the id travels as a
    /// u256 per the NFT interface.
    pub fn transfer_position(&self, from: Address, to: Address, id: u64) -> Call {
        CallBuilder::new(self.positions, entrypoints::NFT_TRANSFER_FROM)
            .with_calldata(
                Calldata::new()
                    .address(from)
                    .address(to)
                    .u256(U256::from(id)),
            )
            .build()
    }

    /// Sweep a token balance held by the periphery back to the caller.
    pub fn clear(&self, token: Address) -> Call {
        CallBuilder::new(self.positions, entrypoints::CLEAR)
            .with_calldata(Calldata::new().address(token))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tick;

    fn key() -> PoolKey {
        PoolKey {
            token0: Address::new(U256::from(1u8)).unwrap(),
            token1: Address::new(U256::from(2u8)).unwrap(),
            fee: 10,
            tick_spacing: 20,
            extension: Address::ZERO,
        }
    }

    fn bounds() -> Bounds {
        Bounds::new(Tick::from_i64(-100), Tick::from_i64(100)).unwrap()
    }

    #[test]
    fn mint_calldata_is_key_bounds_min_liquidity() {
        let positions = Address::new(U256::from(7u8)).unwrap();
        let call = PositionCalls::new(positions).mint_and_deposit(&key(), &bounds(), 0);
        assert_eq!(call.entrypoint, "mint_and_deposit_and_clear_both");
        // 5 pool key felts + 4 bounds felts + min_liquidity
        assert_eq!(call.calldata.len(), 10);
        assert_eq!(call.calldata[9], U256::ZERO);
    }

    #[test]
    fn withdraw_calldata_order() {
        let positions = Address::new(U256::from(7u8)).unwrap();
        let call = PositionCalls::new(positions).withdraw(
            &key(),
            &bounds(),
            &WithdrawParams {
                id: 42,
                liquidity: 5000,
                min_token0: 1,
                min_token1: 2,
                collect_fees: true,
            },
        );
        assert_eq!(call.calldata[0], U256::from(42u8));
        // id + 5 key + 4 bounds + liquidity + min0 + min1 + flag
        assert_eq!(call.calldata.len(), 14);
        assert_eq!(call.calldata[10], U256::from(5000u64));
        assert_eq!(call.calldata[13], U256::from(1u8));
    }

    #[test]
    fn transfer_position_uses_u256_id() {
        let positions = Address::new(U256::from(7u8)).unwrap();
        let from = Address::new(U256::from(3u8)).unwrap();
        let to = Address::new(U256::from(4u8)).unwrap();
        let call = PositionCalls::new(positions).transfer_position(from, to, 9);
        assert_eq!(call.entrypoint, "transferFrom");
        assert_eq!(
            call.calldata,
            vec![
                U256::from(3u8),
                U256::from(4u8),
                U256::from(9u8),
                U256::ZERO,
            ]
        );
    }
}
