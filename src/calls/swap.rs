//! Calls against the swap router.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::core::{Address, Call, Exact, PoolKey, SwapAmount};
use crate::protocol::abi::{entrypoints, Calldata};

use super::CallBuilder;

/// A single hop of a swap route: the pool, the price limit the swap may
/// not cross, and a skip-ahead hint for the on-chain tick search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub pool_key: PoolKey,
    pub sqrt_ratio_limit: U256,
    pub skip_ahead: u128,
}

/// The traded token and its amount. The exact-input/exact-output intent
/// decides the wire sign: exact-output encodes as a negative i129.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: Address,
    pub amount: SwapAmount,
}

/// Builder for router calls.
#[derive(Debug, Clone, Copy)]
pub struct RouterCalls {
    router: Address,
}

impl RouterCalls {
    pub fn new(router: Address) -> Self {
        RouterCalls { router }
    }

    /// Swap against one route node. Calldata order: pool key, sqrt ratio
    /// limit (u256), skip-ahead, token, amount (i129).
    pub fn swap(&self, node: &RouteNode, token_amount: &TokenAmount) -> Call {
        let negative = matches!(token_amount.amount.exact, Exact::Output);
        CallBuilder::new(self.router, entrypoints::SWAP)
            .with_calldata(
                Calldata::new()
                    .pool_key(&node.pool_key)
                    .u256(node.sqrt_ratio_limit)
                    .u128(node.skip_ahead)
                    .address(token_amount.token)
                    .i129(token_amount.amount.magnitude, negative),
            )
            .build()
    }

    /// Sweep a token balance held by the router back to the caller.
    pub fn clear(&self, token: Address) -> Call {
        CallBuilder::new(self.router, entrypoints::CLEAR)
            .with_calldata(Calldata::new().address(token))
            .build()
    }

    /// Sweep, reverting the whole batch unless at least `minimum` comes
    /// back. This is the on-chain enforcement of the slippage bound.
    pub fn clear_minimum(&self, token: Address, minimum: u128) -> Call {
        CallBuilder::new(self.router, entrypoints::CLEAR_MINIMUM)
            .with_calldata(
                Calldata::new()
                    .address(token)
                    .u256(U256::from(minimum)),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> RouteNode {
        RouteNode {
            pool_key: PoolKey {
                token0: Address::new(U256::from(1u8)).unwrap(),
                token1: Address::new(U256::from(2u8)).unwrap(),
                fee: 3,
                tick_spacing: 4,
                extension: Address::ZERO,
            },
            sqrt_ratio_limit: U256::from(1_000_000u64),
            skip_ahead: 0,
        }
    }

    #[test]
    fn swap_calldata_layout() {
        let router = Address::new(U256::from(9u8)).unwrap();
        let call = RouterCalls::new(router).swap(
            &node(),
            &TokenAmount {
                token: Address::new(U256::from(1u8)).unwrap(),
                amount: SwapAmount::exact_in(500),
            },
        );
        // 5 key + 2 limit + skip_ahead + token + 2 amount
        assert_eq!(call.calldata.len(), 11);
        assert_eq!(call.calldata[5], U256::from(1_000_000u64)); // limit low
        assert_eq!(call.calldata[6], U256::ZERO); // limit high
        assert_eq!(call.calldata[9], U256::from(500u64)); // magnitude
        assert_eq!(call.calldata[10], U256::ZERO); // exact-in: positive
    }

    #[test]
    fn exact_output_encodes_negative_amount() {
        let router = Address::new(U256::from(9u8)).unwrap();
        let call = RouterCalls::new(router).swap(
            &node(),
            &TokenAmount {
                token: Address::new(U256::from(2u8)).unwrap(),
                amount: SwapAmount::exact_out(500),
            },
        );
        assert_eq!(call.calldata[10], U256::from(1u8));
    }

    #[test]
    fn clear_minimum_carries_u256_floor() {
        let router = Address::new(U256::from(9u8)).unwrap();
        let token = Address::new(U256::from(2u8)).unwrap();
        let call = RouterCalls::new(router).clear_minimum(token, 995_000);
        assert_eq!(call.entrypoint, "clear_minimum");
        assert_eq!(
            call.calldata,
            vec![U256::from(2u8), U256::from(995_000u64), U256::ZERO]
        );
    }
}
