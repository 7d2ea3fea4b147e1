//! Pool key resolution and price reads.

use std::sync::Arc;

use crate::prelude::*;
use tracing::debug;

use crate::client::base::BaseClient;
use crate::core::{PoolKey, PoolPrice, ResolvedToken, TokenDescriptor};
use crate::protocol::math;

/// A canonical pool key together with the resolved tokens and the mapping
/// back to the caller's ordering. `token0.address < token1.address` always
/// holds; `token_a_is_token0` records which side the first descriptor
/// passed to [`PoolService::resolve_pool_key`] landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPool {
    pub key: PoolKey,
    pub token0: ResolvedToken,
    pub token1: ResolvedToken,
    pub token_a_is_token0: bool,
}

impl ResolvedPool {
    /// Map caller-order amounts (for token A, then token B) onto
    /// (token0, token1) wire order.
    pub fn ordered_amounts(&self, amount_a: u128, amount_b: u128) -> (u128, u128) {
        if self.token_a_is_token0 {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        }
    }

    /// The token the caller called "A".
    pub fn token_a(&self) -> &ResolvedToken {
        if self.token_a_is_token0 {
            &self.token0
        } else {
            &self.token1
        }
    }

    /// The token the caller called "B".
    pub fn token_b(&self) -> &ResolvedToken {
        if self.token_a_is_token0 {
            &self.token1
        } else {
            &self.token0
        }
    }
}

/// Service for pool discovery.
pub struct PoolService {
    base: Arc<BaseClient>,
}

impl PoolService {
    pub fn new(base: Arc<BaseClient>) -> Self {
        PoolService { base }
    }

    /// Resolve two token descriptors and pool parameters into a canonical
    /// pool key. Tokens may be passed in either order; the result records
    /// which side the first one sorted onto. Pure apart from the registry
    /// lookup, so callers may cache the result for a session.
    pub async fn resolve_pool_key(
        &self,
        token_a: &TokenDescriptor,
        token_b: &TokenDescriptor,
        fee_percent: Decimal,
        tick_spacing_percent: Decimal,
        extension: Option<Address>,
    ) -> SdkResult<ResolvedPool> {
        let a = self.base.registry().resolve(token_a).await?;
        let b = self.base.registry().resolve(token_b).await?;
        if a.address == b.address {
            return Err(SdkError::InvalidPoolParameter(format!(
                "{} and {} resolve to the same token",
                token_a, token_b
            )));
        }

        let fee = math::fee_from_percent(fee_percent)?;
        let tick_spacing = math::tick_spacing_from_percent(self.base.config(), tick_spacing_percent)?;

        let token_a_is_token0 = a.address < b.address;
        let (token0, token1) = if token_a_is_token0 { (a, b) } else { (b, a) };

        let key = PoolKey {
            token0: token0.address,
            token1: token1.address,
            fee,
            tick_spacing,
            extension: extension.unwrap_or(Address::ZERO),
        };
        debug!(
            token0 = %token0.symbol,
            token1 = %token1.symbol,
            fee,
            tick_spacing,
            "resolved pool key"
        );

        Ok(ResolvedPool {
            key,
            token0,
            token1,
            token_a_is_token0,
        })
    }

    /// Current sqrt ratio and tick. Fetched fresh on every call; prices
    /// move between reads, so nothing is cached.
    pub async fn price(&self, key: &PoolKey) -> SdkResult<PoolPrice> {
        self.base.provider().pool_price(key).await
    }

    /// Human-readable token1-per-token0 price for a resolved pool.
    pub async fn price_display(&self, pool: &ResolvedPool) -> SdkResult<f64> {
        let price = self.price(&pool.key).await?;
        Ok(math::price_from_sqrt_ratio(
            price.sqrt_ratio,
            pool.token0.decimals,
            pool.token1.decimals,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::offline_client;
    use rust_decimal_macros::dec;

    fn descriptor(symbol: &str) -> TokenDescriptor {
        TokenDescriptor::Symbol(symbol.to_string())
    }

    #[tokio::test]
    async fn pool_key_is_canonical_regardless_of_argument_order() {
        let service = PoolService::new(offline_client());
        let ab = service
            .resolve_pool_key(&descriptor("ETH"), &descriptor("USDC"), dec!(0.3), dec!(0.6), None)
            .await
            .unwrap();
        let ba = service
            .resolve_pool_key(&descriptor("USDC"), &descriptor("ETH"), dec!(0.3), dec!(0.6), None)
            .await
            .unwrap();

        assert_eq!(ab.key, ba.key);
        assert!(ab.key.token0 < ab.key.token1);
        assert_eq!(ab.token_a_is_token0, !ba.token_a_is_token0);
        assert_eq!(ab.token_a().symbol, "ETH");
        assert_eq!(ba.token_a().symbol, "USDC");
    }

    #[tokio::test]
    async fn amounts_remap_to_wire_order() {
        let service = PoolService::new(offline_client());
        let pool = service
            .resolve_pool_key(&descriptor("ETH"), &descriptor("USDC"), dec!(0.3), dec!(0.6), None)
            .await
            .unwrap();
        let (amount0, amount1) = pool.ordered_amounts(111, 222);
        if pool.token_a_is_token0 {
            assert_eq!((amount0, amount1), (111, 222));
        } else {
            assert_eq!((amount0, amount1), (222, 111));
        }
    }

    #[tokio::test]
    async fn identical_tokens_are_rejected() {
        let service = PoolService::new(offline_client());
        let err = service
            .resolve_pool_key(&descriptor("ETH"), &descriptor("eth"), dec!(0.3), dec!(0.6), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidPoolParameter(_)));
    }

    #[tokio::test]
    async fn invalid_fee_is_rejected_before_any_network_use() {
        let service = PoolService::new(offline_client());
        let err = service
            .resolve_pool_key(&descriptor("ETH"), &descriptor("USDC"), dec!(120), dec!(0.6), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidPoolParameter(_)));
    }
}
