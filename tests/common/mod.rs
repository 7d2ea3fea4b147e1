//! Shared mock transport for batch-construction tests.

use std::sync::{Arc, Mutex};

use alloy_primitives::U256;
use async_trait::async_trait;
use maelstrom_sdk::calls::{RouteNode, TokenAmount};
use maelstrom_sdk::{
    CallBatch, Confirmation, MaelstromClient, PoolKey, PoolPrice, ProtocolConfig, Provider, Quote,
    SdkError, SdkResult, StaticTokenRegistry, Tick, TxHash,
};
use rust_decimal_macros::dec;

/// Canned chain state: one pool, one quote, one confirmation. Submitted
/// batches are recorded for inspection.
pub struct MockProvider {
    pub sqrt_ratio: U256,
    pub tick: Tick,
    pub quote: Quote,
    pub pool_exists: bool,
    pub succeed: bool,
    pub minted_position_id: Option<u64>,
    pub submitted: Mutex<Vec<CallBatch>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        MockProvider {
            // 1.0 in Q64.128
            sqrt_ratio: U256::from(1u8) << 128,
            tick: Tick::from_i64(0),
            quote: Quote {
                delta0: 0,
                delta1: 0,
            },
            pool_exists: true,
            succeed: true,
            minted_position_id: None,
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn pool_price(&self, _key: &PoolKey) -> SdkResult<PoolPrice> {
        if !self.pool_exists {
            return Err(SdkError::PoolNotFound {
                fee_percent: dec!(0.3),
                tick_spacing_percent: dec!(0.6),
            });
        }
        Ok(PoolPrice {
            sqrt_ratio: self.sqrt_ratio,
            tick: self.tick,
        })
    }

    async fn quote(&self, _node: &RouteNode, _amount: &TokenAmount) -> SdkResult<Quote> {
        Ok(self.quote)
    }

    async fn submit(&self, batch: CallBatch) -> SdkResult<TxHash> {
        self.submitted.lock().unwrap().push(batch);
        Ok(TxHash(U256::from(0xabcdu64)))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> SdkResult<Confirmation> {
        Ok(Confirmation {
            tx_hash,
            succeeded: self.succeed,
            revert_reason: if self.succeed {
                None
            } else {
                Some("minimum amount not cleared".to_string())
            },
            minted_position_id: self.minted_position_id,
        })
    }
}

pub fn client_with(provider: MockProvider) -> (MaelstromClient, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let client = MaelstromClient::new(
        provider.clone(),
        Arc::new(StaticTokenRegistry::mainnet()),
        Arc::new(ProtocolConfig::mainnet()),
    );
    (client, provider)
}
