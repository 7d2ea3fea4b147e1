pub mod base;
pub mod liquidity;
pub mod pool;
pub mod rpc;
pub mod swap;
pub mod tokens;

use std::sync::Arc;

use crate::core::ProtocolConfig;

pub use base::{BaseClient, Provider, TokenRegistry};
pub use liquidity::{ExecutionResult, LiquidityService, MintResult};
pub use pool::{PoolService, ResolvedPool};
pub use rpc::JsonRpcProvider;
pub use swap::{SwapPlan, SwapRequest, SwapResult, SwapService};
pub use tokens::StaticTokenRegistry;

/// Main client with service-based architecture.
pub struct MaelstromClient {
    /// Shared provider/registry/config state.
    pub base: Arc<BaseClient>,
    /// Pool discovery and price reads.
    pub pool: PoolService,
    /// Swap construction and execution.
    pub swap: SwapService,
    /// Position lifecycle management.
    pub liquidity: LiquidityService,
}

impl MaelstromClient {
    /// Create a client from explicit collaborators.
    pub fn new(
        provider: Arc<dyn Provider>,
        registry: Arc<dyn TokenRegistry>,
        config: Arc<ProtocolConfig>,
    ) -> Self {
        let base = Arc::new(BaseClient::new(provider, registry, config));
        MaelstromClient {
            pool: PoolService::new(base.clone()),
            swap: SwapService::new(base.clone()),
            liquidity: LiquidityService::new(base.clone()),
            base,
        }
    }

    /// Create a client against a JSON-RPC endpoint with the default
    /// registry and deployment config.
    pub fn with_rpc(url: &str, config: ProtocolConfig) -> Self {
        let config = Arc::new(config);
        let provider = Arc::new(JsonRpcProvider::new(url, config.clone()));
        let registry = Arc::new(StaticTokenRegistry::mainnet());
        Self::new(provider, registry, config)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::base::{BaseClient, Provider};
    use super::tokens::StaticTokenRegistry;
    use crate::calls::{RouteNode, TokenAmount};
    use crate::core::{
        CallBatch, Confirmation, PoolKey, PoolPrice, ProtocolConfig, Quote, SdkError, SdkResult,
        TxHash,
    };

    /// Provider for tests that must never touch the network; every call
    /// fails as a transport error.
    struct OfflineProvider;

    #[async_trait]
    impl Provider for OfflineProvider {
        async fn pool_price(&self, _key: &PoolKey) -> SdkResult<PoolPrice> {
            Err(SdkError::RpcError("offline".into()))
        }

        async fn quote(&self, _node: &RouteNode, _amount: &TokenAmount) -> SdkResult<Quote> {
            Err(SdkError::RpcError("offline".into()))
        }

        async fn submit(&self, _batch: CallBatch) -> SdkResult<TxHash> {
            Err(SdkError::RpcError("offline".into()))
        }

        async fn wait_for_confirmation(&self, _tx_hash: TxHash) -> SdkResult<Confirmation> {
            Err(SdkError::RpcError("offline".into()))
        }
    }

    pub fn offline_client() -> Arc<BaseClient> {
        Arc::new(BaseClient::new(
            Arc::new(OfflineProvider),
            Arc::new(StaticTokenRegistry::mainnet()),
            Arc::new(ProtocolConfig::mainnet()),
        ))
    }
}
