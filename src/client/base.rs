//! The seams to the outside world.
//!
//! Everything the SDK consumes from the network sits behind the
//! [`Provider`] and [`TokenRegistry`] traits: price reads, dry-run
//! quotes, batch submission, confirmation (including the typed minted
//! position id, which the transport decodes from the transfer-from-zero
//! event), and token metadata. The core never performs I/O of its own
//! and never retries; callers wrapping these methods should consult
//! [`SdkError::is_retryable`](crate::core::SdkError::is_retryable)
//! before doing so.

use std::sync::Arc;

use async_trait::async_trait;

use crate::calls::{RouteNode, TokenAmount};
use crate::core::{
    CallBatch, Confirmation, PoolKey, PoolPrice, ProtocolConfig, Quote, ResolvedToken, SdkResult,
    TokenDescriptor, TxHash,
};

/// Read and submission access to the chain.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Current price state for a pool. Must fail with
    /// `SdkError::PoolNotFound` when no pool exists for the key, as
    /// opposed to a transport error.
    async fn pool_price(&self, key: &PoolKey) -> SdkResult<PoolPrice>;

    /// Read-only swap simulation. No state changes on-chain.
    async fn quote(&self, node: &RouteNode, amount: &TokenAmount) -> SdkResult<Quote>;

    /// Submit an atomic batch. Once broadcast, the transaction either
    /// lands in full or is rejected in full; cancellation after this
    /// point has no effect.
    async fn submit(&self, batch: CallBatch) -> SdkResult<TxHash>;

    /// Wait until the transaction is final. Implementations decode the
    /// position-NFT transfer-from-zero event into
    /// `Confirmation::minted_position_id`.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> SdkResult<Confirmation>;
}

/// Token metadata lookup.
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    async fn resolve(&self, descriptor: &TokenDescriptor) -> SdkResult<ResolvedToken>;
}

/// Shared state handed to every service: the provider, the token
/// registry, and the deployment configuration.
pub struct BaseClient {
    provider: Arc<dyn Provider>,
    registry: Arc<dyn TokenRegistry>,
    config: Arc<ProtocolConfig>,
}

impl BaseClient {
    pub fn new(
        provider: Arc<dyn Provider>,
        registry: Arc<dyn TokenRegistry>,
        config: Arc<ProtocolConfig>,
    ) -> Self {
        BaseClient {
            provider,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn registry(&self) -> &dyn TokenRegistry {
        self.registry.as_ref()
    }
}
