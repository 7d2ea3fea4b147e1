//! Liquidity position lifecycle: mint, deposit, withdraw, transfer.
//!
//! These services only build data structures; nothing touches the chain
//! until a batch is submitted. A position moves through
//! unminted -> minted (liquidity > 0) -> drained (liquidity == 0, id
//! retained); the client never reuses an id.

use std::sync::Arc;

use crate::prelude::*;
use tracing::info;

use crate::calls::{token, BatchBuilder, PositionCalls, WithdrawParams};
use crate::client::base::BaseClient;
use crate::client::pool::ResolvedPool;
use crate::core::{Bounds, CallBatch, Confirmation, TxHash};

/// Result of minting a new position. The id is assigned on-chain and
/// recovered from the confirmation's typed transfer-from-zero decode.
#[derive(Debug, Clone)]
pub struct MintResult {
    pub tx_hash: TxHash,
    pub position_id: u64,
}

/// Result of any non-mint position operation.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub tx_hash: TxHash,
    pub confirmation: Confirmation,
}

/// Service for liquidity management operations.
pub struct LiquidityService {
    base: Arc<BaseClient>,
}

impl LiquidityService {
    pub fn new(base: Arc<BaseClient>) -> Self {
        LiquidityService { base }
    }

    fn positions(&self) -> PositionCalls {
        PositionCalls::new(self.base.config().positions)
    }

    /// Batch for minting a new position: pre-fund both tokens, then
    /// mint-and-deposit-and-clear. Amounts arrive in the caller's
    /// (token A, token B) order and are remapped to (token0, token1).
    ///
    /// `min_liquidity` is submitted as zero, so the amount of liquidity
    /// minted for the deposited amounts has no on-chain floor; the
    /// position amounts themselves are protected by the clear behavior.
    pub fn build_create_position(
        &self,
        pool: &ResolvedPool,
        bounds: Bounds,
        amount_a: u128,
        amount_b: u128,
    ) -> SdkResult<CallBatch> {
        let bounds = Bounds::new(bounds.lower, bounds.upper)?;
        let (amount0, amount1) = pool.ordered_amounts(amount_a, amount_b);
        let positions_contract = self.base.config().positions;
        Ok(BatchBuilder::new()
            .push(token::transfer(
                pool.token0.address,
                positions_contract,
                amount0,
            ))
            .push(token::transfer(
                pool.token1.address,
                positions_contract,
                amount1,
            ))
            .push(self.positions().mint_and_deposit(&pool.key, &bounds, 0))
            .build())
    }

    /// Mint a new position and wait for the id.
    pub async fn create_position(
        &self,
        pool: &ResolvedPool,
        bounds: Bounds,
        amount_a: u128,
        amount_b: u128,
    ) -> SdkResult<MintResult> {
        let batch = self.build_create_position(pool, bounds, amount_a, amount_b)?;
        let tx_hash = self.base.provider().submit(batch).await?;
        info!(%tx_hash, "submitted position mint");
        let confirmation = self.base.provider().wait_for_confirmation(tx_hash).await?;
        if !confirmation.succeeded {
            return Err(SdkError::TransactionFailed(
                confirmation
                    .revert_reason
                    .unwrap_or_else(|| "position mint reverted without a reason".to_string()),
            ));
        }
        let position_id = confirmation.minted_position_id.ok_or_else(|| {
            SdkError::RpcError("confirmation did not include a minted position id".to_string())
        })?;
        Ok(MintResult {
            tx_hash,
            position_id,
        })
    }

    /// Batch for depositing into an existing position: pre-fund both
    /// tokens, deposit, then clear both leftovers back to the caller.
    /// Same zero `min_liquidity` caveat as minting.
    pub fn build_add_liquidity(
        &self,
        position_id: u64,
        pool: &ResolvedPool,
        bounds: Bounds,
        amount_a: u128,
        amount_b: u128,
    ) -> SdkResult<CallBatch> {
        let bounds = Bounds::new(bounds.lower, bounds.upper)?;
        let (amount0, amount1) = pool.ordered_amounts(amount_a, amount_b);
        let positions_contract = self.base.config().positions;
        let positions = self.positions();
        Ok(BatchBuilder::new()
            .push(token::transfer(
                pool.token0.address,
                positions_contract,
                amount0,
            ))
            .push(token::transfer(
                pool.token1.address,
                positions_contract,
                amount1,
            ))
            .push(positions.deposit(position_id, &pool.key, &bounds, 0))
            .push(positions.clear(pool.token0.address))
            .push(positions.clear(pool.token1.address))
            .build())
    }

    /// Deposit into an existing position and wait for confirmation.
    pub async fn add_liquidity(
        &self,
        position_id: u64,
        pool: &ResolvedPool,
        bounds: Bounds,
        amount_a: u128,
        amount_b: u128,
    ) -> SdkResult<ExecutionResult> {
        let batch = self.build_add_liquidity(position_id, pool, bounds, amount_a, amount_b)?;
        self.execute(batch, "position deposit").await
    }

    /// Batch for withdrawing liquidity or collecting fees.
    ///
    /// With `collect_fees_only`, `liquidity` must be zero and the batch is
    /// a single fee-collection call. Otherwise a single withdraw call
    /// removes `liquidity`, collects fees alongside, and enforces the
    /// given per-token minimums on proceeds.
    pub fn build_withdraw_liquidity(
        &self,
        position_id: u64,
        pool: &ResolvedPool,
        bounds: Bounds,
        liquidity: u128,
        collect_fees_only: bool,
        min_token0: u128,
        min_token1: u128,
    ) -> SdkResult<CallBatch> {
        let bounds = Bounds::new(bounds.lower, bounds.upper)?;
        if collect_fees_only && liquidity != 0 {
            return Err(SdkError::InvalidWithdrawRequest(format!(
                "collect-fees-only withdraw must not remove liquidity (got {liquidity})"
            )));
        }
        let positions = self.positions();
        let call = if collect_fees_only {
            positions.collect_fees(position_id, &pool.key, &bounds)
        } else {
            positions.withdraw(
                &pool.key,
                &bounds,
                &WithdrawParams {
                    id: position_id,
                    liquidity,
                    min_token0,
                    min_token1,
                    collect_fees: true,
                },
            )
        };
        Ok(BatchBuilder::new().push(call).build())
    }

    /// Withdraw liquidity (or only collect fees) and wait for
    /// confirmation.
    #[allow(clippy::too_many_arguments)]
    pub async fn withdraw_liquidity(
        &self,
        position_id: u64,
        pool: &ResolvedPool,
        bounds: Bounds,
        liquidity: u128,
        collect_fees_only: bool,
        min_token0: u128,
        min_token1: u128,
    ) -> SdkResult<ExecutionResult> {
        let batch = self.build_withdraw_liquidity(
            position_id,
            pool,
            bounds,
            liquidity,
            collect_fees_only,
            min_token0,
            min_token1,
        )?;
        self.execute(batch, "position withdraw").await
    }

    /// Batch for transferring the position NFT. No numeric logic.
    pub fn build_transfer_position(&self, position_id: u64, from: Address, to: Address) -> CallBatch {
        BatchBuilder::new()
            .push(self.positions().transfer_position(from, to, position_id))
            .build()
    }

    /// Transfer the position NFT and wait for confirmation.
    pub async fn transfer_position(
        &self,
        position_id: u64,
        from: Address,
        to: Address,
    ) -> SdkResult<ExecutionResult> {
        let batch = self.build_transfer_position(position_id, from, to);
        self.execute(batch, "position transfer").await
    }

    async fn execute(&self, batch: CallBatch, label: &str) -> SdkResult<ExecutionResult> {
        let tx_hash = self.base.provider().submit(batch).await?;
        info!(%tx_hash, "submitted {}", label);
        let confirmation = self.base.provider().wait_for_confirmation(tx_hash).await?;
        if !confirmation.succeeded {
            return Err(SdkError::TransactionFailed(
                confirmation
                    .revert_reason
                    .unwrap_or_else(|| format!("{label} reverted without a reason")),
            ));
        }
        Ok(ExecutionResult {
            tx_hash,
            confirmation,
        })
    }
}
