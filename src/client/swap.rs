//! Slippage-bounded swap construction and execution.

use std::sync::Arc;

use crate::prelude::*;
use tracing::{debug, info};

use crate::calls::{token, BatchBuilder, RouteNode, RouterCalls, TokenAmount};
use crate::client::base::BaseClient;
use crate::client::pool::{PoolService, ResolvedPool};
use crate::core::{CallBatch, Confirmation, Exact, Quote, SwapAmount, TokenDescriptor, TxHash};
use crate::protocol::math;

/// Everything needed to construct a swap batch.
#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub token_in: TokenDescriptor,
    pub token_out: TokenDescriptor,
    pub fee_percent: Decimal,
    pub tick_spacing_percent: Decimal,
    pub amount: SwapAmount,
    pub slippage_percent: Decimal,
    pub extension: Option<Address>,
}

/// A fully-built swap: the batch plus the numbers that went into it, for
/// display and for asserting the slippage bound that the chain will
/// enforce via clear-minimum.
#[derive(Debug, Clone)]
pub struct SwapPlan {
    pub batch: CallBatch,
    pub pool: ResolvedPool,
    pub is_selling_token0: bool,
    pub sqrt_ratio_limit: U256,
    pub quote: Quote,
    /// Simulated proceeds in the output token.
    pub expected_out: u128,
    /// Floor enforced on-chain; below it the whole batch reverts.
    pub min_out: u128,
    /// Amount of the input token pre-funded to the router.
    pub transfer_in: u128,
}

/// Result of submitting a swap.
#[derive(Debug, Clone)]
pub struct SwapResult {
    pub tx_hash: TxHash,
    pub confirmation: Confirmation,
    pub expected_out: u128,
    pub min_out: u128,
}

/// Service for swap operations.
pub struct SwapService {
    base: Arc<BaseClient>,
}

impl SwapService {
    pub fn new(base: Arc<BaseClient>) -> Self {
        SwapService { base }
    }

    /// Build a slippage-bounded swap batch without submitting it.
    ///
    /// Selling token0 moves the sqrt ratio down, so the price limit sits
    /// below the current value; selling token1 moves it up. The dry-run
    /// quote provides the expected proceeds, and the truncated
    /// minimum-output floor goes into the clear-minimum call that makes
    /// the bound binding on-chain.
    pub async fn build_swap(&self, request: &SwapRequest) -> SdkResult<SwapPlan> {
        math::validate_slippage(request.slippage_percent)?;

        let pools = PoolService::new(self.base.clone());
        let pool = pools
            .resolve_pool_key(
                &request.token_in,
                &request.token_out,
                request.fee_percent,
                request.tick_spacing_percent,
                request.extension,
            )
            .await?;
        let is_selling_token0 = pool.token_a_is_token0;
        let token_in = pool.token_a().address;
        let token_out = pool.token_b().address;

        let price = self.base.provider().pool_price(&pool.key).await?;
        let limit = math::sqrt_ratio_limit(
            self.base.config(),
            price.sqrt_ratio,
            request.slippage_percent,
            is_selling_token0,
        )?;
        debug!(
            current = %price.sqrt_ratio,
            limit = %limit,
            is_selling_token0,
            "computed price limit"
        );

        let node = RouteNode {
            pool_key: pool.key,
            sqrt_ratio_limit: limit,
            skip_ahead: 0,
        };
        let token_amount = match request.amount.exact {
            Exact::Input => TokenAmount {
                token: token_in,
                amount: request.amount,
            },
            Exact::Output => TokenAmount {
                token: token_out,
                amount: request.amount,
            },
        };

        let quote = self.base.provider().quote(&node, &token_amount).await?;
        let expected_out = expected_delta(&quote, &pool, token_out, Direction::OutOfPool)?;

        let (transfer_in, min_out) = match request.amount.exact {
            Exact::Input => (
                request.amount.magnitude,
                math::min_amount_out(expected_out, request.slippage_percent)?,
            ),
            Exact::Output => {
                // The quote tells us how much input the exact output costs;
                // pre-fund with slippage headroom and let the final clear
                // refund whatever the swap does not consume.
                let expected_in = expected_delta(&quote, &pool, token_in, Direction::IntoPool)?;
                (
                    math::max_amount_in(expected_in, request.slippage_percent)?,
                    request.amount.magnitude,
                )
            }
        };

        let router = RouterCalls::new(self.base.config().router);
        let mut builder = BatchBuilder::new()
            .push(token::transfer(
                token_in,
                self.base.config().router,
                transfer_in,
            ))
            .push(router.swap(&node, &token_amount))
            .push(router.clear_minimum(token_out, min_out))
            .push(router.clear(token_out));
        if matches!(request.amount.exact, Exact::Output) {
            builder = builder.push(router.clear(token_in));
        }
        let batch = builder.build();

        Ok(SwapPlan {
            batch,
            pool,
            is_selling_token0,
            sqrt_ratio_limit: limit,
            quote,
            expected_out,
            min_out,
            transfer_in,
        })
    }

    /// Build, submit and confirm a swap.
    pub async fn swap(&self, request: &SwapRequest) -> SdkResult<SwapResult> {
        let plan = self.build_swap(request).await?;
        let tx_hash = self.base.provider().submit(plan.batch.clone()).await?;
        info!(%tx_hash, min_out = plan.min_out, "submitted swap");
        let confirmation = self.base.provider().wait_for_confirmation(tx_hash).await?;
        if !confirmation.succeeded {
            return Err(SdkError::TransactionFailed(
                confirmation
                    .revert_reason
                    .unwrap_or_else(|| "swap reverted without a reason".to_string()),
            ));
        }
        Ok(SwapResult {
            tx_hash,
            confirmation,
            expected_out: plan.expected_out,
            min_out: plan.min_out,
        })
    }
}

enum Direction {
    IntoPool,
    OutOfPool,
}

/// Pull the delta for one token out of a quote. Pool-receives is
/// positive, pool-pays is negative; a zero or wrong-signed delta means
/// the simulation found no usable route.
fn expected_delta(
    quote: &Quote,
    pool: &ResolvedPool,
    token: Address,
    direction: Direction,
) -> SdkResult<u128> {
    let delta = if token == pool.token0.address {
        quote.delta0
    } else {
        quote.delta1
    };
    match direction {
        Direction::OutOfPool if delta < 0 => Ok(delta.unsigned_abs()),
        Direction::IntoPool if delta > 0 => Ok(delta as u128),
        _ => Err(SdkError::InsufficientQuote(format!(
            "simulation returned no usable amount for token {token}"
        ))),
    }
}
