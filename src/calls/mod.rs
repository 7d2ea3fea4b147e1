//! Call construction: single-call builders plus the atomic batch
//! assembler.

pub mod builder;
pub mod positions;
pub mod swap;
pub mod token;

pub use builder::CallBuilder;
pub use positions::{PositionCalls, WithdrawParams};
pub use swap::{RouteNode, RouterCalls, TokenAmount};

use crate::core::{Call, CallBatch};

/// Assembles the ordered pre-fund → act → clear sequence into an
/// immutable batch. The transport submits the result as one
/// all-or-nothing transaction; once built, a batch is never modified.
#[derive(Debug, Default)]
pub struct BatchBuilder {
    calls: Vec<Call>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, call: Call) -> Self {
        self.calls.push(call);
        self
    }

    pub fn build(self) -> CallBatch {
        CallBatch::new(self.calls)
    }
}
