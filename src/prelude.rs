//! Prelude module for common imports
//!
//! Consolidates the types nearly every module touches: the 256-bit integer
//! used for felts and sqrt ratios, the exact decimal type used for
//! percentages, and the SDK error/result pair.

pub use alloy_primitives::U256;
pub use rust_decimal::Decimal;

pub use crate::core::{Address, SdkError, SdkResult};
