//! Wire-level data model shared by every component.
//!
//! Numeric encodings here must match the on-chain ABI exactly: ticks are
//! signed-magnitude (never two's-complement), u256 values travel as a
//! low/high pair of 128-bit felts, and addresses are field elements.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{SdkError, SdkResult};

/// The field modulus. Every calldata element must be below it.
pub const FIELD_PRIME: U256 =
    U256::from_limbs([1, 0, 0, 0x0800_0000_0000_0011]);

/// A validated field element used as a contract or token address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(U256);

impl Address {
    pub const ZERO: Address = Address(U256::ZERO);

    /// Wrap a raw field element, rejecting values at or above the modulus.
    pub fn new(value: U256) -> SdkResult<Self> {
        if value >= FIELD_PRIME {
            return Err(SdkError::SerializationError(format!(
                "value {value:#x} is not a valid field element"
            )));
        }
        Ok(Address(value))
    }

    /// Parse a 0x-prefixed hex address.
    pub fn from_hex(s: &str) -> SdkResult<Self> {
        let digits = s.strip_prefix("0x").ok_or_else(|| {
            SdkError::SerializationError(format!("address {s:?} is missing the 0x prefix"))
        })?;
        let value = U256::from_str_radix(digits, 16)
            .map_err(|e| SdkError::SerializationError(format!("invalid address {s:?}: {e}")))?;
        Address::new(value)
    }

    pub fn felt(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == U256::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for Address {
    type Err = SdkError;

    fn from_str(s: &str) -> SdkResult<Self> {
        Address::from_hex(s)
    }
}

/// A token reference as supplied by the caller, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenDescriptor {
    Symbol(String),
    Address(Address),
}

impl TokenDescriptor {
    /// Interpret a CLI-style string: 0x-prefixed input is an address,
    /// anything else is a symbol.
    pub fn parse(s: &str) -> SdkResult<Self> {
        if s.starts_with("0x") {
            Ok(TokenDescriptor::Address(Address::from_hex(s)?))
        } else if s.is_empty() {
            Err(SdkError::TokenNotFound("empty token descriptor".into()))
        } else {
            Ok(TokenDescriptor::Symbol(s.to_string()))
        }
    }
}

impl fmt::Display for TokenDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenDescriptor::Symbol(s) => write!(f, "{s}"),
            TokenDescriptor::Address(a) => write!(f, "{a}"),
        }
    }
}

/// A descriptor resolved against the token registry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedToken {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// A signed-magnitude tick. The wire format carries magnitude and sign as
/// separate felts, so the SDK never round-trips through two's-complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub magnitude: u128,
    pub negative: bool,
}

impl Tick {
    pub const ZERO: Tick = Tick {
        magnitude: 0,
        negative: false,
    };

    /// Convert from a native signed tick index. Zero is non-negative by
    /// convention.
    pub fn from_i64(index: i64) -> Self {
        Tick {
            magnitude: index.unsigned_abs() as u128,
            negative: index < 0,
        }
    }

    /// Native signed value for arithmetic and comparisons.
    pub fn to_i128(&self) -> i128 {
        if self.negative {
            -(self.magnitude as i128)
        } else {
            self.magnitude as i128
        }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

/// A tick range. `lower` must not exceed `upper` in signed value; violating
/// that is a caller error and is reported, never silently corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Tick,
    pub upper: Tick,
}

impl Bounds {
    pub fn new(lower: Tick, upper: Tick) -> SdkResult<Self> {
        if lower.to_i128() > upper.to_i128() {
            return Err(SdkError::InvalidRange {
                lower: lower.to_i128() as i64,
                upper: upper.to_i128() as i64,
            });
        }
        Ok(Bounds { lower, upper })
    }
}

/// Canonical pool identifier. `token0 < token1` always holds; use the pool
/// resolver rather than constructing keys by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub token0: Address,
    pub token1: Address,
    /// Q0.128 fee fraction (a fee of 0.05% encodes as 0.0005 * 2^128).
    pub fee: u128,
    /// Distance between initialized ticks, in ticks.
    pub tick_spacing: u32,
    /// Optional auxiliary contract; the null address when unused.
    pub extension: Address,
}

/// Whether a swap amount fixes the input or the output side of the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exact {
    Input,
    Output,
}

/// A swap amount together with its exact-input/exact-output intent. The
/// intent, not a bare sign bit, decides how the chain interprets the
/// magnitude; exact-output is encoded as a negative i129 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAmount {
    pub magnitude: u128,
    pub exact: Exact,
}

impl SwapAmount {
    pub fn exact_in(magnitude: u128) -> Self {
        SwapAmount {
            magnitude,
            exact: Exact::Input,
        }
    }

    pub fn exact_out(magnitude: u128) -> Self {
        SwapAmount {
            magnitude,
            exact: Exact::Output,
        }
    }
}

/// Signed per-token deltas from the dry-run quoter. Positive means the pool
/// receives that token, negative means it pays it out. Used only to derive
/// the minimum-acceptable-output bound, never submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub delta0: i128,
    pub delta1: i128,
}

/// Current pool price as read from the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolPrice {
    pub sqrt_ratio: U256,
    pub tick: Tick,
}

/// One contract invocation: target, entrypoint name, felt calldata. The
/// transport resolves entrypoint names to selectors when encoding the
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub to: Address,
    pub entrypoint: String,
    pub calldata: Vec<U256>,
}

/// An ordered, immutable sequence of calls submitted as one all-or-nothing
/// transaction. There is no partial submission: either every call lands or
/// the whole batch reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallBatch {
    calls: Vec<Call>,
}

impl CallBatch {
    pub(crate) fn new(calls: Vec<Call>) -> Self {
        CallBatch { calls }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}

/// Transaction hash returned by the transport on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub U256);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Result of waiting for a transaction. The transport decodes the
/// transfer-from-zero event into `minted_position_id` so the SDK never
/// parses raw event logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub succeeded: bool,
    pub revert_reason: Option<String>,
    pub minted_position_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_round_trips_through_signed_magnitude() {
        for index in [-887_272i64, -1000, -1, 0, 1, 1000, 887_272] {
            let tick = Tick::from_i64(index);
            assert_eq!(tick.to_i128(), index as i128);
        }
    }

    #[test]
    fn tick_zero_is_non_negative() {
        let tick = Tick::from_i64(0);
        assert!(!tick.negative);
        assert_eq!(tick.magnitude, 0);
    }

    #[test]
    fn bounds_carry_sign_and_magnitude_separately() {
        let bounds = Bounds::new(Tick::from_i64(-1000), Tick::from_i64(1000)).unwrap();
        assert_eq!(bounds.lower.magnitude, 1000);
        assert!(bounds.lower.negative);
        assert_eq!(bounds.upper.magnitude, 1000);
        assert!(!bounds.upper.negative);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = Bounds::new(Tick::from_i64(10), Tick::from_i64(-10)).unwrap_err();
        assert!(matches!(err, SdkError::InvalidRange { lower: 10, upper: -10 }));
    }

    #[test]
    fn address_must_be_below_field_prime() {
        assert!(Address::new(FIELD_PRIME).is_err());
        assert!(Address::new(FIELD_PRIME - U256::from(1)).is_ok());
        assert!(Address::from_hex("0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7").is_ok());
        assert!(Address::from_hex("nonsense").is_err());
    }

    #[test]
    fn descriptor_parse_distinguishes_symbols_and_addresses() {
        assert!(matches!(
            TokenDescriptor::parse("ETH").unwrap(),
            TokenDescriptor::Symbol(_)
        ));
        assert!(matches!(
            TokenDescriptor::parse("0x1234").unwrap(),
            TokenDescriptor::Address(_)
        ));
        assert!(TokenDescriptor::parse("").is_err());
    }
}
