//! Numeric codec between human units and protocol encodings.
//!
//! Everything here is a pure conversion. Percentages arrive as exact
//! decimals and are turned into integer rationals before any arithmetic,
//! so no consensus-relevant value ever passes through a float. Amount
//! floors truncate (never round) to match on-chain semantics.

use alloy_primitives::U256;
use integer_sqrt::IntegerSquareRoot;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::{Bounds, ProtocolConfig, SdkError, SdkResult, Tick};

/// Natural log of the tick base: each tick moves price by a factor of
/// 1.000001. Kept as a constant because `ln(1.000001)` evaluated naively
/// loses half its digits to cancellation.
const LN_TICK_BASE: f64 = 9.999995000003334e-7;

const E18: u128 = 1_000_000_000_000_000_000;

/// Split a non-negative decimal percentage into an exact integer fraction
/// of one: `percent == m / den * 100`, i.e. the fraction is `m / den`.
fn percent_parts(percent: Decimal) -> SdkResult<(u128, u128)> {
    let m = percent.mantissa().unsigned_abs();
    let pow = 10u128
        .checked_pow(percent.scale())
        .ok_or(SdkError::MathOverflow)?;
    let den = pow.checked_mul(100).ok_or(SdkError::MathOverflow)?;
    Ok((m, den))
}

/// Encode a human fee percentage (0.05 means 0.05%) as the protocol's
/// Q0.128 fraction of 2^128. Monotonic, floor-rounded, and stable under
/// `fee_to_percent` within one encoding unit.
pub fn fee_from_percent(percent: Decimal) -> SdkResult<u128> {
    if percent.is_sign_negative() {
        return Err(SdkError::InvalidPoolParameter(format!(
            "fee percent {percent} is negative"
        )));
    }
    let (m, den) = percent_parts(percent)?;
    if m >= den {
        return Err(SdkError::InvalidPoolParameter(format!(
            "fee percent {percent} must be below 100"
        )));
    }
    let fee = (U256::from(m) << 128usize) / U256::from(den);
    Ok(fee.to::<u128>())
}

/// Decode a Q0.128 fee fraction back to a percentage, truncated to 26
/// decimal places.
pub fn fee_to_percent(fee: u128) -> Decimal {
    let scaled = U256::from(fee) * U256::from(100u8) * U256::from(10u8).pow(U256::from(26u8));
    let q = (scaled >> 128usize).to::<u128>();
    Decimal::from_i128_with_scale(q as i128, 26).normalize()
}

/// Encode a tick-spacing percentage as a tick count: the number of ticks
/// whose compounded price movement equals the requested percentage.
pub fn tick_spacing_from_percent(cfg: &ProtocolConfig, percent: Decimal) -> SdkResult<u32> {
    if percent.is_sign_negative() || percent.is_zero() {
        return Err(SdkError::InvalidPoolParameter(format!(
            "tick spacing percent {percent} must be positive"
        )));
    }
    let p = percent
        .to_f64()
        .ok_or_else(|| SdkError::InvalidPoolParameter(format!("unrepresentable percent {percent}")))?;
    let spacing = ((p / 100.0).ln_1p() / LN_TICK_BASE).round();
    if !(1.0..=cfg.max_tick_spacing as f64).contains(&spacing) {
        return Err(SdkError::InvalidPoolParameter(format!(
            "tick spacing percent {percent} encodes to {spacing} ticks, outside 1..={}",
            cfg.max_tick_spacing
        )));
    }
    Ok(spacing as u32)
}

/// Decode a tick count back to the percentage of price movement it spans.
pub fn tick_spacing_to_percent(spacing: u32) -> SdkResult<Decimal> {
    let pct = (spacing as f64 * LN_TICK_BASE).exp_m1() * 100.0;
    Decimal::from_f64_retain(pct)
        .map(|d| d.round_dp(10).normalize())
        .ok_or(SdkError::MathOverflow)
}

/// Human-readable token1-per-token0 price from a Q64.128 sqrt ratio,
/// corrected for the two tokens' decimal scales.
pub fn price_from_sqrt_ratio(sqrt_ratio: U256, decimals0: u8, decimals1: u8) -> f64 {
    let sqrt = u256_to_f64(sqrt_ratio) / 2f64.powi(128);
    let raw = sqrt * sqrt;
    raw * 10f64.powi(decimals0 as i32 - decimals1 as i32)
}

/// Convert signed tick indices to wire bounds. Inverted ranges are a
/// caller error, reported as such.
pub fn bounds_from_ticks(lower: i64, upper: i64) -> SdkResult<Bounds> {
    Bounds::new(Tick::from_i64(lower), Tick::from_i64(upper))
}

/// Clamp a sqrt ratio into the deployment's representable range. Total and
/// idempotent.
pub fn clamp_sqrt_ratio(cfg: &ProtocolConfig, value: U256) -> U256 {
    value.clamp(cfg.min_sqrt_ratio, cfg.max_sqrt_ratio)
}

/// Reject slippage percentages outside [0, 100).
pub fn validate_slippage(slippage_percent: Decimal) -> SdkResult<()> {
    if slippage_percent.is_sign_negative() || slippage_percent >= Decimal::ONE_HUNDRED {
        return Err(SdkError::InvalidSlippage(slippage_percent));
    }
    Ok(())
}

/// Slippage-bounded price limit for a swap.
///
/// Selling token0 pushes the sqrt ratio down, so the limit sits below the
/// current value; selling token1 pushes it up, so the limit sits above.
/// The candidate is `current * sqrt(1 -/+ slippage)` computed via an
/// integer square root at 1e18 scale, then clamped to the deployment
/// bounds. If clamping would leave the limit on the wrong side of the
/// current price, the bound on the correct side is used instead.
pub fn sqrt_ratio_limit(
    cfg: &ProtocolConfig,
    current: U256,
    slippage_percent: Decimal,
    is_token0_in: bool,
) -> SdkResult<U256> {
    validate_slippage(slippage_percent)?;
    let (m, den) = percent_parts(slippage_percent)?;
    let factor = if is_token0_in { den - m } else { den + m };

    let scaled = (U256::from(factor) * U256::from(E18) / U256::from(den)).to::<u128>();
    let root = (scaled * E18).integer_sqrt();
    let candidate = current
        .checked_mul(U256::from(root))
        .ok_or(SdkError::MathOverflow)?
        / U256::from(E18);

    // The limit must move strictly in the trade direction even at zero
    // slippage, where the scaled factor degenerates to exactly one.
    let candidate = if is_token0_in {
        candidate.min(current.saturating_sub(U256::from(1u8)))
    } else {
        candidate.max(
            current
                .checked_add(U256::from(1u8))
                .ok_or(SdkError::MathOverflow)?,
        )
    };

    let clamped = clamp_sqrt_ratio(cfg, candidate);
    if is_token0_in && clamped >= current {
        return Ok(cfg.min_sqrt_ratio);
    }
    if !is_token0_in && clamped <= current {
        return Ok(cfg.max_sqrt_ratio);
    }
    Ok(clamped)
}

/// Floor on acceptable swap proceeds: `expected * (1 - slippage)`,
/// truncated. This value backs the on-chain clear-minimum call.
pub fn min_amount_out(expected: u128, slippage_percent: Decimal) -> SdkResult<u128> {
    validate_slippage(slippage_percent)?;
    let (m, den) = percent_parts(slippage_percent)?;
    let out = U256::from(expected) * U256::from(den - m) / U256::from(den);
    Ok(out.to::<u128>())
}

/// Ceiling on the input side of an exact-output swap: `expected *
/// (1 + slippage)`, rounded up so the pre-funded amount always covers the
/// quote.
pub fn max_amount_in(expected: u128, slippage_percent: Decimal) -> SdkResult<u128> {
    validate_slippage(slippage_percent)?;
    let (m, den) = percent_parts(slippage_percent)?;
    let num = U256::from(expected) * U256::from(den + m);
    let den = U256::from(den);
    let mut q = num / den;
    if num % den != U256::ZERO {
        q += U256::from(1u8);
    }
    if q > U256::from(u128::MAX) {
        return Err(SdkError::MathOverflow);
    }
    Ok(q.to::<u128>())
}

fn u256_to_f64(x: U256) -> f64 {
    x.as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * 2f64.powi(64) + limb as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProtocolConfig;
    use rust_decimal_macros::dec;

    /// A deployment with narrow, human-scale bounds so clamp behavior is
    /// easy to exercise.
    fn toy_config() -> ProtocolConfig {
        ProtocolConfig {
            min_sqrt_ratio: U256::from(1000u64),
            max_sqrt_ratio: U256::from(10u128.pow(30)),
            ..ProtocolConfig::mainnet()
        }
    }

    #[test]
    fn fee_encoding_round_trips_within_one_unit() {
        for pct in [dec!(0.01), dec!(0.05), dec!(0.3), dec!(1), dec!(5), dec!(25.5)] {
            let fee = fee_from_percent(pct).unwrap();
            let back = fee_to_percent(fee);
            let diff = (back - pct).abs();
            assert!(diff < dec!(0.0000001), "{pct}% -> {fee} -> {back}%");
        }
    }

    #[test]
    fn fee_encoding_is_monotonic() {
        let mut last = 0u128;
        for pct in [dec!(0.0001), dec!(0.01), dec!(0.05), dec!(0.3), dec!(1), dec!(99.9)] {
            let fee = fee_from_percent(pct).unwrap();
            assert!(fee > last, "fee for {pct}% did not increase");
            last = fee;
        }
    }

    #[test]
    fn fee_known_value() {
        // 0.05% = 0.0005 * 2^128
        assert_eq!(
            fee_from_percent(dec!(0.05)).unwrap(),
            170_141_183_460_469_231_731_687_303_715_884_105u128
        );
    }

    #[test]
    fn fee_rejects_out_of_range() {
        assert!(fee_from_percent(dec!(-0.1)).is_err());
        assert!(fee_from_percent(dec!(100)).is_err());
        assert!(fee_from_percent(dec!(250)).is_err());
        assert_eq!(fee_from_percent(dec!(0)).unwrap(), 0);
    }

    #[test]
    fn tick_spacing_encoding() {
        let cfg = ProtocolConfig::mainnet();
        assert_eq!(tick_spacing_from_percent(&cfg, dec!(0.1)).unwrap(), 1000);
        assert_eq!(tick_spacing_from_percent(&cfg, dec!(0.02)).unwrap(), 200);
        assert_eq!(tick_spacing_from_percent(&cfg, dec!(2)).unwrap(), 19803);
        assert!(tick_spacing_from_percent(&cfg, dec!(0)).is_err());
        assert!(tick_spacing_from_percent(&cfg, dec!(-1)).is_err());
        // 50% encodes past the largest representable spacing.
        assert!(tick_spacing_from_percent(&cfg, dec!(50)).is_err());
    }

    #[test]
    fn tick_spacing_round_trips_exactly() {
        let cfg = ProtocolConfig::mainnet();
        for spacing in [1u32, 10, 200, 1000, 19803, 354_892] {
            let pct = tick_spacing_to_percent(spacing).unwrap();
            assert_eq!(tick_spacing_from_percent(&cfg, pct).unwrap(), spacing);
        }
    }

    #[test]
    fn price_for_18_6_decimal_pair() {
        // sqrt ratio such that one token0 (18 decimals) is worth exactly
        // 2000 token1 (6 decimals).
        let sqrt_ratio =
            U256::from_str_radix("15217890079594884195896946943995857", 10).unwrap();
        let price = price_from_sqrt_ratio(sqrt_ratio, 18, 6);
        assert!((price - 2000.0).abs() < 1e-9, "price was {price}");
    }

    #[test]
    fn price_at_parity_with_equal_decimals() {
        let one = U256::from(1u8) << 128;
        let price = price_from_sqrt_ratio(one, 18, 18);
        assert!((price - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_codec_keeps_sign_and_magnitude_apart() {
        let bounds = bounds_from_ticks(-1000, 1000).unwrap();
        assert_eq!(bounds.lower.magnitude, 1000);
        assert!(bounds.lower.negative);
        assert_eq!(bounds.upper.magnitude, 1000);
        assert!(!bounds.upper.negative);
        assert!(bounds_from_ticks(1000, -1000).is_err());
    }

    #[test]
    fn clamp_is_idempotent() {
        let cfg = toy_config();
        for value in [
            U256::ZERO,
            U256::from(999u64),
            U256::from(1000u64),
            U256::from(123_456_789u64),
            U256::from(10u128.pow(30)),
            U256::MAX,
        ] {
            let once = clamp_sqrt_ratio(&cfg, value);
            assert_eq!(clamp_sqrt_ratio(&cfg, once), once);
            assert!(once >= cfg.min_sqrt_ratio && once <= cfg.max_sqrt_ratio);
        }
    }

    #[test]
    fn limit_direction_invariant() {
        let cfg = toy_config();
        let current = U256::from(1_000_000_000u64);
        for slippage in [dec!(0), dec!(0.1), dec!(0.5), dec!(1), dec!(5), dec!(50)] {
            let below = sqrt_ratio_limit(&cfg, current, slippage, true).unwrap();
            let above = sqrt_ratio_limit(&cfg, current, slippage, false).unwrap();
            assert!(below < current, "selling token0 at {slippage}%: {below}");
            assert!(above > current, "selling token1 at {slippage}%: {above}");
        }
    }

    #[test]
    fn limit_selling_token0_at_one_percent() {
        let cfg = toy_config();
        let current = U256::from(1_000_000u64);
        let limit = sqrt_ratio_limit(&cfg, current, dec!(1), true).unwrap();
        // floor(1_000_000 * sqrt(0.99))
        assert_eq!(limit, U256::from(994_987u64));
        assert!(limit >= cfg.min_sqrt_ratio);
    }

    #[test]
    fn limit_falls_back_to_bound_when_clamp_crosses() {
        let cfg = toy_config();
        // Current price already sits on the lower bound: any sell-token0
        // limit would clamp back above it, so the bound itself is used.
        let limit = sqrt_ratio_limit(&cfg, cfg.min_sqrt_ratio, dec!(1), true).unwrap();
        assert_eq!(limit, cfg.min_sqrt_ratio);
        let limit = sqrt_ratio_limit(&cfg, cfg.max_sqrt_ratio, dec!(1), false).unwrap();
        assert_eq!(limit, cfg.max_sqrt_ratio);
    }

    #[test]
    fn min_out_truncates() {
        assert_eq!(min_amount_out(1_000_000, dec!(0.5)).unwrap(), 995_000);
        // 0.3% of 999 is 2.997; the floor keeps 996, never 997.
        assert_eq!(min_amount_out(999, dec!(0.3)).unwrap(), 996);
        assert_eq!(min_amount_out(0, dec!(5)).unwrap(), 0);
    }

    #[test]
    fn min_out_is_non_increasing_in_slippage() {
        let mut last = u128::MAX;
        for slippage in [dec!(0), dec!(0.1), dec!(0.5), dec!(1), dec!(2), dec!(10), dec!(99)] {
            let out = min_amount_out(1_000_000, slippage).unwrap();
            assert!(out <= last, "min out rose at {slippage}%");
            last = out;
        }
    }

    #[test]
    fn max_in_rounds_up() {
        assert_eq!(max_amount_in(1_000_000, dec!(0.5)).unwrap(), 1_005_000);
        assert_eq!(max_amount_in(999, dec!(0.3)).unwrap(), 1002);
        assert!(max_amount_in(u128::MAX, dec!(50)).is_err());
    }

    #[test]
    fn slippage_validation() {
        assert!(validate_slippage(dec!(0)).is_ok());
        assert!(validate_slippage(dec!(99.99)).is_ok());
        assert!(validate_slippage(dec!(100)).is_err());
        assert!(validate_slippage(dec!(-0.5)).is_err());
    }
}
