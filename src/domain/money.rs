//! USDC amount conversion and display helpers.
//!
//! Amounts are carried as [`Decimal`] dollars in the application and
//! converted to 6-decimal base units ([`U256`]) at the contract boundary.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::DomainError;

/// Number of decimals for the USDC token.
pub const USDC_DECIMALS: u32 = 6;

/// Divisor for basis-point values.
pub const BASIS_POINTS_DIVISOR: u32 = 10_000;

/// Largest dollar amount accepted from user input.
pub const MAX_USDC_AMOUNT: Decimal = dec!(1000000000000000);

/// Parse a user-entered dollar amount.
///
/// # Errors
///
/// Returns [`DomainError::InvalidAmount`] for non-numeric or negative input,
/// or for amounts above [`MAX_USDC_AMOUNT`].
pub fn parse_usdc(input: &str) -> Result<Decimal, DomainError> {
    let trimmed = input.trim();
    let invalid = || DomainError::InvalidAmount {
        input: trimmed.to_string(),
    };
    let amount: Decimal = trimmed.parse().map_err(|_| invalid())?;
    if amount.is_sign_negative() || amount > MAX_USDC_AMOUNT {
        return Err(invalid());
    }
    Ok(amount)
}

/// Add two dollar amounts.
///
/// # Errors
///
/// Returns [`DomainError::InvalidAmount`] when the sum leaves `Decimal`'s range.
pub fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_add(b).ok_or_else(|| DomainError::InvalidAmount {
        input: format!("{a} + {b}"),
    })
}

/// Convert decimal dollars to USDC base units, truncating extra precision.
/// Negative amounts map to zero.
#[must_use]
pub fn to_base_units(amount: Decimal) -> U256 {
    if amount.is_sign_negative() {
        return U256::ZERO;
    }
    // A 96-bit mantissa times 10^6 stays well inside u128.
    let scaled = amount.mantissa().unsigned_abs() * 10u128.pow(USDC_DECIMALS);
    U256::from(scaled / 10u128.pow(amount.scale()))
}

/// Convert USDC base units to decimal dollars.
#[must_use]
pub fn from_base_units(units: U256) -> Decimal {
    let int_val: u128 = units.try_into().unwrap_or(u128::MAX);
    let int_val = i128::try_from(int_val).unwrap_or(i128::MAX);
    Decimal::try_from_i128_with_scale(int_val, USDC_DECIMALS).unwrap_or(Decimal::MAX)
}

/// Compact dollar display: `$12.50`, `$2.50K`, `$1.20M`.
#[must_use]
pub fn format_usdc_compact(units: U256, decimals: u32) -> String {
    let value = from_base_units(units);
    let (scaled, suffix) = if value >= Decimal::from(1_000_000) {
        (value / Decimal::from(1_000_000), "M")
    } else if value >= Decimal::from(1_000) {
        (value / Decimal::from(1_000), "K")
    } else {
        (value, "")
    };
    let rounded = scaled.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.prec$}{suffix}", prec = decimals as usize)
}

/// Basis points to a one-decimal percentage, e.g. `6250` → `62.5%`.
#[must_use]
pub fn format_probability(basis_points: u32) -> String {
    let percentage = f64::from(basis_points) / f64::from(BASIS_POINTS_DIVISOR) * 100.0;
    format!("{percentage:.1}%")
}

/// Time left until `target`: `Ended`, `3d 4h`, `5h 10m` or `42m`.
#[must_use]
pub fn format_time_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = target - now;
    if diff <= chrono::Duration::zero() {
        return "Ended".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours() % 24;
    let minutes = diff.num_minutes() % 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Shorten an address to `0x1234...abcd`.
#[must_use]
pub fn truncate_address(address: &str, chars: usize) -> String {
    if address.len() <= chars * 2 + 2 {
        return address.to_string();
    }
    format!(
        "{}...{}",
        &address[..chars + 2],
        &address[address.len() - chars..]
    )
}

/// Absolute price change as a percentage of the current price.
#[must_use]
pub fn price_impact(current_price: f64, new_price: f64) -> f64 {
    if current_price == 0.0 {
        return 0.0;
    }
    ((new_price - current_price) / current_price).abs() * 100.0
}

/// Price paid per outcome token. Both amounts carry 6 decimals.
#[must_use]
pub fn effective_price(amount_in: U256, tokens_out: U256) -> Decimal {
    if tokens_out.is_zero() {
        return Decimal::ZERO;
    }
    from_base_units(amount_in)
        .checked_div(from_base_units(tokens_out))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_usdc_accepts_decimal_input() {
        assert_eq!(parse_usdc(" 12.5 ").unwrap(), dec!(12.5));
    }

    #[test]
    fn parse_usdc_rejects_garbage_and_negative() {
        assert!(matches!(
            parse_usdc("abc"),
            Err(DomainError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_usdc("-1"),
            Err(DomainError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn parse_usdc_caps_amounts() {
        assert_eq!(parse_usdc("1000000000000000").unwrap(), MAX_USDC_AMOUNT);
        assert!(matches!(
            parse_usdc("1000000000000000.01"),
            Err(DomainError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_usdc("79228162514264337593543950335"),
            Err(DomainError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn to_base_units_covers_the_whole_decimal_range() {
        assert_eq!(
            to_base_units(Decimal::MAX),
            U256::from(79_228_162_514_264_337_593_543_950_335_000_000u128)
        );
        assert_eq!(
            to_base_units(MAX_USDC_AMOUNT + dec!(10)),
            U256::from(1_000_000_000_000_010_000_000u128)
        );
        assert_eq!(to_base_units(dec!(-5)), U256::ZERO);
        assert_eq!(to_base_units(dec!(0.0000001)), U256::ZERO);
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(checked_sum(dec!(10), dec!(0.5)).unwrap(), dec!(10.5));
        assert!(matches!(
            checked_sum(Decimal::MAX, dec!(1)),
            Err(DomainError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn effective_price_survives_extreme_reads() {
        let price = effective_price(U256::MAX, U256::from(1u64));
        assert_eq!(price, Decimal::ZERO);
    }

    #[test]
    fn to_base_units_truncates_extra_decimals() {
        assert_eq!(to_base_units(dec!(1.1234567)), U256::from(1_123_456u64));
        assert_eq!(to_base_units(dec!(0)), U256::ZERO);
    }

    #[test]
    fn from_base_units_converts_to_dollars() {
        assert_eq!(from_base_units(U256::from(500_000u64)), dec!(0.5));
        assert_eq!(from_base_units(U256::from(10_000_000_000u64)), dec!(10000));
    }

    #[test]
    fn compact_format_picks_suffix() {
        assert_eq!(format_usdc_compact(U256::from(12_500_000u64), 2), "$12.50");
        assert_eq!(format_usdc_compact(U256::from(2_500_000_000u64), 2), "$2.50K");
        assert_eq!(
            format_usdc_compact(U256::from(1_200_000_000_000u64), 2),
            "$1.20M"
        );
    }

    #[test]
    fn probability_formats_one_decimal() {
        assert_eq!(format_probability(6250), "62.5%");
        assert_eq!(format_probability(5000), "50.0%");
    }

    #[test]
    fn time_remaining_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_time_remaining(now, now), "Ended");
        assert_eq!(
            format_time_remaining(now + chrono::Duration::hours(76), now),
            "3d 4h"
        );
        assert_eq!(
            format_time_remaining(now + chrono::Duration::minutes(310), now),
            "5h 10m"
        );
        assert_eq!(
            format_time_remaining(now + chrono::Duration::minutes(42), now),
            "42m"
        );
    }

    #[test]
    fn truncate_address_keeps_short_input() {
        assert_eq!(truncate_address("0x1234", 4), "0x1234");
        assert_eq!(
            truncate_address("0x1234567890abcdef1234567890abcdef12345678", 4),
            "0x1234...5678"
        );
    }

    #[test]
    fn price_impact_handles_zero_price() {
        assert_eq!(price_impact(0.0, 1.0), 0.0);
        assert!((price_impact(0.5, 0.55) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn effective_price_divides_amounts() {
        let price = effective_price(U256::from(1_000_000u64), U256::from(2_000_000u64));
        assert_eq!(price, dec!(0.5));
        assert_eq!(effective_price(U256::from(1u64), U256::ZERO), Decimal::ZERO);
    }
}
