//! Price-target market templates.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::crypto::CryptoAsset;

/// `1234567.5` → `1,234,567.5`. At most three fraction digits.
#[must_use]
pub fn format_thousands(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `Will BTC price reach ≥ $100,000 by January 31, 2025?`
#[must_use]
pub fn crypto_title(asset: &CryptoAsset, target: Decimal, date: NaiveDate) -> String {
    format!(
        "Will {} price reach ≥ ${} by {}?",
        asset.symbol.to_uppercase(),
        format_thousands(target),
        date.format("%B %-d, %Y"),
    )
}

/// YES/NO rule text pinned to 23:59 UTC on `date`.
#[must_use]
pub fn crypto_description(asset: &CryptoAsset, target: Decimal, date: NaiveDate) -> String {
    format!(
        "YES if the CoinGecko USD price for {} is ≥ ${} at 23:59 UTC on {}.\n\
         NO otherwise. Source: CoinGecko asset page historical price.",
        asset.symbol.to_uppercase(),
        format_thousands(target),
        date.format("%Y-%m-%d"),
    )
}

#[must_use]
pub fn crypto_primary_source(asset: &CryptoAsset) -> String {
    format!("https://www.coingecko.com/en/coins/{}", asset.id)
}

/// Resolution instant for a crypto market: 23:59:59 UTC on `date`.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59)
        .map_or_else(|| date.and_time(chrono::NaiveTime::MIN).and_utc(), |dt| dt.and_utc())
}

/// Suggested targets: +5/10/25/50/100% rounded to whole dollars, plus
/// the next round thousand, five hundred and hundred above the price.
/// Deduplicated and ascending.
#[must_use]
pub fn target_suggestions(current_price: f64) -> Vec<u64> {
    let round = |v: f64| v.round().max(0.0) as u64;

    let mut targets: Vec<u64> = [1.05, 1.10, 1.25, 1.50, 2.00]
        .iter()
        .map(|m| round(current_price * m))
        .collect();

    targets.extend(
        [1000.0, 500.0, 100.0]
            .iter()
            .map(|step| (current_price / step).ceil() * step)
            .filter(|n| *n > current_price)
            .map(round),
    );

    targets.sort_unstable();
    targets.dedup();
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::AssetId;
    use rust_decimal_macros::dec;

    fn btc() -> CryptoAsset {
        CryptoAsset {
            id: AssetId::from("bitcoin"),
            symbol: "btc".into(),
            name: "Bitcoin".into(),
            image: String::new(),
            current_price: 95_000.0,
            market_cap: 1.9e12,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(dec!(100000)), "100,000");
        assert_eq!(format_thousands(dec!(999)), "999");
        assert_eq!(format_thousands(dec!(1234567.5)), "1,234,567.5");
        assert_eq!(format_thousands(dec!(0.12345)), "0.123");
    }

    #[test]
    fn title_uses_upper_symbol_and_long_date() {
        assert_eq!(
            crypto_title(&btc(), dec!(100000), date()),
            "Will BTC price reach ≥ $100,000 by January 31, 2025?"
        );
    }

    #[test]
    fn description_pins_utc_close() {
        assert_eq!(
            crypto_description(&btc(), dec!(100000), date()),
            "YES if the CoinGecko USD price for BTC is ≥ $100,000 at 23:59 UTC on 2025-01-31.\n\
             NO otherwise. Source: CoinGecko asset page historical price."
        );
    }

    #[test]
    fn primary_source_is_coingecko_page() {
        assert_eq!(
            crypto_primary_source(&btc()),
            "https://www.coingecko.com/en/coins/bitcoin"
        );
    }

    #[test]
    fn end_of_day_is_last_second() {
        assert_eq!(end_of_day(date()).to_rfc3339(), "2025-01-31T23:59:59+00:00");
    }

    #[test]
    fn suggestions_are_sorted_and_unique() {
        assert_eq!(
            target_suggestions(94_321.0),
            vec![94_400, 94_500, 95_000, 99_037, 103_753, 117_901, 141_482, 188_642]
        );
    }

    #[test]
    fn round_prices_skip_equal_round_numbers() {
        // 1000 is not above 1000, so only the percentage targets remain
        assert_eq!(target_suggestions(1000.0), vec![1050, 1100, 1250, 1500, 2000]);
    }
}
