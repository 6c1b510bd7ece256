use super::selection::select_amount;
use super::warning::EvidenceWarning;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary value in minor currency units.
///
/// `value` is never NaN or null: `0` means no fee, [`Amount::FEE_UNKNOWN`] means a
/// fee is charged but its size is not known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    pub value: i64,
    #[serde(default)]
    pub currency: String,
}

impl Amount {
    /// Sentinel for "has fee, amount unknown".
    pub const FEE_UNKNOWN: i64 = -1;

    pub fn new(value: i64, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }

    pub fn free(currency: impl Into<String>) -> Self {
        Self::new(0, currency)
    }

    pub fn fee_unknown(currency: impl Into<String>) -> Self {
        Self::new(Self::FEE_UNKNOWN, currency)
    }

    pub fn is_free(&self) -> bool {
        self.value == 0
    }

    pub fn is_fee_unknown(&self) -> bool {
        self.value == Self::FEE_UNKNOWN
    }

    /// A known positive fee or the unknown-fee sentinel.
    pub fn charges_fee(&self) -> bool {
        self.value > 0 || self.is_fee_unknown()
    }

    /// Major units with two decimals; empty when the size of the fee is unknown.
    pub fn format_major(&self) -> String {
        if self.is_fee_unknown() {
            return String::new();
        }
        format!("{:.2}", self.value as f64 / 100.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fee_unknown() {
            return write!(f, "fee of unknown amount {}", self.currency);
        }
        if self.currency.is_empty() {
            f.write_str(&self.format_major())
        } else {
            write!(f, "{} {}", self.format_major(), self.currency)
        }
    }
}

const NOT_APPLICABLE: &[&str] = &["na", "n/a", "-", "none", "null"];

/// Parses a major-unit number into minor units.
///
/// Empty input and "not applicable" tokens are absent, not zero. Decimals are
/// rounded to the nearest minor unit.
pub fn parse_minor_units(raw: &str) -> Result<Option<i64>, EvidenceWarning> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || NOT_APPLICABLE
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return Ok(None);
    }

    let unparseable = || EvidenceWarning::UnparseableAmount {
        raw: raw.to_string(),
    };

    if let Ok(whole) = trimmed.parse::<i64>() {
        if whole < 0 {
            return Err(unparseable());
        }
        return whole.checked_mul(100).map(Some).ok_or_else(unparseable);
    }

    let value: f64 = trimmed.parse().map_err(|_| unparseable())?;
    if !value.is_finite() || value < 0.0 || value > (i64::MAX / 100) as f64 {
        return Err(unparseable());
    }
    Ok(Some((value * 100.0).round() as i64))
}

/// Parses `"<number> [<currency>]"`, e.g. `"100 USD"` or `"100"`.
pub fn parse_amount(raw: &str) -> Result<Option<Amount>, EvidenceWarning> {
    let mut parts = raw.split_whitespace();
    let Some(number) = parts.next() else {
        return Ok(None);
    };
    let currency = parts.next().unwrap_or("").to_uppercase();
    if parts.next().is_some() {
        return Err(EvidenceWarning::UnparseableAmount {
            raw: raw.to_string(),
        });
    }

    Ok(parse_minor_units(number)?.map(|value| Amount::new(value, currency)))
}

/// Parses a `;`-separated list of amounts and picks the one in `reference` currency.
///
/// Unparseable entries are skipped and reported.
pub fn parse_amount_list(raw: &str, reference: &str) -> (Option<Amount>, Vec<EvidenceWarning>) {
    let mut warnings = Vec::new();
    let mut candidates = Vec::new();
    for entry in raw.split(';') {
        match parse_amount(entry) {
            Ok(Some(amount)) => candidates.push(amount),
            Ok(None) => {}
            Err(warning) => warnings.push(warning),
        }
    }
    (select_amount(candidates, reference), warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_accept_integers_and_decimals() {
        assert_eq!(parse_minor_units("1200"), Ok(Some(120_000)));
        assert_eq!(parse_minor_units("1200.23"), Ok(Some(120_023)));
        assert_eq!(parse_minor_units("99.999"), Ok(Some(10_000)));
        assert_eq!(parse_minor_units(" 0 "), Ok(Some(0)));
    }

    #[test]
    fn not_applicable_tokens_are_absent() {
        assert_eq!(parse_minor_units("NA"), Ok(None));
        assert_eq!(parse_minor_units("n/a"), Ok(None));
        assert_eq!(parse_minor_units(""), Ok(None));
    }

    #[test]
    fn malformed_numbers_are_reported() {
        assert!(matches!(
            parse_minor_units("twelve"),
            Err(EvidenceWarning::UnparseableAmount { .. })
        ));
        assert!(parse_minor_units("-5").is_err());
        assert!(parse_minor_units("NaN").is_err());
    }

    #[test]
    fn amount_with_and_without_currency() {
        assert_eq!(parse_amount("100"), Ok(Some(Amount::new(10_000, ""))));
        assert_eq!(parse_amount("100 usd"), Ok(Some(Amount::new(10_000, "USD"))));
        assert_eq!(parse_amount("   "), Ok(None));
        assert!(parse_amount("100 USD extra").is_err());
    }

    #[test]
    fn list_prefers_reference_currency() {
        let (amount, warnings) = parse_amount_list("2000 EUR; 1700 GBP", "EUR");
        assert_eq!(amount, Some(Amount::new(200_000, "EUR")));
        assert!(warnings.is_empty());

        let (amount, warnings) = parse_amount_list("abc GBP; 1700 GBP", "EUR");
        assert_eq!(amount, Some(Amount::new(170_000, "GBP")));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn formatting_uses_major_units() {
        assert_eq!(Amount::new(120_023, "EUR").format_major(), "1200.23");
        assert_eq!(Amount::new(120_023, "EUR").to_string(), "1200.23 EUR");
        assert_eq!(Amount::fee_unknown("EUR").format_major(), "");
        assert!(Amount::fee_unknown("EUR").charges_fee());
        assert!(!Amount::free("EUR").charges_fee());
    }
}
