use serde::{Deserialize, Serialize};

pub const DEFAULT_REFERENCE_CURRENCY: &str = "EUR";
pub const DEFAULT_EMBARGO_SHORT_MONTHS: u32 = 6;
pub const DEFAULT_EMBARGO_MEDIUM_MONTHS: u32 = 12;

/// Thresholds and preferences applied while bucketing evidence into levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Currency preferred when a source lists several amounts.
    pub reference_currency: String,
    /// Embargoes shorter than this many months rank 2.
    pub embargo_short_months: u32,
    /// Embargoes shorter than this many months rank 3; longer ones rank 4.
    pub embargo_medium_months: u32,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            reference_currency: DEFAULT_REFERENCE_CURRENCY.to_string(),
            embargo_short_months: DEFAULT_EMBARGO_SHORT_MONTHS,
            embargo_medium_months: DEFAULT_EMBARGO_MEDIUM_MONTHS,
        }
    }
}
