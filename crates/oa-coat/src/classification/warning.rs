use serde::Serialize;
use thiserror::Error;

/// Recoverable data-quality issue found while reducing evidence.
///
/// Warnings never abort a classification; the offending value is skipped or
/// replaced by a sentinel and the warning travels with the result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceWarning {
    #[error("amount '{raw}' is not a valid number")]
    UnparseableAmount { raw: String },
    #[error("embargo of {amount} for {issns} has no unit")]
    MissingEmbargoUnit { issns: String, amount: i64 },
    #[error("embargo for {issns} uses unhandled unit '{unit}'")]
    UnknownEmbargoUnit { issns: String, unit: String },
    #[error("embargo for {issns} has negative amount {amount}")]
    NegativeEmbargo { issns: String, amount: i64 },
    #[error("stored coat '{raw}' could not be parsed: {reason}")]
    MalformedStoredCoat { raw: String, reason: String },
}
