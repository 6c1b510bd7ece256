//! OpenAPC cost records.

use super::{non_empty, parse_flag};
use crate::classification::amount::{parse_minor_units, Amount};
use crate::classification::selection::pick_best;
use crate::classification::EvidenceWarning;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// OpenAPC always reports in euro.
pub const OPENAPC_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenApcEvidence {
    #[serde(default)]
    pub hybrid: bool,
    /// Euro cents; `None` when the record carries no amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default)]
    pub transformative_agreement: bool,
}

impl OpenApcEvidence {
    /// Charged APC. Transformative agreement records without an amount still charge a fee.
    pub fn apc(&self) -> Option<Amount> {
        match (self.amount, self.transformative_agreement) {
            (Some(value), _) => Some(Amount::new(value, OPENAPC_CURRENCY)),
            (None, true) => Some(Amount::fee_unknown(OPENAPC_CURRENCY)),
            (None, false) => None,
        }
    }
}

/// Individual records win over transformative agreement records; ties keep the first.
pub fn select_openapc_record(records: &[OpenApcEvidence]) -> Option<&OpenApcEvidence> {
    pick_best(records.iter(), |record| record.transformative_agreement)
}

/// One row of the OpenAPC or transformative agreements CSV.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApcRow {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub period: Option<i32>,
    #[serde(default)]
    pub euro: Option<String>,
    #[serde(default)]
    pub doi: String,
    #[serde(default)]
    pub is_hybrid: String,
    #[serde(default)]
    pub agreement: Option<String>,
}

impl OpenApcRow {
    pub fn to_evidence(&self) -> (OpenApcEvidence, Vec<EvidenceWarning>) {
        let mut warnings = Vec::new();
        let amount = match self.euro.as_deref().map(parse_minor_units) {
            Some(Ok(amount)) => amount,
            Some(Err(warning)) => {
                warnings.push(warning);
                None
            }
            None => None,
        };

        let evidence = OpenApcEvidence {
            hybrid: parse_flag(&self.is_hybrid),
            amount,
            transformative_agreement: non_empty(self.agreement.as_deref()).is_some(),
        };
        (evidence, warnings)
    }
}

pub fn parse_openapc_rows<R: Read>(reader: R) -> Result<Vec<OpenApcRow>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}
