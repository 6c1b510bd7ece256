//! DOAJ journal records from the CSV dump or the JSON API.

use super::{non_empty, parse_flag};
use crate::classification::amount::{parse_amount_list, Amount};
use crate::classification::licence::LicenceNormalizer;
use crate::classification::selection::{resolve_fee, select_amount, select_best_licence};
use crate::classification::EvidenceWarning;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A journal listed in DOAJ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoajEvidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apc: Option<Amount>,
    /// First year with all content under an open licence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oa_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawn_on: Option<NaiveDate>,
}

impl DoajEvidence {
    /// Whether the listing applies to a publication of that year and date.
    ///
    /// A journal with an OA start year needs a known publication year at or after
    /// it. A withdrawn journal only covers what was published up to the withdrawal.
    pub fn covers(&self, year: Option<i32>, published_on: Option<NaiveDate>) -> bool {
        if let Some(oa_start) = self.oa_start {
            if year.map_or(true, |year| oa_start > year) {
                return false;
            }
        }

        match (self.withdrawn_on, published_on, year) {
            (Some(withdrawn), Some(published), _) => published <= withdrawn,
            (Some(withdrawn), None, Some(year)) => year <= withdrawn.year(),
            _ => true,
        }
    }
}

/// One row of the DOAJ journal CSV.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoajRow {
    #[serde(rename = "Journal title", default)]
    pub title: String,
    #[serde(rename = "Journal ISSN (print version)", default)]
    pub issn: Option<String>,
    #[serde(rename = "Journal EISSN (online version)", default)]
    pub eissn: Option<String>,
    #[serde(rename = "Journal license", default)]
    pub licence: Option<String>,
    #[serde(rename = "APC", default)]
    pub apc: String,
    #[serde(rename = "APC amount", default)]
    pub apc_amount: Option<String>,
    #[serde(
        rename = "When did the journal start to publish all content using an open license?",
        default
    )]
    pub oa_start: Option<String>,
}

impl DoajRow {
    pub fn issns(&self) -> Vec<String> {
        [self.issn.as_deref(), self.eissn.as_deref()]
            .into_iter()
            .filter_map(non_empty)
            .collect()
    }

    pub fn to_evidence(&self, reference_currency: &str) -> (DoajEvidence, Vec<EvidenceWarning>) {
        let (amount, warnings) = match self.apc_amount.as_deref() {
            Some(raw) => parse_amount_list(raw, reference_currency),
            None => (None, Vec::new()),
        };

        let evidence = DoajEvidence {
            licence: non_empty(self.licence.as_deref()),
            apc: Some(resolve_fee(parse_flag(&self.apc), amount, reference_currency)),
            oa_start: self
                .oa_start
                .as_deref()
                .and_then(|year| year.trim().parse().ok()),
            withdrawn_on: None,
        };
        (evidence, warnings)
    }
}

/// Reads DOAJ CSV rows; the first line holds the headers.
pub fn parse_doaj_rows<R: Read>(reader: R) -> Result<Vec<DoajRow>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// `bibjson` part of a DOAJ API journal record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoajBibjson {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pissn: Option<String>,
    #[serde(default)]
    pub eissn: Option<String>,
    #[serde(default)]
    pub license: Vec<DoajLicence>,
    #[serde(default)]
    pub apc: Option<DoajApc>,
    #[serde(default)]
    pub oa_start: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoajLicence {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoajApc {
    #[serde(default)]
    pub has_apc: bool,
    #[serde(default)]
    pub max: Vec<DoajPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoajPrice {
    pub price: i64,
    #[serde(default)]
    pub currency: String,
}

impl DoajBibjson {
    pub fn best_licence(&self, normalizer: &LicenceNormalizer) -> Option<&str> {
        let kinds: Vec<&str> = self.license.iter().map(|licence| licence.kind.as_str()).collect();
        select_best_licence(normalizer, &kinds).copied()
    }

    pub fn best_amount(&self, reference_currency: &str) -> Amount {
        let Some(apc) = self.apc.as_ref() else {
            return Amount::free(reference_currency);
        };
        let amount = select_amount(
            apc.max
                .iter()
                .map(|price| Amount::new(price.price.saturating_mul(100), price.currency.clone())),
            reference_currency,
        );
        resolve_fee(apc.has_apc, amount.filter(|_| apc.has_apc), reference_currency)
    }

    pub fn to_evidence(&self, normalizer: &LicenceNormalizer, reference_currency: &str) -> DoajEvidence {
        DoajEvidence {
            licence: self.best_licence(normalizer).map(str::to_string),
            apc: Some(self.best_amount(reference_currency)),
            oa_start: self.oa_start.filter(|year| *year > 0),
            withdrawn_on: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_respects_oa_start() {
        let journal = DoajEvidence {
            oa_start: Some(2015),
            ..DoajEvidence::default()
        };
        assert!(journal.covers(Some(2015), None));
        assert!(!journal.covers(Some(2014), None));
        assert!(!journal.covers(None, None));
        assert!(DoajEvidence::default().covers(None, None));
    }

    #[test]
    fn coverage_respects_withdrawal() {
        let journal = DoajEvidence {
            withdrawn_on: NaiveDate::from_ymd_opt(2020, 6, 30),
            ..DoajEvidence::default()
        };
        assert!(journal.covers(Some(2020), NaiveDate::from_ymd_opt(2020, 6, 30)));
        assert!(!journal.covers(Some(2020), NaiveDate::from_ymd_opt(2020, 7, 1)));
        assert!(!journal.covers(Some(2021), None));
        assert!(journal.covers(None, None));
    }

    #[test]
    fn row_with_flag_but_no_amount_has_unknown_fee() {
        let row = DoajRow {
            apc: "Yes".to_string(),
            ..DoajRow::default()
        };
        let (evidence, warnings) = row.to_evidence("EUR");
        assert!(evidence.apc.expect("apc").is_fee_unknown());
        assert!(warnings.is_empty());

        let row = DoajRow {
            apc: "No".to_string(),
            ..DoajRow::default()
        };
        assert_eq!(row.to_evidence("EUR").0.apc, Some(Amount::free("EUR")));
    }

    #[test]
    fn bibjson_picks_reference_currency() {
        let json = r#"{
            "title": "Journal of Tests",
            "license": [{"type": "CC BY-NC"}, {"type": "CC BY"}],
            "apc": {"has_apc": true, "max": [{"price": 1700, "currency": "GBP"}, {"price": 2000, "currency": "EUR"}]},
            "oa_start": 2012
        }"#;
        let bibjson: DoajBibjson = serde_json::from_str(json).expect("bibjson");
        let evidence = bibjson.to_evidence(&LicenceNormalizer::default(), "EUR");
        assert_eq!(evidence.licence.as_deref(), Some("CC BY"));
        assert_eq!(evidence.apc, Some(Amount::new(200_000, "EUR")));
        assert_eq!(evidence.oa_start, Some(2012));
    }

    #[test]
    fn bibjson_without_fee_is_free() {
        let bibjson: DoajBibjson =
            serde_json::from_str(r#"{"apc": {"has_apc": false}}"#).expect("bibjson");
        assert_eq!(bibjson.best_amount("EUR"), Amount::free("EUR"));

        let bibjson: DoajBibjson =
            serde_json::from_str(r#"{"apc": {"has_apc": true, "max": []}}"#).expect("bibjson");
        assert!(bibjson.best_amount("EUR").is_fee_unknown());
    }
}
