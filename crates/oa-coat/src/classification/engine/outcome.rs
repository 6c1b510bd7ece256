use crate::classification::amount::Amount;
use crate::classification::coat::{Coat, Dimension};
use crate::classification::color::OaColor;
use crate::classification::licence::{LicenceType, NormalizedLicence};
use crate::classification::EvidenceWarning;
use serde::Serialize;
use std::fmt;

/// Upstream source a value was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceSource {
    Crossref,
    Unpaywall,
    Doaj,
    OpenApc,
    Romeo,
    OpenAlex,
}

impl EvidenceSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crossref => "crossref",
            Self::Unpaywall => "unpaywall",
            Self::Doaj => "doaj",
            Self::OpenApc => "openapc",
            Self::Romeo => "romeo",
            Self::OpenAlex => "openalex",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Crossref => 1,
            Self::Unpaywall => 1 << 1,
            Self::Doaj => 1 << 2,
            Self::OpenApc => 1 << 3,
            Self::Romeo => 1 << 4,
            Self::OpenAlex => 1 << 5,
        }
    }
}

impl fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sources that contributed to a classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSet(u8);

const SOURCE_LETTERS: [(EvidenceSource, char); 5] = [
    (EvidenceSource::Crossref, 'C'),
    (EvidenceSource::Unpaywall, 'U'),
    (EvidenceSource::Doaj, 'D'),
    (EvidenceSource::OpenApc, 'A'),
    (EvidenceSource::Romeo, 'R'),
];

impl SourceSet {
    pub fn insert(&mut self, source: EvidenceSource) {
        self.0 |= source.bit();
    }

    pub fn contains(self, source: EvidenceSource) -> bool {
        self.0 & source.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Fixed-position letters `CUDAR`, `-` for a missing source.
    pub fn letters(self) -> String {
        SOURCE_LETTERS
            .iter()
            .map(|(source, letter)| if self.contains(*source) { *letter } else { '-' })
            .collect()
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

impl Serialize for SourceSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}

/// Level of one dimension with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub level: u8,
    pub note: String,
}

/// Licence that won the precedence between sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenceChoice {
    pub raw: String,
    pub normalized: NormalizedLicence,
    pub licence_type: LicenceType,
    pub source: EvidenceSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationOutcome {
    pub doi: String,
    /// `None` when no source knew anything about the publication.
    pub coat: Option<Coat>,
    pub color: OaColor,
    pub sources: SourceSet,
    pub scores: Vec<DimensionScore>,
    pub licence: Option<LicenceChoice>,
    pub embargo_months: Option<u32>,
    pub embargo_source: String,
    pub apc: Option<Amount>,
    pub apc_source: Option<EvidenceSource>,
    pub unpaywall_color: Option<String>,
    pub oa_place: String,
    pub oa_version: String,
    pub oa_link: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EvidenceWarning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explanation: Vec<String>,
}

impl ClassificationOutcome {
    /// Canonical string of the tuple, empty when unclassified.
    pub fn canonical(&self) -> String {
        self.coat
            .as_ref()
            .map(Coat::to_canonical_string)
            .unwrap_or_default()
    }

    pub fn is_classified(&self) -> bool {
        self.coat.is_some()
    }

    pub fn score(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.scores.iter().find(|score| score.dimension == dimension)
    }

    /// Levels with their provenance notes, one dimension per line.
    pub fn explain(&self) -> String {
        let Some(coat) = self.coat.as_ref() else {
            return String::new();
        };
        let notes: Vec<(Dimension, &str)> = self
            .scores
            .iter()
            .map(|score| (score.dimension, score.note.as_str()))
            .collect();
        coat.explain_with(&notes)
    }

    pub fn report(&self) -> ClassificationReport {
        let licence = self.licence.as_ref();
        let (cost, cost_currency) = match self.apc.as_ref() {
            Some(amount) => (amount.format_major(), amount.currency.clone()),
            None => (String::new(), String::new()),
        };

        ClassificationReport {
            doi: self.doi.clone(),
            coat: self.canonical(),
            color: self.color.label().to_string(),
            unpaywall_color: self.unpaywall_color.clone().unwrap_or_default(),
            licence: licence
                .map(|choice| choice.normalized.name().to_string())
                .unwrap_or_default(),
            licence_version: licence
                .map(|choice| choice.normalized.version.clone())
                .unwrap_or_default(),
            licence_url: licence.map(|choice| choice.raw.clone()).unwrap_or_default(),
            licence_source: licence
                .map(|choice| choice.source.label().to_string())
                .unwrap_or_default(),
            embargo_months: self
                .embargo_months
                .map(|months| months.to_string())
                .unwrap_or_default(),
            embargo_source: self.embargo_source.clone(),
            cost,
            cost_currency,
            cost_source: self
                .apc_source
                .map(|source| source.label().to_string())
                .unwrap_or_default(),
            oa_place: self.oa_place.clone(),
            oa_version: self.oa_version.clone(),
            oa_link: self.oa_link.clone(),
            sources: self.sources.letters(),
        }
    }
}

/// Flat string fields for export and display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    pub doi: String,
    pub coat: String,
    pub color: String,
    pub unpaywall_color: String,
    pub licence: String,
    pub licence_version: String,
    pub licence_url: String,
    pub licence_source: String,
    pub embargo_months: String,
    pub embargo_source: String,
    pub cost: String,
    pub cost_currency: String,
    pub cost_source: String,
    pub oa_place: String,
    pub oa_version: String,
    pub oa_link: String,
    pub sources: String,
}

/// How a fresh classification relates to the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum CoatChange {
    /// No tuple was stored before.
    Set,
    Changed { previous: String },
    Unchanged,
    /// A tuple was stored but the evidence no longer supports one.
    Cleared { previous: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reclassification {
    pub outcome: ClassificationOutcome,
    pub change: CoatChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_letters_keep_positions() {
        let mut sources = SourceSet::default();
        assert!(sources.is_empty());
        sources.insert(EvidenceSource::Crossref);
        sources.insert(EvidenceSource::OpenApc);
        assert_eq!(sources.letters(), "C--A-");
        assert!(!sources.contains(EvidenceSource::Romeo));
        assert_eq!(sources.to_string(), "C--A-");
    }
}
