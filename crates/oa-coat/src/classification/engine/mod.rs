mod config;
mod outcome;
mod rules;
mod signals;

pub use config::{
    ClassificationConfig, DEFAULT_EMBARGO_MEDIUM_MONTHS, DEFAULT_EMBARGO_SHORT_MONTHS,
    DEFAULT_REFERENCE_CURRENCY,
};
pub use outcome::{
    ClassificationOutcome, ClassificationReport, CoatChange, DimensionScore, EvidenceSource,
    LicenceChoice, Reclassification, SourceSet,
};

use super::coat::Coat;
use super::color::color_for;
use super::licence::LicenceNormalizer;
use super::selection::select_dominant;
use super::EvidenceWarning;
use crate::sources::PublicationEvidence;
use rayon::prelude::*;
use signals::ClassificationSignals;
use tracing::{debug, info};

/// Stateless classifier turning publication evidence into a COAT tuple.
///
/// Holds only read-only configuration, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ClassificationEngine {
    config: ClassificationConfig,
    normalizer: LicenceNormalizer,
}

impl ClassificationEngine {
    pub fn new(config: ClassificationConfig) -> Self {
        Self::with_normalizer(config, LicenceNormalizer::default())
    }

    pub fn with_normalizer(config: ClassificationConfig, normalizer: LicenceNormalizer) -> Self {
        Self { config, normalizer }
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &LicenceNormalizer {
        &self.normalizer
    }

    pub fn classify(&self, evidence: &PublicationEvidence) -> ClassificationOutcome {
        self.evaluate(evidence, false)
    }

    /// Same as [`classify`](Self::classify) with the step-by-step explanation filled in.
    pub fn classify_explained(&self, evidence: &PublicationEvidence) -> ClassificationOutcome {
        self.evaluate(evidence, true)
    }

    /// One tuple per source record of the same publication; the dominant one wins.
    ///
    /// Later records replace the current pick only when they strictly dominate it,
    /// so among incomparable tuples the first one seen is kept.
    pub fn classify_records(
        &self,
        records: &[PublicationEvidence],
    ) -> Option<ClassificationOutcome> {
        let outcomes = records.iter().map(|record| self.classify(record));
        select_dominant(outcomes, |outcome| outcome.coat.as_ref())
    }

    /// Classifies publications in parallel; output order follows input order.
    pub fn classify_batch(&self, publications: &[PublicationEvidence]) -> Vec<ClassificationOutcome> {
        publications
            .par_iter()
            .map(|evidence| self.classify(evidence))
            .collect()
    }

    /// Classifies again and compares against the stored canonical string.
    ///
    /// A stored string that does not parse counts as "no previous tuple" and is
    /// reported as a warning on the outcome.
    pub fn reclassify(
        &self,
        stored: Option<&str>,
        evidence: &PublicationEvidence,
    ) -> Reclassification {
        let mut outcome = self.classify(evidence);

        let previous = match stored.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => None,
            Some(raw) => match Coat::from_canonical_string(raw) {
                Ok(coat) => Some(coat),
                Err(error) => {
                    outcome.warnings.push(EvidenceWarning::MalformedStoredCoat {
                        raw: raw.to_string(),
                        reason: error.to_string(),
                    });
                    None
                }
            },
        };

        let change = match (previous, outcome.coat.as_ref()) {
            (None, Some(_)) => CoatChange::Set,
            (None, None) => CoatChange::Unchanged,
            (Some(previous), Some(current)) if previous == *current => CoatChange::Unchanged,
            (Some(previous), Some(_)) => CoatChange::Changed {
                previous: previous.to_canonical_string(),
            },
            (Some(previous), None) => CoatChange::Cleared {
                previous: previous.to_canonical_string(),
            },
        };

        if change != CoatChange::Unchanged {
            info!(
                doi = %outcome.doi,
                coat = %outcome.canonical(),
                change = ?change,
                "coat changed"
            );
        }

        Reclassification { outcome, change }
    }

    fn evaluate(&self, evidence: &PublicationEvidence, explain: bool) -> ClassificationOutcome {
        debug!(doi = %evidence.doi, "classify");
        let mut signals = ClassificationSignals::gather(evidence, &self.normalizer, explain);

        if signals.sources.is_empty() {
            debug!(doi = %evidence.doi, "no sources available");
            return ClassificationOutcome {
                doi: evidence.doi.clone(),
                coat: None,
                color: color_for(None),
                sources: signals.sources,
                scores: Vec::new(),
                licence: signals.licence,
                embargo_months: None,
                embargo_source: String::new(),
                apc: None,
                apc_source: None,
                unpaywall_color: signals.unpaywall_color,
                oa_place: signals.host_type,
                oa_version: signals.oa_version,
                oa_link: signals.oa_url,
                warnings: signals.warnings,
                explanation: signals.explanation.into_steps(),
            };
        }

        let version = rules::classify_version(&signals);
        let place = rules::classify_place(&signals);
        let licence = rules::classify_licence(&signals);
        let (embargo, embargo_months, embargo_source) =
            rules::classify_embargo(&signals, &self.config);
        signals.explanation.add("classifying conditions");
        let conditions =
            rules::classify_conditions(&mut signals, place.level, licence.level, version.level);

        let scores = vec![place, licence, version, embargo, conditions];
        let levels = [
            scores[0].level,
            scores[1].level,
            scores[2].level,
            scores[3].level,
            scores[4].level,
        ];
        let coat = Coat::from_checked(String::new(), levels);
        let color = color_for(Some(&coat));
        let coat = coat.with_label(color.label());
        let (apc, apc_source) = match signals.apc() {
            Some((amount, source)) => (Some(amount), Some(source)),
            None => (None, None),
        };

        ClassificationOutcome {
            doi: evidence.doi.clone(),
            coat: Some(coat),
            color,
            sources: signals.sources,
            scores,
            licence: signals.licence,
            embargo_months,
            embargo_source,
            apc,
            apc_source,
            unpaywall_color: signals.unpaywall_color,
            oa_place: signals.host_type,
            oa_version: signals.oa_version,
            oa_link: signals.oa_url,
            warnings: signals.warnings,
            explanation: signals.explanation.into_steps(),
        }
    }
}
