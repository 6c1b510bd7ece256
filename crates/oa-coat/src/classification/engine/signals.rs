use super::outcome::{EvidenceSource, LicenceChoice, SourceSet};
use crate::classification::amount::Amount;
use crate::classification::embargo::resolve_embargo;
use crate::classification::licence::LicenceNormalizer;
use crate::classification::EvidenceWarning;
use crate::sources::{select_openapc_record, PublicationEvidence};
use tracing::debug;

/// Steps recorded for a human reader; a no-op unless enabled.
#[derive(Debug, Default)]
pub(crate) struct Explanation {
    enabled: bool,
    steps: Vec<String>,
}

impl Explanation {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
        }
    }

    pub fn add(&mut self, step: impl Into<String>) {
        if self.enabled {
            self.steps.push(step.into());
        }
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

/// Evidence reduced to the facts the rules look at.
pub(crate) struct ClassificationSignals {
    pub sources: SourceSet,
    pub host_type: String,
    pub oa_version: String,
    pub oa_url: String,
    pub unpaywall_color: Option<String>,
    pub in_doaj: bool,
    pub in_openapc: bool,
    pub openapc_hybrid: Option<bool>,
    pub openapc_apc: Option<Amount>,
    pub doaj_apc: Option<Amount>,
    pub licence: Option<LicenceChoice>,
    pub embargo_romeo: Option<u32>,
    pub warnings: Vec<EvidenceWarning>,
    pub explanation: Explanation,
}

impl ClassificationSignals {
    pub fn gather(
        evidence: &PublicationEvidence,
        normalizer: &LicenceNormalizer,
        explain: bool,
    ) -> Self {
        let mut signals = Self {
            sources: SourceSet::default(),
            host_type: String::new(),
            oa_version: String::new(),
            oa_url: String::new(),
            unpaywall_color: None,
            in_doaj: false,
            in_openapc: false,
            openapc_hybrid: None,
            openapc_apc: None,
            doaj_apc: None,
            licence: None,
            embargo_romeo: None,
            warnings: Vec::new(),
            explanation: Explanation::new(explain),
        };

        let mut publication_year = None;
        let mut published_on = None;

        if let Some(crossref) = evidence.crossref.as_ref() {
            signals.sources.insert(EvidenceSource::Crossref);
            signals.explanation.add("DOI found in Crossref");
            publication_year = crossref.year();
            published_on = crossref.published_on;
            if let Some(url) = crossref.best_licence(normalizer) {
                signals.licence = Some(choose(normalizer, url, EvidenceSource::Crossref));
                signals.explanation.add(format!("crossref licence url: {url}"));
            }
            if let Some(year) = publication_year {
                signals.explanation.add(format!("publication year: {year}"));
            }
        }

        if let Some(unpaywall) = evidence.unpaywall.as_ref() {
            signals.sources.insert(EvidenceSource::Unpaywall);
            signals.host_type = unpaywall.host_type().to_string();
            signals.oa_version = unpaywall.version().to_string();
            signals.oa_url = unpaywall.url().to_string();
            signals.unpaywall_color = unpaywall.oa_status.clone();
            signals.explanation.add(format!(
                "DOI found in Unpaywall: host type '{}', version '{}'",
                signals.host_type, signals.oa_version
            ));
        }

        if let Some(doaj) = evidence.doaj.as_ref() {
            if doaj.covers(publication_year, published_on) {
                signals.sources.insert(EvidenceSource::Doaj);
                signals.in_doaj = true;
                signals.doaj_apc = doaj.apc.clone();
                signals.explanation.add("journal listed in DOAJ");
                if let Some(licence) = doaj.licence.as_deref() {
                    let candidate = choose(normalizer, licence, EvidenceSource::Doaj);
                    let current = signals.licence.as_ref().map(|choice| choice.licence_type);
                    if candidate.licence_type.is_better(current) {
                        signals.licence = Some(candidate);
                    }
                }
            } else {
                debug!(doi = %evidence.doi, "DOAJ listing does not cover publication");
                signals.explanation.add(format!(
                    "journal in DOAJ, but not for this publication (oa start {:?}, withdrawn {:?})",
                    doaj.oa_start, doaj.withdrawn_on
                ));
            }
        }

        if let Some(record) = select_openapc_record(&evidence.openapc) {
            signals.sources.insert(EvidenceSource::OpenApc);
            signals.in_openapc = true;
            signals.openapc_hybrid = Some(record.hybrid);
            signals.openapc_apc = record.apc();
            signals.explanation.add(format!(
                "DOI found in OpenAPC: hybrid {}, transformative agreement {}",
                record.hybrid, record.transformative_agreement
            ));
        }

        if let Some(policy) = evidence.sherpa.as_ref() {
            signals.sources.insert(EvidenceSource::Romeo);
            let resolution = resolve_embargo(policy);
            signals.embargo_romeo = resolution.months;
            signals.warnings.extend(resolution.warnings);
            signals
                .explanation
                .add(format!("Sherpa/Romeo embargo: {:?}", resolution.months));
        }

        if signals.licence.is_none() {
            if let Some(licence) = evidence.openalex_licence.as_deref() {
                signals.licence = Some(choose(normalizer, licence, EvidenceSource::OpenAlex));
            }
        }
        if let Some(choice) = signals.licence.as_ref() {
            let step = format!("using {} licence from {}", choice.normalized, choice.source);
            signals.explanation.add(step);
        }

        signals
    }

    /// OpenAPC amount when known, else the DOAJ APC.
    pub fn apc(&self) -> Option<(Amount, EvidenceSource)> {
        if self.in_openapc {
            if let Some(amount) = self.openapc_apc.clone() {
                return Some((amount, EvidenceSource::OpenApc));
            }
        }
        self.doaj_apc
            .clone()
            .map(|amount| (amount, EvidenceSource::Doaj))
    }
}

fn choose(normalizer: &LicenceNormalizer, raw: &str, source: EvidenceSource) -> LicenceChoice {
    let normalized = normalizer.normalize(raw);
    LicenceChoice {
        raw: raw.to_string(),
        licence_type: normalized.licence_type(),
        normalized,
        source,
    }
}
