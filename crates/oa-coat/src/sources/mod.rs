//! Evidence records handed to the engine by the source adapters.

pub mod crossref;
pub mod doaj;
pub mod openapc;
pub mod sherpa;
pub mod unpaywall;

pub use crossref::{CrossrefEvidence, CrossrefWork};
pub use doaj::{parse_doaj_rows, DoajBibjson, DoajEvidence, DoajRow};
pub use openapc::{parse_openapc_rows, select_openapc_record, OpenApcEvidence, OpenApcRow};
pub use sherpa::{EmbargoSpec, PermittedOa, PolicyDocument, Prerequisites, PublisherPolicy};
pub use unpaywall::{OaLocation, UnpaywallEvidence};

use serde::{Deserialize, Serialize};

/// Everything known about one publication, one optional record per source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationEvidence {
    pub doi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crossref: Option<CrossrefEvidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpaywall: Option<UnpaywallEvidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doaj: Option<DoajEvidence>,
    /// Duplicate OpenAPC records for the DOI are possible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openapc: Vec<OpenApcEvidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sherpa: Option<PolicyDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openalex_licence: Option<String>,
}

impl PublicationEvidence {
    pub fn new(doi: impl Into<String>) -> Self {
        Self {
            doi: doi.into(),
            ..Self::default()
        }
    }

    pub fn with_crossref(mut self, crossref: CrossrefEvidence) -> Self {
        self.crossref = Some(crossref);
        self
    }

    pub fn with_unpaywall(mut self, unpaywall: UnpaywallEvidence) -> Self {
        self.unpaywall = Some(unpaywall);
        self
    }

    pub fn with_doaj(mut self, doaj: DoajEvidence) -> Self {
        self.doaj = Some(doaj);
        self
    }

    pub fn with_openapc(mut self, record: OpenApcEvidence) -> Self {
        self.openapc.push(record);
        self
    }

    pub fn with_sherpa(mut self, policy: PolicyDocument) -> Self {
        self.sherpa = Some(policy);
        self
    }

    pub fn with_openalex_licence(mut self, licence: impl Into<String>) -> Self {
        self.openalex_licence = Some(licence.into());
        self
    }
}

/// Boolean CSV flag; `Yes` and `TRUE` in any case count as true.
pub fn parse_flag(raw: &str) -> bool {
    let value = raw.trim();
    value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true")
}

/// Empty CSV cells become `None`.
pub(crate) fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
