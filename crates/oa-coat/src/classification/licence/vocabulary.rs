use std::sync::{Arc, OnceLock};

/// Publisher URL that embeds a compact Creative Commons code.
///
/// The code starts right after `marker` and runs to the first terminator
/// character (or the end of the input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherTerms {
    pub publisher: &'static str,
    pub marker: &'static str,
    pub terminators: &'static [char],
}

/// Read-only lookup tables used by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenceVocabulary {
    pub cc_licences_path: &'static str,
    pub cc_zero_path: &'static str,
    pub cc_mark_path: &'static str,
    pub public_domain_markers: &'static [&'static str],
    pub publisher_terms: Vec<PublisherTerms>,
}

static STANDARD_VOCABULARY: OnceLock<Arc<LicenceVocabulary>> = OnceLock::new();

impl LicenceVocabulary {
    /// Shared default vocabulary, built once on first use.
    pub fn standard() -> Arc<LicenceVocabulary> {
        STANDARD_VOCABULARY
            .get_or_init(|| Arc::new(Self::build_standard()))
            .clone()
    }

    fn build_standard() -> Self {
        Self {
            cc_licences_path: "creativecommons.org/licenses/",
            cc_zero_path: "creativecommons.org/publicdomain/zero/",
            cc_mark_path: "creativecommons.org/publicdomain/mark/",
            public_domain_markers: &["public domain", "publicdomain"],
            publisher_terms: vec![
                // https://pubs.acs.org/page/policy/authorchoice_ccbyncnd_termsofuse.html
                PublisherTerms {
                    publisher: "American Chemical Society",
                    marker: "authorchoice_",
                    terminators: &['_', '.', '/'],
                },
                // https://doi.org/10.1364/OA_License_v1#CCBY
                PublisherTerms {
                    publisher: "Optica Publishing Group",
                    marker: "#",
                    terminators: &['/', '?'],
                },
            ],
        }
    }

    /// Adds a publisher terms-of-use pattern; later entries are checked last.
    pub fn with_publisher_terms(mut self, terms: PublisherTerms) -> Self {
        self.publisher_terms.push(terms);
        self
    }
}

impl Default for LicenceVocabulary {
    fn default() -> Self {
        Self::build_standard()
    }
}
