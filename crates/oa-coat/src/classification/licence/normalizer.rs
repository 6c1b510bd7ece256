use super::vocabulary::LicenceVocabulary;
use super::{LicenceFamily, LicenceType, NormalizedLicence};
use std::sync::Arc;
use tracing::debug;

/// Maps raw licence statements to canonical families.
///
/// Total and pure: malformed input degrades to `other`, empty input to `none`.
#[derive(Debug, Clone)]
pub struct LicenceNormalizer {
    vocabulary: Arc<LicenceVocabulary>,
}

impl Default for LicenceNormalizer {
    fn default() -> Self {
        Self::new(LicenceVocabulary::standard())
    }
}

impl LicenceNormalizer {
    pub fn new(vocabulary: Arc<LicenceVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &LicenceVocabulary {
        &self.vocabulary
    }

    pub fn normalize(&self, raw: &str) -> NormalizedLicence {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return NormalizedLicence::unversioned(LicenceFamily::None);
        }

        // Only the first of several comma-separated licences counts.
        let licence = lowered.split(',').next().unwrap_or_default().trim();

        self.recognize(licence).unwrap_or_else(|| {
            debug!(licence = raw, "licence not recognised");
            NormalizedLicence::unversioned(LicenceFamily::Other)
        })
    }

    pub fn classify(&self, raw: &str) -> LicenceType {
        self.normalize(raw).licence_type()
    }

    fn recognize(&self, licence: &str) -> Option<NormalizedLicence> {
        if licence.starts_with("cc") {
            return parse_short_code(licence);
        }

        let vocabulary = &*self.vocabulary;
        if let Some(rest) = after(licence, vocabulary.cc_licences_path) {
            let mut segments = rest.split('/');
            let kind = strip_query(segments.next().unwrap_or_default());
            let version = version_segment(segments.next());
            let family = parse_elements(kind.split(['-', '_', '+']))
                .map(|parsed| parsed.family)
                .unwrap_or(LicenceFamily::Other);
            return Some(NormalizedLicence::new(family, version));
        }

        if let Some(rest) = after(licence, vocabulary.cc_zero_path) {
            let version = version_segment(rest.split('/').next());
            return Some(NormalizedLicence::new(LicenceFamily::Cc0, version));
        }

        if licence == "pd"
            || licence.contains(vocabulary.cc_mark_path)
            || vocabulary
                .public_domain_markers
                .iter()
                .any(|marker| licence.contains(marker))
        {
            return Some(NormalizedLicence::unversioned(LicenceFamily::PublicDomain));
        }

        vocabulary.publisher_terms.iter().find_map(|terms| {
            let rest = after(licence, terms.marker)?;
            let code = rest
                .split(|c: char| terms.terminators.contains(&c))
                .next()
                .unwrap_or_default();
            if !code.starts_with("cc") {
                return None;
            }
            parse_short_code(code).map(|parsed| NormalizedLicence::unversioned(parsed.family))
        })
    }
}

/// Normalizes with the standard vocabulary.
pub fn normalize_licence(raw: &str) -> NormalizedLicence {
    LicenceNormalizer::default().normalize(raw)
}

/// Ranks with the standard vocabulary.
pub fn classify_licence(raw: &str) -> LicenceType {
    LicenceNormalizer::default().classify(raw)
}

fn after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack
        .find(marker)
        .map(|position| &haystack[position + marker.len()..])
}

fn strip_query(segment: &str) -> &str {
    segment
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
}

fn version_segment(segment: Option<&str>) -> String {
    segment
        .map(strip_query)
        .filter(|candidate| is_version(candidate))
        .unwrap_or_default()
        .to_string()
}

fn is_version(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Parses `cc-by-nc-nd`, `cc by-sa 4.0`, `ccbyncnd`, `cc0` and the like.
fn parse_short_code(code: &str) -> Option<NormalizedLicence> {
    let rest = code.strip_prefix("cc")?;
    parse_elements(rest.split(['-', '_', ' ', '/']))
        .or_else(|| Some(NormalizedLicence::unversioned(LicenceFamily::Other)))
}

#[derive(Default)]
struct Elements {
    by: bool,
    sa: bool,
    nc: bool,
    nd: bool,
    zero: bool,
}

impl Elements {
    fn any(&self) -> bool {
        self.by || self.sa || self.nc || self.nd
    }

    fn add_pairs(&mut self, letters: &str) -> Option<()> {
        if letters == "zero" {
            self.zero = true;
            return Some(());
        }
        if letters.len() % 2 != 0 || !letters.is_ascii() {
            return None;
        }
        for index in (0..letters.len()).step_by(2) {
            match &letters[index..index + 2] {
                "by" => self.by = true,
                "sa" => self.sa = true,
                "nc" => self.nc = true,
                "nd" => self.nd = true,
                _ => return None,
            }
        }
        Some(())
    }

    fn family(&self) -> Option<LicenceFamily> {
        if self.zero {
            return (!self.any()).then_some(LicenceFamily::Cc0);
        }
        LicenceFamily::from_elements(self.by, self.sa, self.nc, self.nd)
    }
}

/// Collects Creative Commons elements from tokens; a version token ends the scan.
fn parse_elements<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<NormalizedLicence> {
    let mut elements = Elements::default();
    let mut version = String::new();

    for token in tokens.filter(|token| !token.is_empty()) {
        let split = token
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(token.len());
        let (letters, tail) = token.split_at(split);

        if !letters.is_empty() {
            elements.add_pairs(letters)?;
        }
        if tail.is_empty() {
            continue;
        }
        if tail == "0" && !elements.zero && !elements.any() {
            elements.zero = true;
        } else if is_version(tail) {
            version = tail.to_string();
            break;
        } else {
            return None;
        }
    }

    elements
        .family()
        .map(|family| NormalizedLicence::new(family, version))
}
