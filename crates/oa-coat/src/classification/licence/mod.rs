//! Licence normalization: free text or URL to a canonical family with an openness rank.

mod normalizer;
mod vocabulary;

pub use normalizer::{classify_licence, normalize_licence, LicenceNormalizer};
pub use vocabulary::{LicenceVocabulary, PublisherTerms};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Openness rank of a licence; lower is more open.
///
/// Variant order is the rank order, so `Ord` answers "is A more open than B".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenceType {
    /// CC0, CC BY, CC BY-SA and public domain.
    Open,
    /// Remaining Creative Commons licences.
    Free,
    /// Publisher specific terms.
    Proprietary,
    /// No licence or nothing to go on.
    Unknown,
}

impl LicenceType {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Open => 1,
            Self::Free => 2,
            Self::Proprietary => 3,
            Self::Unknown => 4,
        }
    }

    /// Strictly more open than `other`; anything beats a missing licence.
    pub fn is_better(self, other: Option<LicenceType>) -> bool {
        other.map_or(true, |other| self < other)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OpenLicence",
            Self::Free => "FreeLicence",
            Self::Proprietary => "ProprietaryLicence",
            Self::Unknown => "UnknownLicence",
        }
    }
}

impl fmt::Display for LicenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical licence families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenceFamily {
    #[serde(rename = "CC0")]
    Cc0,
    #[serde(rename = "CC BY")]
    CcBy,
    #[serde(rename = "CC BY-SA")]
    CcBySa,
    #[serde(rename = "CC BY-NC")]
    CcByNc,
    #[serde(rename = "CC BY-NC-SA")]
    CcByNcSa,
    #[serde(rename = "CC BY-ND")]
    CcByNd,
    #[serde(rename = "CC BY-NC-ND")]
    CcByNcNd,
    #[serde(rename = "PD")]
    PublicDomain,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "none")]
    None,
}

impl LicenceFamily {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cc0 => "CC0",
            Self::CcBy => "CC BY",
            Self::CcBySa => "CC BY-SA",
            Self::CcByNc => "CC BY-NC",
            Self::CcByNcSa => "CC BY-NC-SA",
            Self::CcByNd => "CC BY-ND",
            Self::CcByNcNd => "CC BY-NC-ND",
            Self::PublicDomain => "PD",
            Self::Other => "other",
            Self::None => "none",
        }
    }

    pub const fn licence_type(self) -> LicenceType {
        match self {
            Self::Cc0 | Self::CcBy | Self::CcBySa | Self::PublicDomain => LicenceType::Open,
            Self::CcByNc | Self::CcByNcSa | Self::CcByNd | Self::CcByNcNd => LicenceType::Free,
            Self::Other => LicenceType::Proprietary,
            Self::None => LicenceType::Unknown,
        }
    }

    /// Family for a set of Creative Commons elements, `None` for invalid combinations.
    pub const fn from_elements(by: bool, sa: bool, nc: bool, nd: bool) -> Option<Self> {
        match (by, sa, nc, nd) {
            (true, false, false, false) => Some(Self::CcBy),
            (true, true, false, false) => Some(Self::CcBySa),
            (true, false, true, false) => Some(Self::CcByNc),
            (true, true, true, false) => Some(Self::CcByNcSa),
            (true, false, false, true) => Some(Self::CcByNd),
            (true, false, true, true) => Some(Self::CcByNcNd),
            _ => None,
        }
    }
}

impl fmt::Display for LicenceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of normalizing one raw licence statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedLicence {
    pub family: LicenceFamily,
    /// Version such as `4.0`, empty when none was stated.
    #[serde(default)]
    pub version: String,
}

impl NormalizedLicence {
    pub fn new(family: LicenceFamily, version: impl Into<String>) -> Self {
        Self {
            family,
            version: version.into(),
        }
    }

    pub fn unversioned(family: LicenceFamily) -> Self {
        Self::new(family, String::new())
    }

    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    pub fn licence_type(&self) -> LicenceType {
        self.family.licence_type()
    }
}

impl fmt::Display for NormalizedLicence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            f.write_str(self.name())
        } else {
            write!(f, "{} {}", self.name(), self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_order_matches_openness() {
        assert!(LicenceType::Open < LicenceType::Free);
        assert!(LicenceType::Proprietary < LicenceType::Unknown);
        assert!(LicenceType::Free.is_better(None));
        assert!(LicenceType::Free.is_better(Some(LicenceType::Unknown)));
        assert!(!LicenceType::Free.is_better(Some(LicenceType::Free)));
        assert_eq!(LicenceType::Proprietary.rank(), 3);
    }

    #[test]
    fn element_sets_map_to_families() {
        assert_eq!(
            LicenceFamily::from_elements(true, false, true, true),
            Some(LicenceFamily::CcByNcNd)
        );
        assert_eq!(LicenceFamily::from_elements(true, true, false, true), None);
        assert_eq!(LicenceFamily::from_elements(false, true, false, false), None);
    }

    #[test]
    fn families_serialize_as_display_names() {
        let json = serde_json::to_string(&NormalizedLicence::new(LicenceFamily::CcBySa, "4.0"))
            .expect("serialize licence");
        assert_eq!(json, r#"{"family":"CC BY-SA","version":"4.0"}"#);
    }
}
