use serde::{Deserialize, Serialize};

/// Unpaywall resource, deserializable straight from the API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpaywallEvidence {
    #[serde(default)]
    pub is_oa: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_oa_location: Option<OaLocation>,
    /// Unpaywall's own colour, e.g. `gold` or `green`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oa_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OaLocation {
    #[serde(default)]
    pub host_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl UnpaywallEvidence {
    pub fn open_at(host_type: &str, version: &str, url: &str) -> Self {
        Self {
            is_oa: true,
            best_oa_location: Some(OaLocation {
                host_type: Some(host_type.to_string()),
                url: Some(url.to_string()),
                version: Some(version.to_string()),
            }),
            oa_status: None,
        }
    }

    /// Best OA location, only when the resource is open.
    pub fn location(&self) -> Option<&OaLocation> {
        self.best_oa_location.as_ref().filter(|_| self.is_oa)
    }

    pub fn host_type(&self) -> &str {
        self.location()
            .and_then(|location| location.host_type.as_deref())
            .unwrap_or("")
    }

    pub fn version(&self) -> &str {
        self.location()
            .and_then(|location| location.version.as_deref())
            .unwrap_or("")
    }

    pub fn url(&self) -> &str {
        self.location()
            .and_then(|location| location.url.as_deref())
            .unwrap_or("")
    }
}
