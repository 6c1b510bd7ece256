//! Sherpa/Romeo publisher policy documents in their native JSON shape.

use serde::{Deserialize, Serialize};

pub const ARTICLE_VERSION_ACCEPTED: &str = "accepted";
pub const ARTICLE_VERSION_PUBLISHED: &str = "published";
pub const ARTICLE_VERSION_SUBMITTED: &str = "submitted";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub issns: Vec<Issn>,
    #[serde(default)]
    pub publisher_policy: Vec<PublisherPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issn {
    pub issn: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublisherPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub open_access_prohibited: Option<String>,
    #[serde(default)]
    pub permitted_oa: Vec<PermittedOa>,
}

/// One permitted open access route of a publisher policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermittedOa {
    #[serde(default)]
    pub article_version: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_oa_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Prerequisites>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo: Option<EmbargoSpec>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prerequisites {
    #[serde(default)]
    pub prerequisite_funders: Vec<serde_json::Value>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub prerequisite_subjects: Vec<String>,
}

impl Prerequisites {
    pub fn is_empty(&self) -> bool {
        self.prerequisite_funders.is_empty()
            && self.prerequisites.is_empty()
            && self.prerequisite_subjects.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbargoSpec {
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl PolicyDocument {
    pub fn new<I, S>(issns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            issns: issns
                .into_iter()
                .map(|issn| Issn {
                    issn: issn.into(),
                    kind: None,
                })
                .collect(),
            publisher_policy: Vec::new(),
        }
    }

    /// Appends a policy holding the given routes.
    pub fn with_policy(mut self, options: Vec<PermittedOa>) -> Self {
        self.publisher_policy.push(PublisherPolicy {
            id: None,
            open_access_prohibited: None,
            permitted_oa: options,
        });
        self
    }

    /// ISSNs joined for log and warning messages.
    pub fn issn_label(&self) -> String {
        self.issns
            .iter()
            .map(|issn| issn.issn.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn permitted_options(&self) -> impl Iterator<Item = &PermittedOa> {
        self.publisher_policy
            .iter()
            .flat_map(|policy| policy.permitted_oa.iter())
    }
}

impl PermittedOa {
    pub fn for_versions(versions: &[&str]) -> Self {
        Self {
            article_version: versions.iter().map(|version| version.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_embargo(mut self, amount: i64, units: Option<&str>) -> Self {
        self.embargo = Some(EmbargoSpec {
            amount,
            units: units.map(str::to_string),
        });
        self
    }

    pub fn with_additional_fee(mut self) -> Self {
        self.additional_oa_fee = Some("yes".to_string());
        self
    }

    pub fn with_funder_prerequisite(mut self, funder: serde_json::Value) -> Self {
        self.prerequisites
            .get_or_insert_with(Prerequisites::default)
            .prerequisite_funders
            .push(funder);
        self
    }

    pub fn has_additional_oa_fee(&self) -> bool {
        self.additional_oa_fee
            .as_deref()
            .is_some_and(|fee| fee.trim().eq_ignore_ascii_case("yes"))
    }

    pub fn has_prerequisites(&self) -> bool {
        self.prerequisites
            .as_ref()
            .is_some_and(|prerequisites| !prerequisites.is_empty())
    }

    pub fn has_article_version(&self, version: &str) -> bool {
        self.article_version
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_native_policy_json() {
        let json = r#"{
            "id": 1234,
            "issns": [{"issn": "1234-5678", "type": "print"}],
            "publisher_policy": [{
                "id": 99,
                "open_access_prohibited": "no",
                "permitted_oa": [{
                    "article_version": ["accepted"],
                    "additional_oa_fee": "no",
                    "embargo": {"amount": 12, "units": "months"},
                    "location": {"location": ["institutional_repository"]}
                }]
            }]
        }"#;
        let document: PolicyDocument = serde_json::from_str(json).expect("policy json");
        let option = document.permitted_options().next().expect("one option");
        assert!(option.has_article_version("accepted"));
        assert!(!option.has_additional_oa_fee());
        assert_eq!(
            option.embargo,
            Some(EmbargoSpec {
                amount: 12,
                units: Some("months".to_string())
            })
        );
        assert_eq!(document.issn_label(), "1234-5678");
    }

    #[test]
    fn empty_prerequisites_do_not_count() {
        let mut option = PermittedOa::for_versions(&[ARTICLE_VERSION_PUBLISHED]);
        option.prerequisites = Some(Prerequisites::default());
        assert!(!option.has_prerequisites());

        let option = option.with_funder_prerequisite(serde_json::json!({"funder_metadata": {"id": 7}}));
        assert!(option.has_prerequisites());
    }
}
