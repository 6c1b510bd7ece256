use crate::classification::licence::LicenceNormalizer;
use crate::classification::selection::select_best_licence;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossrefEvidence {
    /// Licence URLs as registered with the DOI.
    #[serde(default)]
    pub licences: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issns: Vec<String>,
}

impl CrossrefEvidence {
    pub fn best_licence(&self, normalizer: &LicenceNormalizer) -> Option<&str> {
        select_best_licence(normalizer, &self.licences).map(String::as_str)
    }

    /// Explicit year, else the year of the publication date.
    pub fn year(&self) -> Option<i32> {
        self.publication_year
            .or_else(|| self.published_on.map(|date| date.year()))
    }
}

/// Subset of a Crossref `works` message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefWork {
    #[serde(rename = "DOI", default)]
    pub doi: String,
    #[serde(default)]
    pub license: Vec<CrossrefLicence>,
    #[serde(rename = "published-online", default)]
    pub published_online: Option<DateParts>,
    #[serde(rename = "published-print", default)]
    pub published_print: Option<DateParts>,
    #[serde(rename = "ISSN", default)]
    pub issn: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefLicence {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "content-version", default)]
    pub content_version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateParts {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl DateParts {
    fn parts(&self) -> Vec<i32> {
        self.date_parts
            .first()
            .map(|parts| parts.iter().map_while(|part| *part).collect())
            .unwrap_or_default()
    }

    pub fn year(&self) -> Option<i32> {
        self.parts().first().copied()
    }

    /// Full date; missing month or day fall back to the first of the period.
    pub fn date(&self) -> Option<NaiveDate> {
        let parts = self.parts();
        let year = *parts.first()?;
        let month = parts.get(1).copied().unwrap_or(1);
        let day = parts.get(2).copied().unwrap_or(1);
        NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
    }
}

impl CrossrefWork {
    pub fn into_evidence(self) -> CrossrefEvidence {
        let published = self.published_online.as_ref().or(self.published_print.as_ref());
        CrossrefEvidence {
            licences: self.license.into_iter().map(|licence| licence.url).collect(),
            publication_year: published.and_then(DateParts::year),
            published_on: published.and_then(DateParts::date),
            issns: self.issn,
        }
    }
}
