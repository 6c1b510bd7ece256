//! Shortest usable embargo from a publisher policy document.

use super::warning::EvidenceWarning;
use crate::sources::sherpa::{
    EmbargoSpec, PermittedOa, PolicyDocument, ARTICLE_VERSION_ACCEPTED, ARTICLE_VERSION_PUBLISHED,
};
use serde::Serialize;
use tracing::{debug, error};

/// Resolved embargo plus the data problems met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbargoResolution {
    /// `None` when no usable route carried an embargo.
    pub months: Option<u32>,
    pub warnings: Vec<EvidenceWarning>,
}

/// Minimum embargo in months over every free route without prerequisites.
///
/// Routes are split into accepted-manuscript and published-version routes, each
/// partition tracks its own minimum and the smaller of the two wins.
pub fn resolve_embargo(policy: &PolicyDocument) -> EmbargoResolution {
    let mut min_accepted: Option<u32> = None;
    let mut min_published: Option<u32> = None;
    let mut warnings = Vec::new();

    for option in policy.permitted_options() {
        if option.has_additional_oa_fee() || option.has_prerequisites() {
            continue;
        }

        let partition = if option.has_article_version(ARTICLE_VERSION_ACCEPTED) {
            &mut min_accepted
        } else if option.has_article_version(ARTICLE_VERSION_PUBLISHED) {
            &mut min_published
        } else {
            continue;
        };

        match option_months(policy, option) {
            Ok(Some(months)) => {
                *partition = Some(partition.map_or(months, |current| current.min(months)));
            }
            Ok(None) => {}
            Err(warning) => warnings.push(warning),
        }
    }

    let months = match (min_accepted, min_published) {
        (Some(accepted), Some(published)) => Some(accepted.min(published)),
        (accepted, published) => accepted.or(published),
    };

    EmbargoResolution { months, warnings }
}

/// Embargo in months, `None` when unknown. Warnings are logged and dropped.
pub fn find_embargo_time(policy: &PolicyDocument) -> Option<u32> {
    resolve_embargo(policy).months
}

fn option_months(
    policy: &PolicyDocument,
    option: &PermittedOa,
) -> Result<Option<u32>, EvidenceWarning> {
    let Some(EmbargoSpec { amount, units }) = option.embargo.as_ref() else {
        return Ok(None);
    };
    let amount = *amount;

    if amount < 0 {
        error!(issns = %policy.issn_label(), amount, "negative embargo in policy data");
        return Err(EvidenceWarning::NegativeEmbargo {
            issns: policy.issn_label(),
            amount,
        });
    }

    let Some(units) = units.as_deref() else {
        if amount != 0 {
            error!(issns = %policy.issn_label(), amount, "policy data has embargo without unit");
            return Err(EvidenceWarning::MissingEmbargoUnit {
                issns: policy.issn_label(),
                amount,
            });
        }
        return Ok(Some(0));
    };

    let months = match units.trim().to_ascii_lowercase().as_str() {
        "months" | "month" => amount,
        "years" | "year" => amount.saturating_mul(12),
        "days" | "day" => {
            if amount != 0 {
                debug!(issns = %policy.issn_label(), amount, "embargo given in days");
            }
            amount / 30
        }
        _ => {
            error!(issns = %policy.issn_label(), units, "embargo with unhandled units");
            return Err(EvidenceWarning::UnknownEmbargoUnit {
                issns: policy.issn_label(),
                unit: units.to_string(),
            });
        }
    };

    Ok(Some(u32::try_from(months).unwrap_or(u32::MAX)))
}
