use super::config::ClassificationConfig;
use super::outcome::DimensionScore;
use super::signals::ClassificationSignals;
use crate::classification::coat::{Dimension, WORST_LEVEL};
use crate::classification::licence::LicenceType;

const HOST_PUBLISHER: &str = "publisher";
const HOST_REPOSITORY: &str = "repository";

fn score(dimension: Dimension, level: u8, note: impl Into<String>) -> DimensionScore {
    DimensionScore {
        dimension,
        level,
        note: note.into(),
    }
}

/// Version of the best OA copy. Runs before place.
pub(crate) fn classify_version(signals: &ClassificationSignals) -> DimensionScore {
    let mut result = score(Dimension::Version, WORST_LEVEL, "<default>");

    if signals.host_type == HOST_PUBLISHER {
        result = score(Dimension::Version, 1, "upw:hosttype = publisher");
    }
    match signals.oa_version.as_str() {
        "publishedVersion" => {
            result = score(Dimension::Version, 1, "upw:oaversion = publishedVersion")
        }
        "acceptedVersion" => result = score(Dimension::Version, 2, "upw:oaversion = acceptedVersion"),
        "submittedVersion" => {
            result = score(Dimension::Version, 3, "upw:oaversion = submittedVersion")
        }
        _ => {}
    }

    if signals.in_doaj {
        result = score(Dimension::Version, 1, "inDoaj");
    } else if signals.in_openapc {
        result = score(Dimension::Version, 1, "inOpenApc");
    }
    result
}

pub(crate) fn classify_place(signals: &ClassificationSignals) -> DimensionScore {
    let result = match signals.host_type.as_str() {
        HOST_PUBLISHER => score(Dimension::Place, 1, "upw:hosttype = publisher"),
        HOST_REPOSITORY => score(Dimension::Place, 2, "upw:hosttype = repository"),
        _ => score(Dimension::Place, WORST_LEVEL, "<default>"),
    };

    if result.level > 1 {
        if signals.in_openapc {
            return score(Dimension::Place, 1, "inOpenApc");
        }
        if signals.in_doaj {
            return score(Dimension::Place, 1, "inDoaj");
        }
    }
    result
}

pub(crate) fn classify_licence(signals: &ClassificationSignals) -> DimensionScore {
    match signals.licence.as_ref() {
        Some(choice) => score(
            Dimension::Licence,
            choice.licence_type.rank(),
            choice.source.label(),
        ),
        None => score(Dimension::Licence, WORST_LEVEL, "<default>"),
    }
}

/// Embargo level plus the months it was derived from and their source.
pub(crate) fn classify_embargo(
    signals: &ClassificationSignals,
    config: &ClassificationConfig,
) -> (DimensionScore, Option<u32>, String) {
    let (months, source) = match signals.licence.as_ref() {
        Some(choice) if choice.licence_type.is_better(Some(LicenceType::Proprietary)) => {
            (Some(0), format!("free/open licence {}", choice.source))
        }
        _ if signals.in_openapc => (Some(0), "inOpenApc".to_string()),
        _ if signals.in_doaj => (Some(0), "inDoaj".to_string()),
        _ => match signals.embargo_romeo {
            Some(months) => (Some(months), "SherpaRomeo".to_string()),
            None => (None, "<default>".to_string()),
        },
    };

    let level = match months {
        None => WORST_LEVEL,
        Some(0) => 1,
        Some(months) if months < config.embargo_short_months => 2,
        Some(months) if months < config.embargo_medium_months => 3,
        Some(_) => WORST_LEVEL,
    };
    let note = if months.is_none() {
        "embargo unknown".to_string()
    } else {
        source.clone()
    };

    (score(Dimension::Embargo, level, note), months, source)
}

/// Cost conditions; depends on the place, licence and version levels already set.
pub(crate) fn classify_conditions(
    signals: &mut ClassificationSignals,
    place: u8,
    licence: u8,
    version: u8,
) -> DimensionScore {
    let hybrid = match signals.openapc_hybrid {
        Some(hybrid) => {
            signals
                .explanation
                .add(format!("hybrid = {hybrid} (source OpenAPC)"));
            hybrid
        }
        None => {
            let hybrid = !signals.in_doaj && (licence == 1 || licence == 2);
            signals.explanation.add(format!(
                "hybrid = {hybrid} (derived from DOAJ listing and licence level {licence})"
            ));
            hybrid
        }
    };

    let apc = signals.apc().map(|(amount, _)| amount);
    match apc {
        Some(amount) if amount.is_free() => score(Dimension::Conditions, 1, "apc = 0"),
        Some(amount) if amount.charges_fee() && !hybrid => {
            score(Dimension::Conditions, 2, "apc > 0 && !hybrid")
        }
        Some(amount) if amount.charges_fee() => score(Dimension::Conditions, 3, "apc > 0 && hybrid"),
        _ if place == 2 => score(Dimension::Conditions, 1, "coat.place = 2"),
        _ if version != 1 && version != WORST_LEVEL => score(
            Dimension::Conditions,
            1,
            "coat.version != 1 && coat.version != 4",
        ),
        _ if version < WORST_LEVEL => score(Dimension::Conditions, 3, "coat.version < 4"),
        _ => score(Dimension::Conditions, WORST_LEVEL, "<default>"),
    }
}
