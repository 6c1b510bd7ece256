//! COAT classification: licence normalization, embargo resolution, evidence selection
//! and the ordinal tuple model.

pub mod amount;
pub mod coat;
pub mod color;
pub mod embargo;
pub mod engine;
pub mod licence;
pub mod selection;
mod warning;

pub use amount::Amount;
pub use coat::{Coat, CoatError, Dimension};
pub use color::{color_for, threshold_for, OaColor};
pub use embargo::{find_embargo_time, resolve_embargo, EmbargoResolution};
pub use engine::{
    ClassificationConfig, ClassificationEngine, ClassificationOutcome, ClassificationReport,
    CoatChange, DimensionScore, EvidenceSource, LicenceChoice, Reclassification, SourceSet,
};
pub use licence::{
    classify_licence, normalize_licence, LicenceFamily, LicenceNormalizer, LicenceType,
    LicenceVocabulary, NormalizedLicence, PublisherTerms,
};
pub use selection::{pick_best, resolve_fee, select_amount, select_best_licence, select_dominant};
pub use warning::EvidenceWarning;
