//! Open access classification engine.
//!
//! Reduces conflicting bibliographic evidence (licences, publisher policies, APC
//! records, OA locations) to one five-dimensional COAT tuple per publication.

pub mod classification;
pub mod config;
pub mod error;
pub mod sources;
pub mod telemetry;

pub use classification::{
    Amount, ClassificationConfig, ClassificationEngine, ClassificationOutcome, Coat, CoatError,
    EvidenceWarning, LicenceFamily, LicenceType, NormalizedLicence, OaColor,
};
pub use config::AppConfig;
pub use error::AppError;
pub use sources::PublicationEvidence;
