//! Applicant intake, feature encoding and predictor-backed eligibility decisions.
//!
//! The encoder and [`decide`] form the core; [`EligibilityService`] and the router are the
//! caller boundary that validates input and reports failures without crashing.

pub mod decision;
pub mod domain;
pub mod encoder;
pub mod model;
pub mod predictor;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use decision::{decide, Decision, DecisionError};
pub use domain::{
    Answer, ApplicantInput, Dependents, Education, Gender, LoanTerm, PropertyArea,
};
pub use encoder::{encode, Feature, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use model::{LinearPipeline, ModelLoadError, StandardScaler};
pub use predictor::{Predictor, PredictorError};
pub use router::eligibility_router;
pub use service::{
    Assessment, AssessmentView, BatchOutcome, BatchRowError, EligibilityService,
    EligibilityServiceError,
};
pub use validation::ValidationError;
