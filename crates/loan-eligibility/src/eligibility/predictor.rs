use std::sync::Arc;

use super::encoder::FeatureVector;

/// Pre-trained classifier invoked with one encoded applicant at a time.
///
/// Implementations are read-only after loading and can be shared across threads without locks.
pub trait Predictor: Send + Sync {
    /// Return the raw class label for a single example.
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictorError>;
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictorError> {
        (**self).predict(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictorError> {
        (**self).predict(features)
    }
}

/// Failure raised while invoking a predictor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictorError {
    #[error("model expects {expected} features but was given {found}")]
    SchemaMismatch { expected: usize, found: usize },
    #[error("{0}")]
    Internal(String),
}
