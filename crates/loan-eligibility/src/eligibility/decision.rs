use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use super::encoder::FeatureVector;
use super::predictor::{Predictor, PredictorError};

/// Binary eligibility outcome for one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Eligible,
    NotEligible,
}

impl Decision {
    /// Label 1 approves; every other label is a rejection.
    pub const fn from_label(label: i64) -> Self {
        if label == 1 {
            Decision::Eligible
        } else {
            Decision::NotEligible
        }
    }

    pub const fn is_eligible(self) -> bool {
        matches!(self, Decision::Eligible)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Decision::Eligible => "eligible",
            Decision::NotEligible => "not_eligible",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Decision::Eligible => "Eligible for Loan",
            Decision::NotEligible => "Not Eligible for Loan",
        }
    }

    pub const fn factors(self) -> &'static str {
        match self {
            Decision::Eligible => {
                "Factors contributing to approval: good credit history, sufficient income."
            }
            Decision::NotEligible => {
                "Possible reasons for rejection: low income, poor credit history, or other factors."
            }
        }
    }
}

/// Predictor failure surfaced to the caller as a reportable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("an error occurred during prediction: {message}")]
pub struct DecisionError {
    pub message: String,
}

impl From<PredictorError> for DecisionError {
    fn from(err: PredictorError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Run the predictor once and translate its label into a [`Decision`].
///
/// Errors and panics raised by the predictor are contained and returned as [`DecisionError`].
/// No retries are attempted.
pub fn decide<P>(vector: &FeatureVector, predictor: &P) -> Result<Decision, DecisionError>
where
    P: Predictor + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| predictor.predict(vector))) {
        Ok(Ok(label)) => Ok(Decision::from_label(label)),
        Ok(Err(err)) => Err(err.into()),
        Err(payload) => Err(DecisionError {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("predictor panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("predictor panicked: {message}")
    } else {
        "predictor panicked".to_string()
    }
}
