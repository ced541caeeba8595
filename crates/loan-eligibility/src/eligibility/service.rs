use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::decision::{decide, Decision, DecisionError};
use super::domain::ApplicantInput;
use super::encoder::{encode, FeatureVector};
use super::predictor::Predictor;
use super::validation::ValidationError;

/// Caller boundary composing validation, encoding and the predictor call.
pub struct EligibilityService<P> {
    predictor: Arc<P>,
}

impl<P> EligibilityService<P>
where
    P: Predictor + 'static,
{
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &Arc<P> {
        &self.predictor
    }

    /// Decide a single applicant.
    pub fn assess(&self, input: &ApplicantInput) -> Result<Assessment, EligibilityServiceError> {
        if let Err(err) = input.validate() {
            warn!(field = err.field(), %err, "applicant input rejected");
            return Err(err.into());
        }

        let features = encode(input);
        match decide(&features, self.predictor.as_ref()) {
            Ok(decision) => {
                info!(decision = decision.label(), "eligibility decided");
                Ok(Assessment {
                    decision,
                    features,
                    assessed_at: Utc::now(),
                })
            }
            Err(err) => {
                error!(%err, "eligibility decision failed");
                Err(err.into())
            }
        }
    }

    /// Decide every row of a CSV export whose header uses the model's column names.
    ///
    /// Rows are independent: a malformed or invalid row produces an error entry and scoring
    /// continues. Only an unreadable header aborts the batch.
    pub fn assess_batch<R: Read>(&self, reader: R) -> Result<Vec<BatchOutcome>, csv::Error> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        reader.headers()?;

        let outcomes: Vec<BatchOutcome> = reader
            .deserialize::<ApplicantInput>()
            .enumerate()
            .map(|(index, row)| {
                let outcome = match row {
                    Ok(input) => self.assess(&input).map_err(BatchRowError::from),
                    Err(err) => Err(BatchRowError::Parse(err.to_string())),
                };
                BatchOutcome {
                    row: index + 1,
                    outcome,
                }
            })
            .collect();

        let eligible = outcomes
            .iter()
            .filter(|entry| matches!(&entry.outcome, Ok(assessment) if assessment.decision.is_eligible()))
            .count();
        info!(rows = outcomes.len(), eligible, "batch assessment finished");

        Ok(outcomes)
    }
}

/// Result of one eligibility request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub decision: Decision,
    pub features: FeatureVector,
    pub assessed_at: DateTime<Utc>,
}

impl Assessment {
    pub fn view(&self) -> AssessmentView {
        AssessmentView {
            decision: self.decision.label(),
            headline: self.decision.headline(),
            factors: self.decision.factors(),
            features: self.features,
            assessed_at: self.assessed_at,
        }
    }
}

/// Response payload rendered by the API and CLI.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub decision: &'static str,
    pub headline: &'static str,
    pub factors: &'static str,
    pub features: FeatureVector,
    pub assessed_at: DateTime<Utc>,
}

/// Per-row outcome of a batch run. `row` is 1-based and excludes the header.
#[derive(Debug)]
pub struct BatchOutcome {
    pub row: usize,
    pub outcome: Result<Assessment, BatchRowError>,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchRowError {
    #[error("unreadable row: {0}")]
    Parse(String),
    #[error(transparent)]
    Assessment(#[from] EligibilityServiceError),
}

/// Error raised by the eligibility service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
}
