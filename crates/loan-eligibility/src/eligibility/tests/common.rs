use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::domain::{
    Answer, ApplicantInput, Dependents, Education, Gender, LoanTerm, PropertyArea,
};
use crate::eligibility::encoder::FeatureVector;
use crate::eligibility::model::{LinearPipeline, StandardScaler};
use crate::eligibility::predictor::{Predictor, PredictorError};
use crate::eligibility::{eligibility_router, EligibilityService, FEATURE_NAMES};

/// Married graduate with credit history in an urban area.
pub(super) fn urban_graduate() -> ApplicantInput {
    ApplicantInput {
        gender: Gender::Male,
        married: Answer::Yes,
        dependents: Dependents::Zero,
        education: Education::Graduate,
        self_employed: Answer::No,
        applicant_income: 30_000,
        coapplicant_income: 1_500,
        loan_amount: 120,
        loan_amount_term: LoanTerm::Months360,
        credit_history: Answer::Yes,
        property_area: PropertyArea::Urban,
    }
}

/// Predictor returning a fixed label and counting invocations.
pub(super) struct FixedPredictor {
    pub(super) label: i64,
    pub(super) calls: AtomicUsize,
}

impl FixedPredictor {
    pub(super) fn new(label: i64) -> Self {
        Self {
            label,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predictor for FixedPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<i64, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }
}

/// Predictor that records what it was given.
#[derive(Default)]
pub(super) struct RecordingPredictor {
    seen: Mutex<Vec<FeatureVector>>,
}

impl RecordingPredictor {
    pub(super) fn seen(&self) -> Vec<FeatureVector> {
        self.seen.lock().expect("recording mutex poisoned").clone()
    }
}

impl Predictor for RecordingPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictorError> {
        self.seen
            .lock()
            .expect("recording mutex poisoned")
            .push(*features);
        Ok(1)
    }
}

pub(super) struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<i64, PredictorError> {
        Err(PredictorError::SchemaMismatch {
            expected: 12,
            found: 11,
        })
    }
}

pub(super) struct PanickingPredictor;

impl Predictor for PanickingPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<i64, PredictorError> {
        panic!("corrupt estimator state")
    }
}

/// Pipeline approving exactly the applicants with a credit history.
pub(super) fn credit_only_pipeline() -> LinearPipeline {
    let mut coefficients = vec![0.0; FEATURE_NAMES.len()];
    coefficients[9] = 4.0;

    LinearPipeline {
        feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
        scaler: StandardScaler {
            mean: vec![0.0; FEATURE_NAMES.len()],
            scale: vec![1.0; FEATURE_NAMES.len()],
        },
        coefficients,
        intercept: -2.0,
        threshold: 0.5,
        classes: [0, 1],
    }
}

pub(super) fn credit_only_pipeline_json() -> String {
    serde_json::to_string(&credit_only_pipeline()).expect("pipeline serializes")
}

pub(super) fn build_service<P: Predictor + 'static>(predictor: P) -> EligibilityService<P> {
    EligibilityService::new(Arc::new(predictor))
}

pub(super) fn router_with_predictor<P: Predictor + 'static>(predictor: P) -> axum::Router {
    eligibility_router(Arc::new(build_service(predictor)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
