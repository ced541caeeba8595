use std::sync::Arc;
use std::thread;

use super::common::*;
use crate::eligibility::{
    BatchRowError, Decision, EligibilityServiceError, Feature, ValidationError,
};

#[test]
fn assess_returns_decision_and_features() {
    let service = build_service(FixedPredictor::new(1));

    let assessment = service.assess(&urban_graduate()).expect("assessment succeeds");

    assert_eq!(assessment.decision, Decision::Eligible);
    assert_eq!(assessment.features[Feature::LoanAmountTerm], 360);
    let view = assessment.view();
    assert_eq!(view.decision, "eligible");
    assert_eq!(view.headline, "Eligible for Loan");
}

#[test]
fn assess_rejects_invalid_input_before_predicting() {
    let service = build_service(FixedPredictor::new(1));
    let mut input = urban_graduate();
    input.loan_amount = 750;

    match service.assess(&input) {
        Err(EligibilityServiceError::Validation(ValidationError::OutOfRange {
            field, value, ..
        })) => {
            assert_eq!(field, "LoanAmount");
            assert_eq!(value, 750);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(service.predictor().calls(), 0);
}

#[test]
fn assess_reports_predictor_failures() {
    let service = build_service(FailingPredictor);

    match service.assess(&urban_graduate()) {
        Err(EligibilityServiceError::Decision(error)) => {
            assert!(error.message.contains("features"));
        }
        other => panic!("expected decision error, got {other:?}"),
    }
}

#[test]
fn assess_survives_panicking_predictor() {
    let service = build_service(PanickingPredictor);

    let result = service.assess(&urban_graduate());

    assert!(matches!(result, Err(EligibilityServiceError::Decision(_))));
}

#[test]
fn shared_predictor_serves_concurrent_callers() {
    let service = Arc::new(build_service(credit_only_pipeline()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .assess(&urban_graduate())
                    .expect("assessment succeeds")
                    .decision
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread joins"), Decision::Eligible);
    }
}

const BATCH_HEADER: &str = "Loan_ID,Gender,Married,Dependents,Education,Self_Employed,ApplicantIncome,CoapplicantIncome,LoanAmount,Loan_Amount_Term,Credit_History,Property_Area\n";

#[test]
fn batch_scores_each_row_independently() {
    let service = build_service(credit_only_pipeline());
    let csv = format!(
        "{BATCH_HEADER}\
         LP001,Male,Yes,0,Graduate,No,30000,1500,120,360,Yes,Urban\n\
         LP002,Female,No,3+,Not Graduate,Yes,4000,0,90,180,No,Rural\n\
         LP003,Male,Yes,1,Graduate,No,30000,1500,900,360,Yes,Urban\n\
         LP004,Male,Yes,1,Graduate,No,30000,1500,120,48,Yes,Urban\n"
    );

    let outcomes = service
        .assess_batch(csv.as_bytes())
        .expect("batch header readable");

    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0].row, 1);

    let first = outcomes[0].outcome.as_ref().expect("row 1 scores");
    assert_eq!(first.decision, Decision::Eligible);

    let second = outcomes[1].outcome.as_ref().expect("row 2 scores");
    assert_eq!(second.decision, Decision::NotEligible);
    assert_eq!(second.features[Feature::Dependents], 4);

    assert!(matches!(
        outcomes[2].outcome,
        Err(BatchRowError::Assessment(EligibilityServiceError::Validation(_)))
    ));
    assert!(matches!(outcomes[3].outcome, Err(BatchRowError::Parse(_))));
}

#[test]
fn batch_of_header_only_is_empty() {
    let service = build_service(FixedPredictor::new(1));

    let outcomes = service
        .assess_batch(BATCH_HEADER.as_bytes())
        .expect("batch header readable");

    assert!(outcomes.is_empty());
    assert_eq!(service.predictor().calls(), 0);
}
