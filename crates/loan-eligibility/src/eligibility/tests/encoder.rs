use std::collections::HashSet;

use proptest::prelude::*;

use super::common::*;
use crate::eligibility::domain::{
    Answer, ApplicantInput, Dependents, Education, Gender, LoanTerm, PropertyArea,
};
use crate::eligibility::encoder::{encode, Feature, FEATURE_COUNT, FEATURE_NAMES};
use crate::eligibility::validation::{
    APPLICANT_INCOME_RANGE, COAPPLICANT_INCOME_RANGE, LOAN_AMOUNT_RANGE,
};

#[test]
fn encodes_urban_graduate_in_model_order() {
    let vector = encode(&urban_graduate());

    assert_eq!(
        vector.values(),
        &[1, 1, 0, 1, 0, 30_000, 1_500, 120, 360, 1, 2]
    );
}

#[test]
fn three_or_more_dependents_encodes_as_four() {
    let mut input = urban_graduate();
    input.dependents = Dependents::ThreeOrMore;

    let baseline = encode(&urban_graduate());
    let vector = encode(&input);

    assert_eq!(vector[Feature::Dependents], 4);
    for feature in Feature::ALL {
        if feature != Feature::Dependents {
            assert_eq!(vector[feature], baseline[feature], "{} changed", feature.name());
        }
    }
}

fn codes_for<T: Copy>(
    options: &[T],
    apply: impl Fn(&mut ApplicantInput, T),
    feature: Feature,
) -> Vec<i64> {
    options
        .iter()
        .map(|option| {
            let mut input = urban_graduate();
            apply(&mut input, *option);
            encode(&input)[feature]
        })
        .collect()
}

fn assert_distinct(codes: &[i64], feature: Feature) {
    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len(), "{} codes collide", feature.name());
}

#[test]
fn every_literal_maps_to_a_distinct_code() {
    let gender = codes_for(&Gender::ALL, |input, value| input.gender = value, Feature::Gender);
    assert_eq!(gender, vec![1, 0]);
    assert_distinct(&gender, Feature::Gender);

    let married = codes_for(&Answer::ALL, |input, value| input.married = value, Feature::Married);
    assert_eq!(married, vec![1, 0]);

    let self_employed = codes_for(
        &Answer::ALL,
        |input, value| input.self_employed = value,
        Feature::SelfEmployed,
    );
    assert_eq!(self_employed, vec![1, 0]);

    let credit = codes_for(
        &Answer::ALL,
        |input, value| input.credit_history = value,
        Feature::CreditHistory,
    );
    assert_eq!(credit, vec![1, 0]);

    let dependents = codes_for(
        &Dependents::ALL,
        |input, value| input.dependents = value,
        Feature::Dependents,
    );
    assert_eq!(dependents, vec![0, 1, 2, 4]);
    assert_distinct(&dependents, Feature::Dependents);

    let education = codes_for(
        &Education::ALL,
        |input, value| input.education = value,
        Feature::Education,
    );
    assert_eq!(education, vec![1, 0]);

    let area = codes_for(
        &PropertyArea::ALL,
        |input, value| input.property_area = value,
        Feature::PropertyArea,
    );
    assert_eq!(area, vec![0, 1, 2]);
}

#[test]
fn property_area_codes_ascend_with_urbanization() {
    let codes = codes_for(
        &PropertyArea::ALL,
        |input, value| input.property_area = value,
        Feature::PropertyArea,
    );

    assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn loan_terms_pass_through_as_months() {
    let codes = codes_for(
        &LoanTerm::ALL,
        |input, value| input.loan_amount_term = value,
        Feature::LoanAmountTerm,
    );

    assert_eq!(codes, vec![12, 24, 36, 60, 120, 180, 240, 360]);
}

#[test]
fn feature_names_follow_feature_positions() {
    assert_eq!(Feature::ALL.len(), FEATURE_COUNT);
    for (position, feature) in Feature::ALL.into_iter().enumerate() {
        assert_eq!(feature.index(), position);
        assert_eq!(feature.name(), FEATURE_NAMES[position]);
    }
}

#[test]
fn feature_vector_serializes_as_named_columns() {
    let vector = encode(&urban_graduate());
    let json = serde_json::to_value(vector).expect("vector serializes");

    assert_eq!(json["Gender"], 1);
    assert_eq!(json["Dependents"], 0);
    assert_eq!(json["Loan_Amount_Term"], 360);
    assert_eq!(json["Property_Area"], 2);
    assert_eq!(json.as_object().map(|map| map.len()), Some(FEATURE_COUNT));
}

fn applicant_strategy() -> impl Strategy<Value = ApplicantInput> {
    let categorical = (
        prop::sample::select(Gender::ALL.to_vec()),
        prop::sample::select(Answer::ALL.to_vec()),
        prop::sample::select(Dependents::ALL.to_vec()),
        prop::sample::select(Education::ALL.to_vec()),
        prop::sample::select(Answer::ALL.to_vec()),
        prop::sample::select(Answer::ALL.to_vec()),
        prop::sample::select(PropertyArea::ALL.to_vec()),
    );
    let numeric = (
        APPLICANT_INCOME_RANGE,
        COAPPLICANT_INCOME_RANGE,
        LOAN_AMOUNT_RANGE,
        prop::sample::select(LoanTerm::ALL.to_vec()),
    );

    (categorical, numeric).prop_map(
        |(
            (gender, married, dependents, education, self_employed, credit_history, property_area),
            (applicant_income, coapplicant_income, loan_amount, loan_amount_term),
        )| ApplicantInput {
            gender,
            married,
            dependents,
            education,
            self_employed,
            applicant_income,
            coapplicant_income,
            loan_amount,
            loan_amount_term,
            credit_history,
            property_area,
        },
    )
}

proptest! {
    #[test]
    fn encoding_is_deterministic(input in applicant_strategy()) {
        prop_assert_eq!(encode(&input), encode(&input));
    }

    #[test]
    fn numeric_fields_pass_through(input in applicant_strategy()) {
        let vector = encode(&input);
        prop_assert_eq!(vector[Feature::ApplicantIncome], i64::from(input.applicant_income));
        prop_assert_eq!(vector[Feature::CoapplicantIncome], i64::from(input.coapplicant_income));
        prop_assert_eq!(vector[Feature::LoanAmount], i64::from(input.loan_amount));
        prop_assert_eq!(vector[Feature::LoanAmountTerm], i64::from(input.loan_amount_term.months()));
    }

    #[test]
    fn generated_inputs_validate(input in applicant_strategy()) {
        prop_assert!(input.validate().is_ok());
    }
}
