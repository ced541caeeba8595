use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::domain::{Answer, ApplicantInput, Dependents, Education, Gender, PropertyArea};

pub const FEATURE_COUNT: usize = 11;

/// Column names in the order the model expects them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Gender",
    "Married",
    "Dependents",
    "Education",
    "Self_Employed",
    "ApplicantIncome",
    "CoapplicantIncome",
    "LoanAmount",
    "Loan_Amount_Term",
    "Credit_History",
    "Property_Area",
];

/// Position of a column inside a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Gender,
    Married,
    Dependents,
    Education,
    SelfEmployed,
    ApplicantIncome,
    CoapplicantIncome,
    LoanAmount,
    LoanAmountTerm,
    CreditHistory,
    PropertyArea,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Gender,
        Feature::Married,
        Feature::Dependents,
        Feature::Education,
        Feature::SelfEmployed,
        Feature::ApplicantIncome,
        Feature::CoapplicantIncome,
        Feature::LoanAmount,
        Feature::LoanAmountTerm,
        Feature::CreditHistory,
        Feature::PropertyArea,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        FEATURE_NAMES[self as usize]
    }
}

/// Encoded applicant, ordered per [`FEATURE_NAMES`]. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVector([i64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> &[i64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, feature: Feature) -> i64 {
        self.0[feature.index()]
    }

    /// Column name and value pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<Feature> for FeatureVector {
    type Output = i64;

    fn index(&self, feature: Feature) -> &Self::Output {
        &self.0[feature.index()]
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.named() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Map an applicant onto the model's numeric schema.
///
/// Total and side-effect free. Callers validate ranges first; numeric fields pass through.
pub fn encode(input: &ApplicantInput) -> FeatureVector {
    FeatureVector([
        gender_code(input.gender),
        answer_code(input.married),
        dependents_code(input.dependents),
        education_code(input.education),
        answer_code(input.self_employed),
        i64::from(input.applicant_income),
        i64::from(input.coapplicant_income),
        i64::from(input.loan_amount),
        i64::from(input.loan_amount_term.months()),
        answer_code(input.credit_history),
        property_area_code(input.property_area),
    ])
}

const fn gender_code(gender: Gender) -> i64 {
    match gender {
        Gender::Male => 1,
        Gender::Female => 0,
    }
}

const fn answer_code(answer: Answer) -> i64 {
    match answer {
        Answer::Yes => 1,
        Answer::No => 0,
    }
}

// The model was trained with "3+" encoded as 4.
const fn dependents_code(dependents: Dependents) -> i64 {
    match dependents {
        Dependents::Zero => 0,
        Dependents::One => 1,
        Dependents::Two => 2,
        Dependents::ThreeOrMore => 4,
    }
}

const fn education_code(education: Education) -> i64 {
    match education {
        Education::Graduate => 1,
        Education::NotGraduate => 0,
    }
}

const fn property_area_code(area: PropertyArea) -> i64 {
    match area {
        PropertyArea::Rural => 0,
        PropertyArea::Semiurban => 1,
        PropertyArea::Urban => 2,
    }
}
