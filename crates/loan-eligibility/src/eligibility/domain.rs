use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Applicant attributes collected by the intake form.
///
/// Field names deserialize from either snake_case or the model's column names, so the same
/// struct reads API payloads and CSV exports. Every field is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(alias = "Gender")]
    pub gender: Gender,
    #[serde(alias = "Married")]
    pub married: Answer,
    #[serde(alias = "Dependents")]
    pub dependents: Dependents,
    #[serde(alias = "Education")]
    pub education: Education,
    #[serde(alias = "Self_Employed")]
    pub self_employed: Answer,
    #[serde(alias = "ApplicantIncome")]
    pub applicant_income: u32,
    #[serde(alias = "CoapplicantIncome")]
    pub coapplicant_income: u32,
    /// Requested amount in thousands.
    #[serde(alias = "LoanAmount")]
    pub loan_amount: u32,
    #[serde(alias = "Loan_Amount_Term")]
    pub loan_amount_term: LoanTerm,
    #[serde(alias = "Credit_History")]
    pub credit_history: Answer,
    #[serde(alias = "Property_Area")]
    pub property_area: PropertyArea,
}

/// The form's initial state. Resetting the form means building this value again.
impl Default for ApplicantInput {
    fn default() -> Self {
        Self {
            gender: Gender::Female,
            married: Answer::No,
            dependents: Dependents::Zero,
            education: Education::Graduate,
            self_employed: Answer::No,
            applicant_income: 30_000,
            coapplicant_income: 1_500,
            loan_amount: 120,
            loan_amount_term: LoanTerm::Months12,
            credit_history: Answer::No,
            property_area: PropertyArea::Urban,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Yes/no answer used for marital status, self-employment and credit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const ALL: [Answer; 2] = [Answer::Yes, Answer::No];

    pub const fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependents {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

impl Dependents {
    pub const ALL: [Dependents; 4] = [
        Dependents::Zero,
        Dependents::One,
        Dependents::Two,
        Dependents::ThreeOrMore,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Dependents::Zero => "0",
            Dependents::One => "1",
            Dependents::Two => "2",
            Dependents::ThreeOrMore => "3+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    Graduate,
    #[serde(rename = "Not Graduate")]
    NotGraduate,
}

impl Education {
    pub const ALL: [Education; 2] = [Education::Graduate, Education::NotGraduate];

    pub const fn label(self) -> &'static str {
        match self {
            Education::Graduate => "Graduate",
            Education::NotGraduate => "Not Graduate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyArea {
    Rural,
    Semiurban,
    Urban,
}

impl PropertyArea {
    pub const ALL: [PropertyArea; 3] = [
        PropertyArea::Rural,
        PropertyArea::Semiurban,
        PropertyArea::Urban,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PropertyArea::Rural => "Rural",
            PropertyArea::Semiurban => "Semiurban",
            PropertyArea::Urban => "Urban",
        }
    }
}

/// Offered repayment terms. Serialized as the month count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LoanTerm {
    Months12,
    Months24,
    Months36,
    Months60,
    Months120,
    Months180,
    Months240,
    Months360,
}

impl LoanTerm {
    pub const ALL: [LoanTerm; 8] = [
        LoanTerm::Months12,
        LoanTerm::Months24,
        LoanTerm::Months36,
        LoanTerm::Months60,
        LoanTerm::Months120,
        LoanTerm::Months180,
        LoanTerm::Months240,
        LoanTerm::Months360,
    ];

    pub const fn months(self) -> u32 {
        match self {
            LoanTerm::Months12 => 12,
            LoanTerm::Months24 => 24,
            LoanTerm::Months36 => 36,
            LoanTerm::Months60 => 60,
            LoanTerm::Months120 => 120,
            LoanTerm::Months180 => 180,
            LoanTerm::Months240 => 240,
            LoanTerm::Months360 => 360,
        }
    }
}

impl TryFrom<u32> for LoanTerm {
    type Error = ValidationError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        LoanTerm::ALL
            .into_iter()
            .find(|term| term.months() == months)
            .ok_or(ValidationError::UnsupportedTerm(months))
    }
}

impl From<LoanTerm> for u32 {
    fn from(term: LoanTerm) -> Self {
        term.months()
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

impl FromStr for LoanTerm {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let months = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::UnknownLiteral {
                field: "Loan_Amount_Term",
                value: raw.to_string(),
            })?;
        LoanTerm::try_from(months)
    }
}

fn parse_label<T: Copy>(
    field: &'static str,
    raw: &str,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, ValidationError> {
    let wanted = raw.trim();
    options
        .iter()
        .copied()
        .find(|option| label(*option).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ValidationError::UnknownLiteral {
            field,
            value: raw.to_string(),
        })
}

macro_rules! labelled {
    ($ty:ty, $field:literal) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                parse_label($field, raw, &<$ty>::ALL, <$ty>::label)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled!(Gender, "Gender");
labelled!(Answer, "answer");
labelled!(Dependents, "Dependents");
labelled!(Education, "Education");
labelled!(PropertyArea, "Property_Area");
