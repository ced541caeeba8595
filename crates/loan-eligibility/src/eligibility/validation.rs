use std::ops::RangeInclusive;

use super::domain::ApplicantInput;

pub const APPLICANT_INCOME_RANGE: RangeInclusive<u32> = 0..=100_000;
pub const COAPPLICANT_INCOME_RANGE: RangeInclusive<u32> = 0..=50_000;
/// Thousands of currency units.
pub const LOAN_AMOUNT_RANGE: RangeInclusive<u32> = 10..=500;

/// Input that falls outside the domain the model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error(
        "loan term of {0} months is not offered (expected 12, 24, 36, 60, 120, 180, 240 or 360)"
    )]
    UnsupportedTerm(u32),
    #[error("unknown {field} value '{value}'")]
    UnknownLiteral { field: &'static str, value: String },
}

impl ValidationError {
    /// Column the error refers to, using the model's naming.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::UnsupportedTerm(_) => "Loan_Amount_Term",
            ValidationError::UnknownLiteral { field, .. } => field,
        }
    }
}

impl ApplicantInput {
    /// Check the numeric fields against their declared ranges.
    ///
    /// Enumerated fields and the loan term cannot hold out-of-domain values once constructed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range(
            "ApplicantIncome",
            self.applicant_income,
            &APPLICANT_INCOME_RANGE,
        )?;
        check_range(
            "CoapplicantIncome",
            self.coapplicant_income,
            &COAPPLICANT_INCOME_RANGE,
        )?;
        check_range("LoanAmount", self.loan_amount, &LOAN_AMOUNT_RANGE)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
