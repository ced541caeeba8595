//! Loan eligibility core: applicant input, feature encoding and predictor-backed decisions.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
