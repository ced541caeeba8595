use crate::infra::{load_pipeline, resolve_model_path};
use clap::Args;
use loan_eligibility::eligibility::{
    Answer, ApplicantInput, Assessment, BatchOutcome, Dependents, Education, EligibilityService,
    Gender, LoanTerm, PropertyArea, FEATURE_NAMES,
};
use loan_eligibility::error::AppError;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Applicant flags. Anything omitted keeps the form's initial value.
#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Model artifact to load (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Male or Female
    #[arg(long)]
    pub(crate) gender: Option<Gender>,
    /// Yes or No
    #[arg(long)]
    pub(crate) married: Option<Answer>,
    /// 0, 1, 2 or 3+
    #[arg(long)]
    pub(crate) dependents: Option<Dependents>,
    /// Graduate or "Not Graduate"
    #[arg(long)]
    pub(crate) education: Option<Education>,
    /// Yes or No
    #[arg(long)]
    pub(crate) self_employed: Option<Answer>,
    /// Monthly applicant income (0-100000)
    #[arg(long)]
    pub(crate) applicant_income: Option<u32>,
    /// Monthly coapplicant income (0-50000)
    #[arg(long)]
    pub(crate) coapplicant_income: Option<u32>,
    /// Requested amount in thousands (10-500)
    #[arg(long)]
    pub(crate) loan_amount: Option<u32>,
    /// Term in months: 12, 24, 36, 60, 120, 180, 240 or 360
    #[arg(long)]
    pub(crate) loan_amount_term: Option<LoanTerm>,
    /// Yes or No
    #[arg(long)]
    pub(crate) credit_history: Option<Answer>,
    /// Rural, Semiurban or Urban
    #[arg(long)]
    pub(crate) property_area: Option<PropertyArea>,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    pub(crate) fn applicant(&self) -> ApplicantInput {
        let defaults = ApplicantInput::default();
        ApplicantInput {
            gender: self.gender.unwrap_or(defaults.gender),
            married: self.married.unwrap_or(defaults.married),
            dependents: self.dependents.unwrap_or(defaults.dependents),
            education: self.education.unwrap_or(defaults.education),
            self_employed: self.self_employed.unwrap_or(defaults.self_employed),
            applicant_income: self.applicant_income.unwrap_or(defaults.applicant_income),
            coapplicant_income: self
                .coapplicant_income
                .unwrap_or(defaults.coapplicant_income),
            loan_amount: self.loan_amount.unwrap_or(defaults.loan_amount),
            loan_amount_term: self.loan_amount_term.unwrap_or(defaults.loan_amount_term),
            credit_history: self.credit_history.unwrap_or(defaults.credit_history),
            property_area: self.property_area.unwrap_or(defaults.property_area),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file whose header uses the model column names
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Model artifact to load (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let path = resolve_model_path(args.model.clone())?;
    let service = EligibilityService::new(load_pipeline(&path)?);
    let applicant = args.applicant();

    let assessment = service.assess(&applicant)?;

    if args.json {
        let json = serde_json::to_string_pretty(&assessment.view()).map_err(io::Error::from)?;
        println!("{json}");
    } else {
        render_assessment(&applicant, &assessment);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let path = resolve_model_path(args.model)?;
    let service = EligibilityService::new(load_pipeline(&path)?);

    let file = File::open(&args.input)?;
    let outcomes = service.assess_batch(BufReader::new(file))?;
    render_batch(&outcomes);

    Ok(())
}

pub(crate) fn run_schema() {
    println!("Feature columns (model order)");
    for (position, name) in FEATURE_NAMES.iter().enumerate() {
        println!("{position:>2}. {name}");
    }
}

fn render_assessment(applicant: &ApplicantInput, assessment: &Assessment) {
    println!("Loan eligibility decision");
    println!(
        "Applicant: {} | married {} | dependents {} | {} | self-employed {}",
        applicant.gender,
        applicant.married,
        applicant.dependents,
        applicant.education,
        applicant.self_employed
    );
    println!(
        "Income: applicant {} | coapplicant {}",
        applicant.applicant_income, applicant.coapplicant_income
    );
    println!(
        "Loan: {}k over {} | credit history {} | {} property",
        applicant.loan_amount,
        applicant.loan_amount_term,
        applicant.credit_history,
        applicant.property_area
    );

    println!("\n{}", assessment.decision.headline());
    println!("{}", assessment.decision.factors());

    println!("\nEncoded features");
    for (name, value) in assessment.features.named() {
        println!("- {name}: {value}");
    }
    println!(
        "\nAssessed at {}",
        assessment.assessed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn render_batch(outcomes: &[BatchOutcome]) {
    println!("Batch eligibility decisions");

    let mut eligible = 0;
    let mut failed = 0;
    for entry in outcomes {
        match &entry.outcome {
            Ok(assessment) => {
                if assessment.decision.is_eligible() {
                    eligible += 1;
                }
                println!("- row {}: {}", entry.row, assessment.decision.headline());
            }
            Err(err) => {
                failed += 1;
                println!("- row {}: error: {}", entry.row, err);
            }
        }
    }

    println!(
        "\n{} rows | {} eligible | {} not eligible | {} failed",
        outcomes.len(),
        eligible,
        outcomes.len() - eligible - failed,
        failed
    );
}
