use crate::schema::{AccountingTreatment, DevelopmentPhase};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountingError {
    #[error("Invalid project input for field '{field}': {details}")]
    InvalidProject { field: String, details: String },

    #[error("Invalid depreciation input: cost {cost} over {years} years")]
    InvalidDepreciationInput { cost: f64, years: u32 },

    #[error("Treatment {treatment:?} is not permitted in the {phase:?} phase")]
    TreatmentNotPermitted {
        phase: DevelopmentPhase,
        treatment: AccountingTreatment,
    },

    #[error("Accounting equation violation: Assets ({assets}) != Liabilities ({liabilities}) + Equity ({equity}), difference {difference}")]
    AccountingEquationViolation {
        assets: f64,
        liabilities: f64,
        equity: f64,
        difference: f64,
    },

    #[error("Cash reconciliation failed: cash flow ending cash {cash_flow} != balance sheet cash {balance_sheet}")]
    CashReconciliation { cash_flow: f64, balance_sheet: f64 },

    #[error("Ratio '{0}' has a zero denominator")]
    ZeroDenominator(String),

    #[error("Spread profile has invalid weights: {0}")]
    InvalidScheduleWeights(String),

    #[error("Investment must be positive, got {0}")]
    InvalidInvestment(f64),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AccountingError>;
