//! # System Development Accounting
//!
//! A library for deciding how system development cost is accounted for and
//! showing what that decision does to a company's financial statements.
//!
//! ## Core Concepts
//!
//! - **Treatment**: A project cost is either expensed in the current period or
//!   capitalized as a software asset. Only the development phase may capitalize.
//! - **Journal**: Every decision produces balanced double-entry journal lines,
//!   and capitalized cost carries a 5-year straight-line depreciation schedule
//! - **Projection**: The decision is applied to a baseline set of statements
//!   (P&L, balance sheet, cash flow) with 30% corporate tax
//! - **Accounting Integrity**: Projected statements keep Assets = Liabilities + Equity
//!   and the cash-flow statement ends on balance-sheet cash
//! - **Budgeting**: Category analysis, rule-based risks and recommendations,
//!   ROI / NPV / IRR / payback and budget-versus-actual variance
//!
//! ## Example
//!
//! ```rust,ignore
//! use system_dev_accounting::*;
//! use chrono::NaiveDate;
//!
//! let project = Project {
//!     id: "p-1".to_string(),
//!     name: "Order Platform".to_string(),
//!     description: "New ordering system".to_string(),
//!     phase: DevelopmentPhase::Development,
//!     cost: 10_000_000.0,
//!     duration: 12,
//!     team_size: 6,
//!     industry: "retail".to_string(),
//!     complexity: ProjectComplexity::Medium,
//!     risk_level: RiskLevel::Low,
//!     cost_breakdown: CostBreakdown {
//!         personnel: 6_000_000.0,
//!         external: 2_000_000.0,
//!         infrastructure: 1_000_000.0,
//!         licenses: 500_000.0,
//!         other: 500_000.0,
//!     },
//! };
//!
//! let simulator = DecisionSimulator::new(UserContext::single_tenant());
//! let result = simulator.simulate(
//!     &project,
//!     AccountingTreatment::Capitalize,
//!     DecisionCriteria::all_satisfied(),
//!     "Meets all four capitalization criteria",
//!     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
//! )?;
//!
//! let projected = apply_project_impact(&FinancialStatement::sample(), &project, result.decision.treatment);
//! verify_accounting_equation(&projected, BALANCE_TOLERANCE)?;
//! ```

pub mod balancer;
pub mod budget;
pub mod chart_of_accounts;
pub mod depreciation;
pub mod error;
pub mod impact;
pub mod journal;
pub mod ratios;
pub mod scenario;
pub mod schedule;
pub mod schema;
pub mod scoring;
pub mod statements;
pub mod utils;
pub mod validation;

pub use balancer::{
    verify_accounting_equation, verify_cash_reconciliation, AccountingBalancer, BALANCE_TOLERANCE,
};
pub use budget::*;
pub use chart_of_accounts::{AccountEntry, ChartOfAccounts};
pub use depreciation::{
    annual_depreciation, generate_depreciation_schedule, monthly_depreciation,
    SOFTWARE_USEFUL_LIFE_YEARS,
};
pub use error::{AccountingError, Result};
pub use impact::{
    apply_project_impact, calculate_financial_impact, compare_scenarios, FinancialDifference,
    ScenarioComparison, ScenarioStatements, CORPORATE_TAX_RATE,
};
pub use journal::{generate_explanation, generate_journal_entries};
pub use ratios::{calculate_financial_ratios, calculate_financial_ratios_strict, FinancialRatios};
pub use scenario::BudgetScenario;
pub use schedule::{profile_weights, spread_amount, SpreadProfile};
pub use schema::*;
pub use scoring::{
    calculate_confidence_score, default_treatment, is_treatment_permitted, permitted_treatments,
    recommend, Recommendation,
};
pub use statements::*;
pub use utils::*;
pub use validation::{
    validate_cost_breakdown, validate_project, ValidationError, ValidationErrorCode,
    ValidationResult, ValidationWarning,
};

use chrono::NaiveDate;
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything produced for one accounting decision.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub user: UserContext,
    pub project_id: String,
    pub recommendation: Recommendation,
    pub decision: AccountingDecision,
    pub journal: DetailedJournalEntry,
    pub warnings: Vec<ValidationWarning>,
    /// Baseline statements after the decision, when a baseline was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<FinancialStatement>,
}

pub struct DecisionSimulator {
    user: UserContext,
}

impl DecisionSimulator {
    pub fn new(user: UserContext) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn simulate(
        &self,
        project: &Project,
        treatment: AccountingTreatment,
        criteria: DecisionCriteria,
        reasoning: impl Into<String>,
        date: NaiveDate,
    ) -> Result<SimulationResult> {
        info!(
            "Simulating {:?} of project '{}' for user {}",
            treatment, project.name, self.user.user_id
        );

        let warnings = validate_project(project).into_result()?;
        for warning in &warnings {
            debug!("Project '{}' warning on {}: {}", project.name, warning.field, warning.message);
        }

        if !is_treatment_permitted(project.phase, treatment) {
            return Err(AccountingError::TreatmentNotPermitted {
                phase: project.phase,
                treatment,
            });
        }

        let score = calculate_confidence_score(project, &criteria, treatment);
        let recommendation = recommend(score);
        debug!(
            "Project '{}' scored {} ({}), {}/{} criteria satisfied",
            project.name,
            score,
            recommendation.title(),
            criteria.satisfied_count(),
            DecisionCriteria::TOTAL
        );

        let decision = AccountingDecision {
            phase: project.phase,
            treatment,
            criteria,
            reasoning: reasoning.into(),
            confidence: score,
        };

        let journal = generate_journal_entries(project, treatment, &decision, date)?;

        Ok(SimulationResult {
            user: self.user.clone(),
            project_id: project.id.clone(),
            recommendation,
            decision,
            journal,
            warnings,
            projection: None,
        })
    }

    /// Runs [`simulate`](Self::simulate) and projects the decision onto `baseline`.
    pub fn simulate_with_baseline(
        &self,
        baseline: &FinancialStatement,
        scenario: &ProjectScenario,
        date: NaiveDate,
    ) -> Result<SimulationResult> {
        let mut result = self.simulate(
            &scenario.project,
            scenario.treatment,
            scenario.criteria,
            scenario.reasoning.clone(),
            date,
        )?;

        result.projection = Some(apply_project_impact(
            baseline,
            &scenario.project,
            scenario.treatment,
        ));
        Ok(result)
    }
}

/// Simulates every scenario in `config` against its baseline.
///
/// Projected statements are checked for the accounting identity and cash
/// reconciliation. A baseline that is itself out of balance is reported and
/// its projections are returned unchecked.
pub fn process_simulation(config: &SimulationConfig) -> Result<Vec<SimulationResult>> {
    info!(
        "Processing {} scenarios for user {} ({})",
        config.scenarios.len(),
        config.user.user_id,
        config.baseline.period
    );

    let baseline_balanced = match verify_accounting_equation(&config.baseline, BALANCE_TOLERANCE)
        .and_then(|_| verify_cash_reconciliation(&config.baseline, BALANCE_TOLERANCE))
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Baseline statement is not balanced, skipping projection checks: {}", e);
            false
        }
    };

    let simulator = DecisionSimulator::new(config.user.clone());

    config
        .scenarios
        .iter()
        .map(|scenario| {
            let result =
                simulator.simulate_with_baseline(&config.baseline, scenario, config.entry_date)?;

            if let (true, Some(projection)) = (baseline_balanced, &result.projection) {
                let balancer = AccountingBalancer::new(projection);
                balancer.verify_accounting_equation(BALANCE_TOLERANCE)?;
                balancer.verify_cash_reconciliation(BALANCE_TOLERANCE)?;
            }

            Ok(result)
        })
        .collect()
}
