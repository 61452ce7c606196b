use crate::statements::FinancialStatement;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fixed user id used when the application runs without authentication.
pub const SINGLE_TENANT_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DevelopmentPhase {
    #[schemars(
        description = "Requirements definition and design. Future economic benefit is uncertain, so costs are always expensed."
    )]
    Requirements,

    #[schemars(
        description = "Development and testing. The only phase where costs may be capitalized as a software asset."
    )]
    Development,

    #[schemars(
        description = "Operation and maintenance of an existing system. Costs keep existing functionality running and are expensed."
    )]
    Maintenance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectComplexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountingTreatment {
    #[schemars(description = "Recognize the full cost as an expense in the current period.")]
    Expense,

    #[schemars(
        description = "Record the cost as an intangible software asset and depreciate it straight-line over its useful life."
    )]
    Capitalize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[schemars(description = "Internal staff cost")]
    pub personnel: f64,
    #[schemars(description = "Outsourcing and contractor cost")]
    pub external: f64,
    #[schemars(description = "Servers, cloud and network cost")]
    pub infrastructure: f64,
    #[schemars(description = "Software license cost")]
    pub licenses: f64,
    pub other: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.personnel + self.external + self.infrastructure + self.licenses + self.other
    }

    /// Components in declaration order, labelled with their field names.
    pub fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("personnel", self.personnel),
            ("external", self.external),
            ("infrastructure", self.infrastructure),
            ("licenses", self.licenses),
            ("other", self.other),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,

    #[schemars(description = "Display name of the system development project")]
    pub name: String,

    pub description: String,

    pub phase: DevelopmentPhase,

    #[schemars(description = "Total project cost in yen. Must be positive.")]
    pub cost: f64,

    #[schemars(description = "Project duration in months. Must be positive.")]
    pub duration: u32,

    #[schemars(description = "Number of team members. Must be positive.")]
    pub team_size: u32,

    pub industry: String,

    pub complexity: ProjectComplexity,

    pub risk_level: RiskLevel,

    #[schemars(
        description = "Split of the total cost. The components must sum to the total cost within a 1% tolerance."
    )]
    pub cost_breakdown: CostBreakdown,
}

/// Simplified four-factor test for capitalizing development cost.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionCriteria {
    pub future_economic_benefit: bool,
    pub technical_feasibility: bool,
    pub completion_intention: bool,
    pub adequate_resources: bool,
}

impl DecisionCriteria {
    pub const TOTAL: usize = 4;

    pub fn all_satisfied() -> Self {
        Self {
            future_economic_benefit: true,
            technical_feasibility: true,
            completion_intention: true,
            adequate_resources: true,
        }
    }

    pub fn satisfied_count(&self) -> usize {
        [
            self.future_economic_benefit,
            self.technical_feasibility,
            self.completion_intention,
            self.adequate_resources,
        ]
        .iter()
        .filter(|&&c| c)
        .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountingDecision {
    pub phase: DevelopmentPhase,
    pub treatment: AccountingTreatment,
    pub criteria: DecisionCriteria,
    pub reasoning: String,
    #[schemars(description = "Confidence score between 0 and 100")]
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub account: String,
    pub debit: f64,
    pub credit: f64,
    pub description: String,
    pub category: EntryCategory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationEntry {
    pub year: u32,
    pub beginning_value: f64,
    pub depreciation_amount: f64,
    pub ending_value: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetDelta {
    pub assets: f64,
    pub liabilities: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentYearImpact {
    pub profit_loss: f64,
    pub balance_sheet: BalanceSheetDelta,
    pub cash_flow: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FutureYearImpact {
    pub year: u32,
    pub profit_loss: f64,
    pub balance_sheet: BalanceSheetDelta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialImpact {
    pub current_year: CurrentYearImpact,
    #[schemars(description = "Per-year depreciation effect of a capitalized asset. Empty when expensed.")]
    pub future_years: Vec<FutureYearImpact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedJournalEntry {
    pub main_entry: Vec<JournalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entries: Option<Vec<JournalEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_schedule: Option<Vec<DepreciationEntry>>,
    pub explanation: String,
    pub impact: FinancialImpact,
}

/// Identity of the caller on whose behalf a calculation runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    pub fn single_tenant() -> Self {
        Self::new(SINGLE_TENANT_USER_ID)
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::single_tenant()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScenario {
    pub project: Project,

    #[schemars(
        description = "Chosen accounting treatment. Only projects in the development phase may be capitalized."
    )]
    pub treatment: AccountingTreatment,

    #[serde(default)]
    pub criteria: DecisionCriteria,

    #[serde(default)]
    #[schemars(description = "Free-text reasoning recorded with the decision")]
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default)]
    pub user: UserContext,

    #[schemars(description = "Date stamped on every generated journal line (YYYY-MM-DD)")]
    pub entry_date: NaiveDate,

    #[serde(default = "FinancialStatement::sample")]
    #[schemars(
        description = "Statement the project impacts are projected onto. Defaults to the built-in sample company."
    )]
    pub baseline: FinancialStatement,

    pub scenarios: Vec<ProjectScenario>,
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SimulationConfig)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
