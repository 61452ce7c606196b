//! Budget planning: category analysis, rule-based risks and recommendations,
//! template budgets, investment returns and variance analysis.

use crate::error::{AccountingError, Result};
use crate::schedule::{spread_amount, SpreadProfile};
use crate::utils::{months_between, percentage_of, round_currency};
use chrono::NaiveDate;
use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HIGH_PERSONNEL_RATIO: f64 = 0.7;
pub const HIGH_EXTERNAL_RATIO: f64 = 0.5;
pub const LARGE_ITEM_RATIO: f64 = 0.2;
/// An item is front-loaded when more than this share lands in months 1-3.
pub const FRONT_LOADED_ITEM_RATIO: f64 = 0.6;
/// Risk fires when more than this share of items is front-loaded.
pub const FRONT_LOADED_PORTFOLIO_RATIO: f64 = 0.3;
pub const PHASED_EXECUTION_THRESHOLD: f64 = 50_000_000.0;

pub const DEFAULT_DISCOUNT_RATE: f64 = 0.1;
pub const DEFAULT_EVALUATION_YEARS: u32 = 5;

const IRR_INITIAL_RATE: f64 = 0.1;
const IRR_STEP: f64 = 0.01;
const IRR_MAX_ITERATIONS: u32 = 100;
const IRR_NPV_TOLERANCE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Personnel,
    External,
    Infrastructure,
    Software,
    Hardware,
    Travel,
    Training,
    Other,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 8] = [
        BudgetCategory::Personnel,
        BudgetCategory::External,
        BudgetCategory::Infrastructure,
        BudgetCategory::Software,
        BudgetCategory::Hardware,
        BudgetCategory::Travel,
        BudgetCategory::Training,
        BudgetCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Personnel => "人件費",
            BudgetCategory::External => "外注費",
            BudgetCategory::Infrastructure => "インフラ費",
            BudgetCategory::Software => "ソフトウェアライセンス",
            BudgetCategory::Hardware => "ハードウェア",
            BudgetCategory::Travel => "旅費交通費",
            BudgetCategory::Training => "研修費",
            BudgetCategory::Other => "その他",
        }
    }

    fn subcategory(&self) -> &'static str {
        match self {
            BudgetCategory::Personnel => "開発要員",
            BudgetCategory::External => "外部委託",
            BudgetCategory::Infrastructure => "クラウドサービス",
            BudgetCategory::Software => "開発ツール",
            BudgetCategory::Hardware => "開発機器",
            BudgetCategory::Travel => "出張費",
            BudgetCategory::Training => "技術研修",
            BudgetCategory::Other => "その他経費",
        }
    }

    fn template_description(&self, project_type: &str) -> String {
        match self {
            BudgetCategory::Personnel => format!("{}プロジェクト開発チームの人件費", project_type),
            BudgetCategory::External => format!("{}プロジェクトの外部委託費用", project_type),
            BudgetCategory::Infrastructure => {
                format!("{}プロジェクト用インフラ・クラウド費用", project_type)
            }
            BudgetCategory::Software => {
                format!("{}開発に必要なソフトウェアライセンス", project_type)
            }
            BudgetCategory::Hardware => format!("{}開発用ハードウェア・機器", project_type),
            BudgetCategory::Travel => format!("{}プロジェクト関連の出張・交通費", project_type),
            BudgetCategory::Training => format!("{}開発チーム向け技術研修費", project_type),
            BudgetCategory::Other => format!("{}プロジェクトのその他経費", project_type),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySchedule {
    /// 1-12
    pub month: u32,
    pub planned_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    pub category: BudgetCategory,
    pub subcategory: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub unit: String,
    pub total_amount: f64,
    /// Fixed rather than variable cost.
    pub is_fixed: bool,
    pub schedule: Vec<MonthlySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BudgetItem {
    fn first_quarter_amount(&self) -> f64 {
        self.schedule
            .iter()
            .filter(|s| s.month <= 3)
            .map(|s| s.planned_amount)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Months, counting both the start and end month.
    pub duration: i32,
}

impl BudgetPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            duration: months_between(start_date, end_date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub project_name: String,
    pub fiscal_year: i32,
    pub department: String,
    pub manager: String,
    pub period: BudgetPeriod,
    pub status: BudgetStatus,
    pub version: u32,
    pub items: Vec<BudgetItem>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub amount: f64,
    pub percentage: f64,
    pub items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub month: u32,
    pub planned_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Cost,
    Schedule,
    Resource,
    External,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRisk {
    pub id: String,
    pub category: RiskCategory,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub mitigation: String,
    /// 0-100
    pub probability: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    CostReduction,
    Efficiency,
    RiskMitigation,
    Optimization,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_cost: Option<f64>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    pub total_budget: f64,
    pub category_breakdown: BTreeMap<BudgetCategory, CategoryBreakdown>,
    pub monthly_distribution: Vec<MonthlyBudget>,
    pub risks: Vec<BudgetRisk>,
    pub recommendations: Vec<BudgetRecommendation>,
}

impl BudgetAnalysis {
    pub fn category(&self, category: BudgetCategory) -> CategoryBreakdown {
        self.category_breakdown
            .get(&category)
            .copied()
            .unwrap_or_default()
    }
}

pub fn calculate_budget_analysis(items: &[BudgetItem]) -> BudgetAnalysis {
    let total_budget: f64 = items.iter().map(|i| i.total_amount).sum();
    let category_breakdown = category_breakdown(items, total_budget);

    let monthly_distribution = (1..=12)
        .map(|month| {
            let entries: Vec<&MonthlySchedule> = items
                .iter()
                .flat_map(|item| item.schedule.iter().filter(move |s| s.month == month))
                .collect();

            let planned_amount: f64 = entries.iter().map(|s| s.planned_amount).sum();
            let actual_amount = if entries.iter().any(|s| s.actual_amount.is_some()) {
                Some(entries.iter().filter_map(|s| s.actual_amount).sum::<f64>())
            } else {
                None
            };
            let variance = actual_amount.map(|actual| actual - planned_amount);
            let variance_percentage = variance.and_then(|v| percentage_of(v, planned_amount));

            MonthlyBudget {
                month,
                planned_amount,
                actual_amount,
                variance,
                variance_percentage,
            }
        })
        .collect();

    let risks = generate_budget_risks(items, total_budget);
    let recommendations = generate_budget_recommendations(&category_breakdown, total_budget);

    debug!(
        "Budget analysis over {} items: total {}, {} risks, {} recommendations",
        items.len(),
        total_budget,
        risks.len(),
        recommendations.len()
    );

    BudgetAnalysis {
        total_budget,
        category_breakdown,
        monthly_distribution,
        risks,
        recommendations,
    }
}

fn category_breakdown(
    items: &[BudgetItem],
    total_budget: f64,
) -> BTreeMap<BudgetCategory, CategoryBreakdown> {
    BudgetCategory::ALL
        .iter()
        .map(|&category| {
            let in_category = items.iter().filter(|i| i.category == category);
            let amount: f64 = in_category.clone().map(|i| i.total_amount).sum();
            let breakdown = CategoryBreakdown {
                amount,
                percentage: if total_budget > 0.0 {
                    amount / total_budget * 100.0
                } else {
                    0.0
                },
                items: in_category.count(),
            };
            (category, breakdown)
        })
        .collect()
}

fn category_ratio(items: &[BudgetItem], category: BudgetCategory, total_budget: f64) -> f64 {
    items
        .iter()
        .filter(|i| i.category == category)
        .map(|i| i.total_amount)
        .sum::<f64>()
        / total_budget
}

/// Fixed-threshold rule table. An empty or zero budget has no risks.
pub fn generate_budget_risks(items: &[BudgetItem], total_budget: f64) -> Vec<BudgetRisk> {
    let mut risks = Vec::new();
    if total_budget <= 0.0 {
        return risks;
    }

    if category_ratio(items, BudgetCategory::Personnel, total_budget) > HIGH_PERSONNEL_RATIO {
        risks.push(BudgetRisk {
            id: "high-personnel-ratio".to_string(),
            category: RiskCategory::Cost,
            severity: Severity::Medium,
            description: "人件費比率が70%を超過".to_string(),
            impact: "人員計画変更時の予算への大きな影響".to_string(),
            mitigation: "外部リソース活用の検討、スキル向上による効率化".to_string(),
            probability: 60,
        });
    }

    if category_ratio(items, BudgetCategory::External, total_budget) > HIGH_EXTERNAL_RATIO {
        risks.push(BudgetRisk {
            id: "high-external-dependency".to_string(),
            category: RiskCategory::External,
            severity: Severity::High,
            description: "外部委託比率が50%を超過".to_string(),
            impact: "ベンダー依存による品質・スケジュールリスク".to_string(),
            mitigation: "内製化推進、複数ベンダーの確保".to_string(),
            probability: 75,
        });
    }

    if items
        .iter()
        .any(|i| i.total_amount > total_budget * LARGE_ITEM_RATIO)
    {
        risks.push(BudgetRisk {
            id: "large-budget-items".to_string(),
            category: RiskCategory::Cost,
            severity: Severity::Medium,
            description: "単一項目で全体の20%以上を占める予算項目が存在".to_string(),
            impact: "当該項目の変動が全体予算に大きく影響".to_string(),
            mitigation: "詳細な見積もり精度向上、段階的実行の検討".to_string(),
            probability: 40,
        });
    }

    let front_loaded = items
        .iter()
        .filter(|i| i.first_quarter_amount() > i.total_amount * FRONT_LOADED_ITEM_RATIO)
        .count();
    if front_loaded as f64 > items.len() as f64 * FRONT_LOADED_PORTFOLIO_RATIO {
        risks.push(BudgetRisk {
            id: "schedule-front-loaded".to_string(),
            category: RiskCategory::Schedule,
            severity: Severity::Medium,
            description: "プロジェクト初期に予算が集中".to_string(),
            impact: "初期段階での予算執行遅延リスク".to_string(),
            mitigation: "段階的な予算執行計画の策定".to_string(),
            probability: 50,
        });
    }

    risks
}

pub fn generate_budget_recommendations(
    breakdown: &BTreeMap<BudgetCategory, CategoryBreakdown>,
    total_budget: f64,
) -> Vec<BudgetRecommendation> {
    let get = |category: BudgetCategory| breakdown.get(&category).copied().unwrap_or_default();
    let mut recommendations = Vec::new();

    let infrastructure = get(BudgetCategory::Infrastructure);
    if infrastructure.percentage > 15.0 {
        recommendations.push(BudgetRecommendation {
            id: "optimize-infrastructure".to_string(),
            kind: RecommendationType::CostReduction,
            title: "インフラコスト最適化".to_string(),
            description: "クラウドリソースの最適化、予約インスタンス活用による費用削減".to_string(),
            expected_savings: Some(round_currency(infrastructure.amount * 0.2)),
            implementation_cost: Some(50_000.0),
            priority: Priority::High,
        });
    }

    let software = get(BudgetCategory::Software);
    if software.percentage > 10.0 {
        recommendations.push(BudgetRecommendation {
            id: "consolidate-licenses".to_string(),
            kind: RecommendationType::Efficiency,
            title: "ソフトウェアライセンス統合".to_string(),
            description: "類似ツールの統合、ボリュームディスカウントの活用".to_string(),
            expected_savings: Some(round_currency(software.amount * 0.15)),
            implementation_cost: Some(30_000.0),
            priority: Priority::Medium,
        });
    }

    let training = get(BudgetCategory::Training);
    if training.percentage > 5.0 {
        recommendations.push(BudgetRecommendation {
            id: "optimize-training".to_string(),
            kind: RecommendationType::Efficiency,
            title: "研修プログラム効率化".to_string(),
            description: "オンライン研修の活用、内製研修の推進".to_string(),
            expected_savings: Some(round_currency(training.amount * 0.3)),
            implementation_cost: Some(20_000.0),
            priority: Priority::Medium,
        });
    }

    if total_budget > PHASED_EXECUTION_THRESHOLD {
        recommendations.push(BudgetRecommendation {
            id: "phased-execution".to_string(),
            kind: RecommendationType::RiskMitigation,
            title: "段階的プロジェクト実行".to_string(),
            description: "プロジェクトを複数フェーズに分割し、リスク軽減と品質向上".to_string(),
            expected_savings: Some(round_currency(total_budget * 0.05)),
            implementation_cost: Some(100_000.0),
            priority: Priority::High,
        });
    }

    recommendations
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Web,
    Mobile,
    Infrastructure,
    Ai,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Web => "web",
            ProjectType::Mobile => "mobile",
            ProjectType::Infrastructure => "infrastructure",
            ProjectType::Ai => "ai",
        }
    }

    /// Share of the total budget per category, in [`BudgetCategory::ALL`] order.
    pub fn category_ratios(&self) -> [f64; 8] {
        match self {
            ProjectType::Web => [0.55, 0.20, 0.10, 0.08, 0.02, 0.02, 0.02, 0.01],
            ProjectType::Mobile => [0.60, 0.15, 0.08, 0.10, 0.03, 0.02, 0.01, 0.01],
            ProjectType::Infrastructure => [0.40, 0.25, 0.25, 0.05, 0.03, 0.01, 0.01, 0.00],
            ProjectType::Ai => [0.50, 0.20, 0.15, 0.08, 0.05, 0.01, 0.01, 0.00],
        }
    }
}

/// Lump-sum budget lines for a project type; zero-amount categories are skipped.
pub fn generate_budget_template(
    project_type: ProjectType,
    total_budget: f64,
    profile: &SpreadProfile,
) -> Result<Vec<BudgetItem>> {
    let name = project_type.as_str();
    let mut items = Vec::new();

    for (index, (category, ratio)) in BudgetCategory::ALL
        .iter()
        .zip(project_type.category_ratios())
        .enumerate()
    {
        let amount = round_currency(total_budget * ratio);
        if amount <= 0.0 {
            continue;
        }

        items.push(BudgetItem {
            id: format!("template-{}", index),
            category: *category,
            subcategory: category.subcategory().to_string(),
            description: category.template_description(name),
            unit_price: amount,
            quantity: 1.0,
            unit: "LS".to_string(),
            total_amount: amount,
            is_fixed: *category == BudgetCategory::Personnel,
            schedule: spread_amount(amount, profile)?,
            notes: Some(format!("{}プロジェクト用テンプレート項目", name)),
        });
    }

    Ok(items)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnualBenefit {
    pub year: u32,
    pub revenue: f64,
    pub cost_savings: f64,
    pub total_benefit: f64,
    pub discounted_benefit: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IrrEstimate {
    /// Fractional rate, clamped to `0.0..=1.0`.
    pub rate: f64,
    pub converged: bool,
    pub iterations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoiCalculation {
    pub investment: f64,
    pub benefits: Vec<AnnualBenefit>,
    pub npv: f64,
    /// Percent.
    pub irr: f64,
    pub irr_converged: bool,
    /// Years; the full horizon when the investment is never recovered.
    pub payback_period: f64,
    /// Percent, `(total nominal benefits - investment) / investment * 100`.
    pub roi: f64,
}

/// Investment appraisal for a constant annual benefit over `years`.
pub fn calculate_roi(
    investment: f64,
    annual_revenue: f64,
    annual_cost_savings: f64,
    years: u32,
    discount_rate: f64,
) -> Result<RoiCalculation> {
    if !investment.is_finite() || investment <= 0.0 {
        return Err(AccountingError::InvalidInvestment(investment));
    }

    let total_benefit = annual_revenue + annual_cost_savings;
    let benefits: Vec<AnnualBenefit> = (1..=years)
        .map(|year| AnnualBenefit {
            year,
            revenue: annual_revenue,
            cost_savings: annual_cost_savings,
            total_benefit,
            discounted_benefit: total_benefit / (1.0 + discount_rate).powi(year as i32),
        })
        .collect();

    let cash_flows: Vec<f64> = benefits.iter().map(|b| b.total_benefit).collect();

    let npv = calculate_npv(investment, &cash_flows, discount_rate);
    let irr = estimate_irr(investment, &cash_flows);
    if !irr.converged {
        warn!(
            "IRR search did not converge after {} iterations, returning last trial rate {}",
            irr.iterations, irr.rate
        );
    }

    let total_benefits: f64 = cash_flows.iter().sum();
    let roi = (total_benefits - investment) / investment * 100.0;

    Ok(RoiCalculation {
        investment,
        benefits,
        npv,
        irr: irr.rate * 100.0,
        irr_converged: irr.converged,
        payback_period: payback_period(investment, &cash_flows),
        roi,
    })
}

/// `cash_flows[0]` is received at the end of year 1.
pub fn calculate_npv(investment: f64, cash_flows: &[f64], discount_rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(i, cf)| cf / (1.0 + discount_rate).powi(i as i32 + 1))
        .sum::<f64>()
        - investment
}

/// Fixed-step search: starting at 10%, moves the trial rate 1 point towards
/// NPV = 0 until |NPV| < 1000 or 100 iterations pass.
pub fn estimate_irr(investment: f64, cash_flows: &[f64]) -> IrrEstimate {
    let mut rate = IRR_INITIAL_RATE;

    for iteration in 0..IRR_MAX_ITERATIONS {
        let npv = calculate_npv(investment, cash_flows, rate);
        if npv.abs() < IRR_NPV_TOLERANCE {
            return IrrEstimate {
                rate,
                converged: true,
                iterations: iteration,
            };
        }

        rate += if npv > 0.0 { IRR_STEP } else { -IRR_STEP };
        rate = rate.clamp(0.0, 1.0);
    }

    IrrEstimate {
        rate,
        converged: false,
        iterations: IRR_MAX_ITERATIONS,
    }
}

/// First year in which cumulative cash turns non-negative, interpolated
/// linearly inside that year.
pub fn payback_period(investment: f64, cash_flows: &[f64]) -> f64 {
    if investment <= 0.0 {
        return 0.0;
    }

    let mut cumulative = -investment;
    for (i, &cf) in cash_flows.iter().enumerate() {
        let before = cumulative;
        cumulative += cf;
        if cumulative >= 0.0 {
            return i as f64 + (-before) / cf;
        }
    }

    cash_flows.len() as f64
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VarianceInput {
    pub budgeted_quantity: f64,
    pub budgeted_rate: f64,
    pub actual_quantity: f64,
    pub actual_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VarianceType {
    /// Spent less than budgeted.
    Favorable,
    Unfavorable,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VarianceAnalysis {
    pub budgeted_amount: f64,
    pub actual_amount: f64,
    /// `(actual qty - budgeted qty) * budgeted rate`
    pub quantity_variance: f64,
    /// `(actual rate - budgeted rate) * actual qty`
    pub rate_variance: f64,
    /// Always `quantity_variance + rate_variance`; positive means overspend.
    pub total_variance: f64,
    pub variance_type: VarianceType,
}

pub fn analyze_variance(input: &VarianceInput) -> VarianceAnalysis {
    let quantity_variance = (input.actual_quantity - input.budgeted_quantity) * input.budgeted_rate;
    let rate_variance = (input.actual_rate - input.budgeted_rate) * input.actual_quantity;
    let total_variance = quantity_variance + rate_variance;

    let variance_type = if total_variance > 0.0 {
        VarianceType::Unfavorable
    } else if total_variance < 0.0 {
        VarianceType::Favorable
    } else {
        VarianceType::None
    };

    VarianceAnalysis {
        budgeted_amount: input.budgeted_quantity * input.budgeted_rate,
        actual_amount: input.actual_quantity * input.actual_rate,
        quantity_variance,
        rate_variance,
        total_variance,
        variance_type,
    }
}
