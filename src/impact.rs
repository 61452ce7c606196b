//! Projects an accounting treatment onto a baseline set of statements.
//!
//! Cash moves by the payment net of the tax saved, so for either treatment the
//! change in total assets equals the change in net profit carried into retained
//! earnings, and the cash-flow statement still ends on balance-sheet cash.

use crate::depreciation::{annual_depreciation, generate_depreciation_schedule, SOFTWARE_USEFUL_LIFE_YEARS};
use crate::error::{AccountingError, Result};
use crate::ratios::{calculate_financial_ratios, FinancialRatios};
use crate::schema::{
    AccountingTreatment, BalanceSheetDelta, CurrentYearImpact, FinancialImpact, FutureYearImpact,
    Project,
};
use crate::statements::FinancialStatement;
use crate::utils::{format_amount, round_currency};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CORPORATE_TAX_RATE: f64 = 0.30;

pub fn apply_project_impact(
    baseline: &FinancialStatement,
    project: &Project,
    treatment: AccountingTreatment,
) -> FinancialStatement {
    let mut updated = baseline.clone();
    let cost = project.cost;

    let capitalized_depreciation = match treatment {
        AccountingTreatment::Expense => {
            updated.profit_loss.operating_expenses.system_development += cost;
            0.0
        }
        AccountingTreatment::Capitalize => {
            let depreciation = annual_depreciation(cost);
            updated.profit_loss.operating_expenses.depreciation += depreciation;

            // Year-end book value: cost less the first year's amortization.
            let intangible = &mut updated.balance_sheet.assets.fixed_assets.intangible_assets;
            intangible.software += cost - depreciation;

            updated.cash_flow.operating_activities.depreciation += depreciation;
            updated.cash_flow.investing_activities.software_development -= cost;
            depreciation
        }
    };

    updated.profit_loss.recalculate_totals();
    updated.profit_loss.income_tax =
        round_currency(updated.profit_loss.pretax_profit * CORPORATE_TAX_RATE);
    updated.profit_loss.recalculate_totals();

    let net_profit_delta = updated.profit_loss.net_profit - baseline.profit_loss.net_profit;
    let cash_delta = net_profit_delta + capitalized_depreciation
        - match treatment {
            AccountingTreatment::Expense => 0.0,
            AccountingTreatment::Capitalize => cost,
        };

    updated.balance_sheet.assets.current_assets.cash += cash_delta;
    updated.balance_sheet.equity.retained_earnings += net_profit_delta;
    updated.cash_flow.operating_activities.net_income += net_profit_delta;

    updated.recalculate_totals();

    debug!(
        "Applied {:?} of {} to '{}': net profit delta {}, cash delta {}",
        treatment, cost, project.name, net_profit_delta, cash_delta
    );

    updated
}

/// Pre-tax effect of the treatment on the current year and, for capitalized
/// software, on each year of its useful life.
pub fn calculate_financial_impact(
    project: &Project,
    treatment: AccountingTreatment,
) -> Result<FinancialImpact> {
    if !project.cost.is_finite() || project.cost <= 0.0 {
        return Err(AccountingError::InvalidProject {
            field: "cost".to_string(),
            details: format!("cost must be positive, got {}", project.cost),
        });
    }

    let cost = project.cost;

    match treatment {
        AccountingTreatment::Expense => Ok(FinancialImpact {
            current_year: CurrentYearImpact {
                profit_loss: -cost,
                balance_sheet: BalanceSheetDelta {
                    assets: -cost,
                    liabilities: 0.0,
                },
                cash_flow: -cost,
            },
            future_years: Vec::new(),
        }),
        AccountingTreatment::Capitalize => {
            let schedule = generate_depreciation_schedule(cost, SOFTWARE_USEFUL_LIFE_YEARS)?;

            let future_years: Vec<FutureYearImpact> = schedule
                .iter()
                .map(|entry| FutureYearImpact {
                    year: entry.year,
                    profit_loss: -entry.depreciation_amount,
                    balance_sheet: BalanceSheetDelta {
                        assets: -entry.depreciation_amount,
                        liabilities: 0.0,
                    },
                })
                .collect();

            let first_year = schedule
                .first()
                .map(|e| e.depreciation_amount)
                .unwrap_or(0.0);

            Ok(FinancialImpact {
                current_year: CurrentYearImpact {
                    profit_loss: -first_year,
                    balance_sheet: BalanceSheetDelta::default(),
                    cash_flow: -cost,
                },
                future_years,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetImpact {
    pub assets: f64,
    pub liabilities: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDifference {
    pub treatment: AccountingTreatment,
    pub profit_loss_impact: f64,
    pub balance_sheet_impact: BalanceSheetImpact,
    pub cash_flow_impact: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioStatements {
    pub statements: FinancialStatement,
    pub ratios: FinancialRatios,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub baseline: ScenarioStatements,
    pub expense: ScenarioStatements,
    pub capitalize: ScenarioStatements,
    pub differences: Vec<FinancialDifference>,
}

impl ScenarioComparison {
    pub fn difference(&self, treatment: AccountingTreatment) -> Option<&FinancialDifference> {
        self.differences.iter().find(|d| d.treatment == treatment)
    }
}

/// Side-by-side view of doing nothing, expensing and capitalizing.
pub fn compare_scenarios(baseline: &FinancialStatement, project: &Project) -> ScenarioComparison {
    let expense = apply_project_impact(baseline, project, AccountingTreatment::Expense);
    let capitalize = apply_project_impact(baseline, project, AccountingTreatment::Capitalize);

    let differences = vec![
        difference_between(baseline, &expense, AccountingTreatment::Expense),
        difference_between(baseline, &capitalize, AccountingTreatment::Capitalize),
    ];

    ScenarioComparison {
        baseline: with_ratios(baseline.clone()),
        expense: with_ratios(expense),
        capitalize: with_ratios(capitalize),
        differences,
    }
}

fn with_ratios(statements: FinancialStatement) -> ScenarioStatements {
    let ratios = calculate_financial_ratios(&statements);
    ScenarioStatements { statements, ratios }
}

fn difference_between(
    baseline: &FinancialStatement,
    projected: &FinancialStatement,
    treatment: AccountingTreatment,
) -> FinancialDifference {
    let profit_loss_impact = projected.profit_loss.net_profit - baseline.profit_loss.net_profit;
    let cash_flow_impact = projected.cash_flow.net_cash_flow - baseline.cash_flow.net_cash_flow;

    let balance_sheet_impact = BalanceSheetImpact {
        assets: projected.balance_sheet.assets.total - baseline.balance_sheet.assets.total,
        liabilities: projected.balance_sheet.liabilities.total
            - baseline.balance_sheet.liabilities.total,
        equity: projected.balance_sheet.equity.total - baseline.balance_sheet.equity.total,
    };

    let description = match treatment {
        AccountingTreatment::Expense => format!(
            "費用化: 当期純利益 {}円、総資産 {}円の変動",
            format_amount(profit_loss_impact),
            format_amount(balance_sheet_impact.assets)
        ),
        AccountingTreatment::Capitalize => format!(
            "資産化: 当期純利益 {}円、総資産 {}円の変動（残額は今後{}年間で償却）",
            format_amount(profit_loss_impact),
            format_amount(balance_sheet_impact.assets),
            SOFTWARE_USEFUL_LIFE_YEARS - 1
        ),
    };

    FinancialDifference {
        treatment,
        profit_loss_impact,
        balance_sheet_impact,
        cash_flow_impact,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::{verify_accounting_equation, verify_cash_reconciliation, BALANCE_TOLERANCE};
    use crate::schema::{CostBreakdown, DevelopmentPhase, ProjectComplexity, RiskLevel};

    fn project(cost: f64) -> Project {
        Project {
            id: "impact".to_string(),
            name: "会計システム刷新".to_string(),
            description: "impact test".to_string(),
            phase: DevelopmentPhase::Development,
            cost,
            duration: 12,
            team_size: 6,
            industry: "finance".to_string(),
            complexity: ProjectComplexity::Medium,
            risk_level: RiskLevel::Medium,
            cost_breakdown: CostBreakdown {
                personnel: cost,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_expense_flows_through_profit_and_cash() {
        let baseline = FinancialStatement::sample();
        let updated = apply_project_impact(&baseline, &project(10_000_000.0), AccountingTreatment::Expense);

        let pl = &updated.profit_loss;
        assert_eq!(pl.operating_expenses.system_development, 10_000_000.0);
        assert_eq!(pl.operating_expenses.total, 130_000_000.0);
        assert_eq!(pl.operating_profit, 70_000_000.0);
        assert_eq!(pl.pretax_profit, 69_000_000.0);
        assert_eq!(pl.income_tax, 20_700_000.0);
        assert_eq!(pl.net_profit, 48_300_000.0);

        // 10,000,000 paid, 3,000,000 tax saved
        let bs = &updated.balance_sheet;
        assert_eq!(bs.assets.current_assets.cash, 143_000_000.0);
        assert_eq!(bs.equity.retained_earnings, 133_000_000.0);

        assert_eq!(updated.cash_flow.operating_activities.net_income, 48_300_000.0);
        assert_eq!(updated.cash_flow.operating_activities.total, 65_300_000.0);
    }

    #[test]
    fn test_capitalize_adds_asset_and_one_year_of_depreciation() {
        let baseline = FinancialStatement::sample();
        let updated =
            apply_project_impact(&baseline, &project(10_000_000.0), AccountingTreatment::Capitalize);

        let pl = &updated.profit_loss;
        assert_eq!(pl.operating_expenses.depreciation, 17_000_000.0);
        assert_eq!(pl.operating_expenses.system_development, 0.0);
        assert_eq!(pl.pretax_profit, 77_000_000.0);
        assert_eq!(pl.income_tax, 23_100_000.0);
        assert_eq!(pl.net_profit, 53_900_000.0);

        let bs = &updated.balance_sheet;
        assert_eq!(bs.assets.fixed_assets.intangible_assets.software, 58_000_000.0);
        // -10,000,000 paid + 600,000 tax saved
        assert_eq!(bs.assets.current_assets.cash, 140_600_000.0);
        assert_eq!(bs.equity.retained_earnings, 138_600_000.0);

        let cf = &updated.cash_flow;
        assert_eq!(cf.investing_activities.software_development, -10_000_000.0);
        assert_eq!(cf.investing_activities.total, -35_000_000.0);
        assert_eq!(cf.operating_activities.depreciation, 17_000_000.0);
    }

    #[test]
    fn test_identity_preserved_for_both_treatments() {
        let baseline = FinancialStatement::sample();
        for &cost in &[1.0, 3_333_333.0, 10_000_000.0, 87_654_321.0, 400_000_000.0] {
            for treatment in [AccountingTreatment::Expense, AccountingTreatment::Capitalize] {
                let updated = apply_project_impact(&baseline, &project(cost), treatment);
                verify_accounting_equation(&updated, BALANCE_TOLERANCE).unwrap();
                verify_cash_reconciliation(&updated, BALANCE_TOLERANCE).unwrap();
            }
        }
    }

    #[test]
    fn test_baseline_is_not_mutated() {
        let baseline = FinancialStatement::sample();
        let _ = apply_project_impact(&baseline, &project(5_000_000.0), AccountingTreatment::Expense);
        assert_eq!(baseline, FinancialStatement::sample());
    }

    #[test]
    fn test_expense_impact_scenario() {
        let impact =
            calculate_financial_impact(&project(10_000_000.0), AccountingTreatment::Expense).unwrap();
        assert_eq!(impact.current_year.profit_loss, -10_000_000.0);
        assert_eq!(impact.current_year.cash_flow, -10_000_000.0);
        assert!(impact.future_years.is_empty());
    }

    #[test]
    fn test_capitalize_impact_matches_expense_over_useful_life() {
        let cost = 12_345_678.0;
        let capitalized =
            calculate_financial_impact(&project(cost), AccountingTreatment::Capitalize).unwrap();
        let expensed = calculate_financial_impact(&project(cost), AccountingTreatment::Expense).unwrap();

        assert_eq!(capitalized.future_years.len(), 5);
        assert_eq!(capitalized.current_year.balance_sheet.assets, 0.0);
        assert_eq!(capitalized.current_year.cash_flow, -cost);

        let cumulative: f64 = capitalized.future_years.iter().map(|y| y.profit_loss).sum();
        assert!((cumulative - expensed.current_year.profit_loss).abs() < 1e-6);
    }

    #[test]
    fn test_impact_rejects_non_positive_cost() {
        assert!(calculate_financial_impact(&project(0.0), AccountingTreatment::Expense).is_err());
    }

    #[test]
    fn test_compare_scenarios() {
        let baseline = FinancialStatement::sample();
        let comparison = compare_scenarios(&baseline, &project(10_000_000.0));

        let expense = comparison.difference(AccountingTreatment::Expense).unwrap();
        assert_eq!(expense.profit_loss_impact, -7_000_000.0);
        assert_eq!(expense.balance_sheet_impact.assets, -7_000_000.0);
        assert_eq!(expense.balance_sheet_impact.equity, -7_000_000.0);
        assert_eq!(expense.balance_sheet_impact.liabilities, 0.0);
        assert_eq!(expense.cash_flow_impact, -7_000_000.0);

        let capitalize = comparison.difference(AccountingTreatment::Capitalize).unwrap();
        assert_eq!(capitalize.profit_loss_impact, -1_400_000.0);
        assert_eq!(capitalize.cash_flow_impact, -9_400_000.0);
        assert!(capitalize.description.contains("資産化"));

        assert!(
            comparison.capitalize.statements.profit_loss.net_profit
                > comparison.expense.statements.profit_loss.net_profit
        );
        assert!(comparison.baseline.ratios.roe.is_some());
    }
}
