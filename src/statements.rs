//! Financial statement shapes: Profit & Loss, Balance Sheet and Cash Flow.
//!
//! Every `total` field is derived from its named sub-components. Mutating code
//! edits the leaf fields and then calls [`FinancialStatement::recalculate_totals`]
//! so that parent totals never go stale.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenses {
    pub salaries: f64,
    pub depreciation: f64,
    pub system_development: f64,
    pub other: f64,
    pub total: f64,
}

impl OperatingExpenses {
    pub fn recalculate_total(&mut self) {
        self.total = self.salaries + self.depreciation + self.system_development + self.other;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossStatement {
    pub revenue: f64,
    pub cost_of_sales: f64,
    pub gross_profit: f64,
    pub operating_expenses: OperatingExpenses,
    pub operating_profit: f64,
    pub non_operating_income: f64,
    pub non_operating_expenses: f64,
    pub ordinary_profit: f64,
    pub extraordinary_income: f64,
    pub extraordinary_loss: f64,
    pub pretax_profit: f64,
    #[schemars(description = "Income tax for the period. Treated as an input; net profit is derived from it.")]
    pub income_tax: f64,
    pub net_profit: f64,
}

impl ProfitLossStatement {
    /// Cascades revenue down to net profit. Income tax is left as is.
    pub fn recalculate_totals(&mut self) {
        self.gross_profit = self.revenue - self.cost_of_sales;
        self.operating_expenses.recalculate_total();
        self.operating_profit = self.gross_profit - self.operating_expenses.total;
        self.ordinary_profit =
            self.operating_profit + self.non_operating_income - self.non_operating_expenses;
        self.pretax_profit =
            self.ordinary_profit + self.extraordinary_income - self.extraordinary_loss;
        self.net_profit = self.pretax_profit - self.income_tax;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAssets {
    pub cash: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntangibleAssets {
    pub software: f64,
    pub goodwill: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedAssets {
    pub tangible_assets: f64,
    pub intangible_assets: IntangibleAssets,
    pub investments: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    pub current_assets: CurrentAssets,
    pub fixed_assets: FixedAssets,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLiabilities {
    pub accounts_payable: f64,
    pub short_term_debt: f64,
    pub accrued: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LongTermLiabilities {
    pub long_term_debt: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Liabilities {
    pub current_liabilities: CurrentLiabilities,
    pub long_term_liabilities: LongTermLiabilities,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equity {
    pub capital: f64,
    pub retained_earnings: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
    pub total_liabilities_and_equity: f64,
}

impl BalanceSheet {
    /// Recomputes every subtotal bottom-up, leaves first.
    pub fn recalculate_totals(&mut self) {
        let current = &mut self.assets.current_assets;
        current.total = current.cash + current.accounts_receivable + current.inventory + current.other;

        let intangible = &mut self.assets.fixed_assets.intangible_assets;
        intangible.total = intangible.software + intangible.goodwill + intangible.other;

        let fixed = &mut self.assets.fixed_assets;
        fixed.total = fixed.tangible_assets + fixed.intangible_assets.total + fixed.investments;

        self.assets.total = self.assets.current_assets.total + self.assets.fixed_assets.total;

        let current_liabilities = &mut self.liabilities.current_liabilities;
        current_liabilities.total = current_liabilities.accounts_payable
            + current_liabilities.short_term_debt
            + current_liabilities.accrued
            + current_liabilities.other;

        let long_term = &mut self.liabilities.long_term_liabilities;
        long_term.total = long_term.long_term_debt + long_term.other;

        self.liabilities.total =
            self.liabilities.current_liabilities.total + self.liabilities.long_term_liabilities.total;

        self.equity.total = self.equity.capital + self.equity.retained_earnings + self.equity.other;

        self.total_liabilities_and_equity = self.liabilities.total + self.equity.total;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingActivities {
    pub net_income: f64,
    pub depreciation: f64,
    pub accounts_receivable_change: f64,
    pub inventory_change: f64,
    pub accounts_payable_change: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestingActivities {
    pub equipment_purchase: f64,
    pub software_development: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancingActivities {
    pub debt_issuance: f64,
    pub debt_repayment: f64,
    pub dividends: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    pub operating_activities: OperatingActivities,
    pub investing_activities: InvestingActivities,
    pub financing_activities: FinancingActivities,
    pub net_cash_flow: f64,
    pub beginning_cash: f64,
    pub ending_cash: f64,
}

impl CashFlowStatement {
    pub fn recalculate_totals(&mut self) {
        let operating = &mut self.operating_activities;
        operating.total = operating.net_income
            + operating.depreciation
            + operating.accounts_receivable_change
            + operating.inventory_change
            + operating.accounts_payable_change
            + operating.other;

        let investing = &mut self.investing_activities;
        investing.total = investing.equipment_purchase + investing.software_development + investing.other;

        let financing = &mut self.financing_activities;
        financing.total =
            financing.debt_issuance + financing.debt_repayment + financing.dividends + financing.other;

        self.net_cash_flow = self.operating_activities.total
            + self.investing_activities.total
            + self.financing_activities.total;
        self.ending_cash = self.beginning_cash + self.net_cash_flow;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    pub profit_loss: ProfitLossStatement,
    pub balance_sheet: BalanceSheet,
    pub cash_flow: CashFlowStatement,
    #[schemars(description = "Fiscal period label, e.g. '2025年度'")]
    pub period: String,
}

impl FinancialStatement {
    pub fn recalculate_totals(&mut self) {
        self.profit_loss.recalculate_totals();
        self.balance_sheet.recalculate_totals();
        self.cash_flow.recalculate_totals();
    }

    /// Mid-sized sample company used as the default projection baseline.
    pub fn sample() -> Self {
        let mut statement = Self {
            profit_loss: ProfitLossStatement {
                revenue: 500_000_000.0,
                cost_of_sales: 300_000_000.0,
                operating_expenses: OperatingExpenses {
                    salaries: 80_000_000.0,
                    depreciation: 15_000_000.0,
                    system_development: 0.0,
                    other: 25_000_000.0,
                    total: 0.0,
                },
                non_operating_income: 2_000_000.0,
                non_operating_expenses: 3_000_000.0,
                extraordinary_income: 0.0,
                extraordinary_loss: 0.0,
                income_tax: 23_700_000.0,
                ..Default::default()
            },
            balance_sheet: BalanceSheet {
                assets: Assets {
                    current_assets: CurrentAssets {
                        cash: 150_000_000.0,
                        accounts_receivable: 80_000_000.0,
                        inventory: 60_000_000.0,
                        other: 20_000_000.0,
                        total: 0.0,
                    },
                    fixed_assets: FixedAssets {
                        tangible_assets: 200_000_000.0,
                        intangible_assets: IntangibleAssets {
                            software: 50_000_000.0,
                            goodwill: 30_000_000.0,
                            other: 20_000_000.0,
                            total: 0.0,
                        },
                        investments: 50_000_000.0,
                        total: 0.0,
                    },
                    total: 0.0,
                },
                liabilities: Liabilities {
                    current_liabilities: CurrentLiabilities {
                        accounts_payable: 70_000_000.0,
                        short_term_debt: 40_000_000.0,
                        accrued: 30_000_000.0,
                        other: 20_000_000.0,
                        total: 0.0,
                    },
                    long_term_liabilities: LongTermLiabilities {
                        long_term_debt: 150_000_000.0,
                        other: 10_000_000.0,
                        total: 0.0,
                    },
                    total: 0.0,
                },
                equity: Equity {
                    capital: 200_000_000.0,
                    retained_earnings: 140_000_000.0,
                    other: 0.0,
                    total: 0.0,
                },
                total_liabilities_and_equity: 0.0,
            },
            cash_flow: CashFlowStatement {
                operating_activities: OperatingActivities {
                    net_income: 55_300_000.0,
                    depreciation: 15_000_000.0,
                    accounts_receivable_change: -5_000_000.0,
                    inventory_change: -3_000_000.0,
                    accounts_payable_change: 8_000_000.0,
                    other: 2_000_000.0,
                    total: 0.0,
                },
                investing_activities: InvestingActivities {
                    equipment_purchase: -20_000_000.0,
                    software_development: 0.0,
                    other: -5_000_000.0,
                    total: 0.0,
                },
                financing_activities: FinancingActivities {
                    debt_issuance: 0.0,
                    debt_repayment: -10_000_000.0,
                    dividends: -15_000_000.0,
                    other: 0.0,
                    total: 0.0,
                },
                beginning_cash: 127_700_000.0,
                ..Default::default()
            },
            period: "2025年度".to_string(),
        };

        statement.recalculate_totals();
        statement
    }
}
