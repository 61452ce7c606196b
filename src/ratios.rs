//! Profitability, efficiency and safety ratios derived from one statement.
//!
//! A ratio whose denominator is zero is reported as `None` rather than
//! propagating `NaN` or infinity. [`calculate_financial_ratios_strict`] turns
//! that case into an error for callers that cannot display a gap.

use crate::error::{AccountingError, Result};
use crate::statements::FinancialStatement;
use crate::utils::percentage_of;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRatios {
    pub gross_profit_margin: Option<f64>,
    pub operating_profit_margin: Option<f64>,
    pub net_profit_margin: Option<f64>,
    /// Plain ratio, not a percentage.
    pub total_asset_turnover: Option<f64>,
    pub roa: Option<f64>,
    pub roe: Option<f64>,
    pub current_ratio: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub equity_ratio: Option<f64>,
    pub software_asset_ratio: Option<f64>,
}

impl FinancialRatios {
    pub fn named(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("grossProfitMargin", self.gross_profit_margin),
            ("operatingProfitMargin", self.operating_profit_margin),
            ("netProfitMargin", self.net_profit_margin),
            ("totalAssetTurnover", self.total_asset_turnover),
            ("roa", self.roa),
            ("roe", self.roe),
            ("currentRatio", self.current_ratio),
            ("debtRatio", self.debt_ratio),
            ("equityRatio", self.equity_ratio),
            ("softwareAssetRatio", self.software_asset_ratio),
        ]
    }
}

pub fn calculate_financial_ratios(statement: &FinancialStatement) -> FinancialRatios {
    let pl = &statement.profit_loss;
    let bs = &statement.balance_sheet;
    let total_assets = bs.assets.total;

    FinancialRatios {
        gross_profit_margin: percentage_of(pl.gross_profit, pl.revenue),
        operating_profit_margin: percentage_of(pl.operating_profit, pl.revenue),
        net_profit_margin: percentage_of(pl.net_profit, pl.revenue),
        total_asset_turnover: if total_assets == 0.0 {
            None
        } else {
            Some(pl.revenue / total_assets)
        },
        roa: percentage_of(pl.net_profit, total_assets),
        roe: percentage_of(pl.net_profit, bs.equity.total),
        current_ratio: percentage_of(
            bs.assets.current_assets.total,
            bs.liabilities.current_liabilities.total,
        ),
        debt_ratio: percentage_of(bs.liabilities.total, total_assets),
        equity_ratio: percentage_of(bs.equity.total, total_assets),
        software_asset_ratio: percentage_of(
            bs.assets.fixed_assets.intangible_assets.software,
            total_assets,
        ),
    }
}

pub fn calculate_financial_ratios_strict(statement: &FinancialStatement) -> Result<FinancialRatios> {
    let ratios = calculate_financial_ratios(statement);

    if let Some((name, _)) = ratios.named().into_iter().find(|(_, v)| v.is_none()) {
        return Err(AccountingError::ZeroDenominator(name.to_string()));
    }

    Ok(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(value: Option<f64>, expected: f64) {
        let v = value.expect("ratio should be defined");
        assert!((v - expected).abs() < 1e-9, "expected {}, got {}", expected, v);
    }

    #[test]
    fn test_sample_ratios() {
        let ratios = calculate_financial_ratios(&FinancialStatement::sample());

        approx(ratios.gross_profit_margin, 40.0);
        approx(ratios.operating_profit_margin, 16.0);
        approx(ratios.net_profit_margin, 11.06);
        approx(ratios.total_asset_turnover, 500.0 / 660.0);
        approx(ratios.roe, 55.3 / 340.0 * 100.0);
        approx(ratios.current_ratio, 310.0 / 160.0 * 100.0);
        approx(ratios.debt_ratio, 320.0 / 660.0 * 100.0);
        approx(ratios.equity_ratio, 340.0 / 660.0 * 100.0);
        approx(ratios.software_asset_ratio, 50.0 / 660.0 * 100.0);
    }

    #[test]
    fn test_zero_revenue_yields_none() {
        let mut statement = FinancialStatement::sample();
        statement.profit_loss.revenue = 0.0;
        statement.profit_loss.cost_of_sales = 0.0;
        statement.recalculate_totals();

        let ratios = calculate_financial_ratios(&statement);
        assert!(ratios.gross_profit_margin.is_none());
        assert!(ratios.net_profit_margin.is_none());
        assert!(ratios.roe.is_some());

        match calculate_financial_ratios_strict(&statement) {
            Err(AccountingError::ZeroDenominator(name)) => assert_eq!(name, "grossProfitMargin"),
            other => panic!("expected zero denominator, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_current_liabilities() {
        let mut statement = FinancialStatement::sample();
        statement.balance_sheet.liabilities.current_liabilities = Default::default();
        statement.recalculate_totals();

        let ratios = calculate_financial_ratios(&statement);
        assert!(ratios.current_ratio.is_none());
        assert!(ratios.debt_ratio.is_some());
    }
}
