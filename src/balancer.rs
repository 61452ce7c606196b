use crate::error::{AccountingError, Result};
use crate::statements::{BalanceSheet, FinancialStatement};

/// Default tolerance, in currency units, for identity checks.
pub const BALANCE_TOLERANCE: f64 = 0.5;

pub struct AccountingBalancer<'a> {
    statement: &'a FinancialStatement,
}

impl<'a> AccountingBalancer<'a> {
    pub fn new(statement: &'a FinancialStatement) -> Self {
        Self { statement }
    }

    /// Checks Assets = Liabilities + Equity against freshly summed components,
    /// and that the stored `total_liabilities_and_equity` agrees.
    pub fn verify_accounting_equation(&self, tolerance: f64) -> Result<()> {
        let (assets, liabilities, equity) = self.calculate_balances();

        let difference = (assets - (liabilities + equity)).abs();
        let stored_difference =
            (assets - self.statement.balance_sheet.total_liabilities_and_equity).abs();

        if difference > tolerance || stored_difference > tolerance {
            return Err(AccountingError::AccountingEquationViolation {
                assets,
                liabilities,
                equity,
                difference: difference.max(stored_difference),
            });
        }

        Ok(())
    }

    pub fn verify_cash_reconciliation(&self, tolerance: f64) -> Result<()> {
        let cash_flow = self.statement.cash_flow.ending_cash;
        let balance_sheet = self.statement.balance_sheet.assets.current_assets.cash;

        if (cash_flow - balance_sheet).abs() > tolerance {
            return Err(AccountingError::CashReconciliation {
                cash_flow,
                balance_sheet,
            });
        }

        Ok(())
    }

    /// Sums leaves rather than trusting stored subtotals.
    fn calculate_balances(&self) -> (f64, f64, f64) {
        let mut sheet: BalanceSheet = self.statement.balance_sheet.clone();
        sheet.recalculate_totals();

        (sheet.assets.total, sheet.liabilities.total, sheet.equity.total)
    }
}

pub fn verify_accounting_equation(statement: &FinancialStatement, tolerance: f64) -> Result<()> {
    let balancer = AccountingBalancer::new(statement);
    balancer.verify_accounting_equation(tolerance)
}

pub fn verify_cash_reconciliation(statement: &FinancialStatement, tolerance: f64) -> Result<()> {
    let balancer = AccountingBalancer::new(statement);
    balancer.verify_cash_reconciliation(tolerance)
}
