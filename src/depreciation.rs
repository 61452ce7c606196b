//! Straight-line amortization of capitalized software.

use crate::error::{AccountingError, Result};
use crate::schema::DepreciationEntry;
use crate::utils::round_currency;
use log::debug;

/// Useful life over which capitalized software is amortized.
pub const SOFTWARE_USEFUL_LIFE_YEARS: u32 = 5;

/// Builds a straight-line schedule with zero residual value.
///
/// Each year except the last depreciates `round(cost / years)`; the final year
/// takes whatever book value remains, so the amounts always sum to `cost` and
/// the last ending value is exactly zero. If rounding up would exhaust the
/// asset early, later years depreciate only the remaining book value.
pub fn generate_depreciation_schedule(cost: f64, years: u32) -> Result<Vec<DepreciationEntry>> {
    if !cost.is_finite() || cost <= 0.0 || years == 0 {
        return Err(AccountingError::InvalidDepreciationInput { cost, years });
    }

    let annual = round_currency(cost / years as f64);
    debug!(
        "Depreciation schedule for {} over {} years, annual amount {}",
        cost, years, annual
    );

    let mut schedule = Vec::with_capacity(years as usize);
    let mut book_value = cost;

    for year in 1..=years {
        let beginning_value = book_value;
        let depreciation_amount = if year == years {
            beginning_value
        } else {
            annual.min(beginning_value)
        };
        let ending_value = if year == years {
            0.0
        } else {
            beginning_value - depreciation_amount
        };

        schedule.push(DepreciationEntry {
            year,
            beginning_value,
            depreciation_amount,
            ending_value,
        });

        book_value = ending_value;
    }

    Ok(schedule)
}

/// Yearly straight-line charge for the standard software useful life.
pub fn annual_depreciation(cost: f64) -> f64 {
    round_currency(cost / SOFTWARE_USEFUL_LIFE_YEARS as f64)
}

/// Monthly charge used for the sample monthly journal entry. Not rounded.
pub fn monthly_depreciation(cost: f64, years: u32) -> f64 {
    cost / (years as f64 * 12.0)
}

pub fn total_depreciation(schedule: &[DepreciationEntry]) -> f64 {
    schedule.iter().map(|e| e.depreciation_amount).sum()
}
