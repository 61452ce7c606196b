use crate::budget::MonthlySchedule;
use crate::error::{AccountingError, Result};
use crate::utils::round_currency;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How an annual budget amount is spread over the twelve months of the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SpreadProfile {
    #[schemars(description = "Equal amounts over the first six months, nothing afterwards.")]
    FirstHalf,

    #[schemars(description = "Equal amounts in all twelve months.")]
    Even,

    #[schemars(description = "Linearly decreasing from month 1 to month 12.")]
    FrontLoaded,

    #[schemars(description = "Twelve non-negative weights summing to 1.0, month 1 first.")]
    Custom(Vec<f64>),
}

impl Default for SpreadProfile {
    fn default() -> Self {
        Self::FirstHalf
    }
}

pub fn profile_weights(profile: &SpreadProfile) -> Result<Vec<f64>> {
    let weights = match profile {
        SpreadProfile::FirstHalf => (0..12)
            .map(|m| if m < 6 { 1.0 / 6.0 } else { 0.0 })
            .collect(),

        SpreadProfile::Even => vec![1.0 / 12.0; 12],

        SpreadProfile::FrontLoaded => {
            let raw: Vec<f64> = (0..12).map(|m| (12 - m) as f64).collect();
            normalize_weights(&raw)
        }

        SpreadProfile::Custom(custom_weights) => {
            validate_custom_weights(custom_weights)?;
            custom_weights.clone()
        }
    };

    Ok(weights)
}

fn validate_custom_weights(weights: &[f64]) -> Result<()> {
    if weights.len() != 12 {
        return Err(AccountingError::InvalidScheduleWeights(format!(
            "Expected 12 weights, got {}",
            weights.len()
        )));
    }

    if weights.iter().any(|&w| w < 0.0 || !w.is_finite()) {
        return Err(AccountingError::InvalidScheduleWeights(
            "All weights must be finite and non-negative".to_string(),
        ));
    }

    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 0.01 {
        return Err(AccountingError::InvalidScheduleWeights(format!(
            "Weights must sum to 1.0 (got {})",
            sum
        )));
    }

    Ok(())
}

fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum == 0.0 {
        return weights.to_vec();
    }
    weights.iter().map(|w| w / sum).collect()
}

/// Splits `amount` into twelve whole-yen monthly plans. The last month with a
/// non-zero weight absorbs the rounding remainder so the plans sum to `amount`.
pub fn spread_amount(amount: f64, profile: &SpreadProfile) -> Result<Vec<MonthlySchedule>> {
    let weights = profile_weights(profile)?;
    let last_weighted = weights.iter().rposition(|&w| w > 0.0);

    let mut allocated = 0.0;
    let schedule = weights
        .iter()
        .enumerate()
        .map(|(idx, &weight)| {
            let planned_amount = if Some(idx) == last_weighted {
                amount - allocated
            } else {
                round_currency(amount * weight)
            };
            allocated += planned_amount;

            MonthlySchedule {
                month: idx as u32 + 1,
                planned_amount,
                actual_amount: None,
                note: None,
            }
        })
        .collect();

    Ok(schedule)
}
