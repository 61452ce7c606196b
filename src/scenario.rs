use crate::budget::{BudgetCategory, BudgetItem};
use crate::utils::round_currency;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A what-if adjustment to a budget: per-category multipliers followed by
/// extra line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetScenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[schemars(
        description = "Factor applied to every item of a category (e.g. 1.2 for a 20% increase). Categories not listed keep a factor of 1.0."
    )]
    #[serde(default)]
    pub multipliers: BTreeMap<BudgetCategory, f64>,

    #[schemars(description = "Items appended after the multipliers are applied. They are not scaled.")]
    #[serde(default)]
    pub additional_items: Vec<BudgetItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BudgetScenario {
    pub fn multiplier(&self, category: BudgetCategory) -> f64 {
        self.multipliers.get(&category).copied().unwrap_or(1.0)
    }

    /// Returns the adjusted items; `items` is left untouched.
    pub fn apply(&self, items: &[BudgetItem]) -> Vec<BudgetItem> {
        let mut adjusted: Vec<BudgetItem> = items
            .iter()
            .map(|item| scale_item(item, self.multiplier(item.category)))
            .collect();

        adjusted.extend(self.additional_items.iter().cloned());
        adjusted
    }
}

fn scale_item(item: &BudgetItem, factor: f64) -> BudgetItem {
    let mut scaled = item.clone();
    if factor == 1.0 {
        return scaled;
    }

    scaled.unit_price = item.unit_price * factor;
    scaled.total_amount = round_currency(item.total_amount * factor);

    let last_planned = scaled.schedule.iter().rposition(|s| s.planned_amount != 0.0);
    let mut allocated = 0.0;
    for (idx, month) in scaled.schedule.iter_mut().enumerate() {
        month.planned_amount = if Some(idx) == last_planned {
            scaled.total_amount - allocated
        } else {
            round_currency(month.planned_amount * factor)
        };
        allocated += month.planned_amount;
    }

    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{spread_amount, SpreadProfile};

    fn item(id: &str, category: BudgetCategory, amount: f64) -> BudgetItem {
        BudgetItem {
            id: id.to_string(),
            category,
            subcategory: String::new(),
            description: String::new(),
            unit_price: amount,
            quantity: 1.0,
            unit: "LS".to_string(),
            total_amount: amount,
            is_fixed: false,
            schedule: spread_amount(amount, &SpreadProfile::FirstHalf).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_apply_multipliers_and_additions() {
        let base = vec![
            item("p", BudgetCategory::Personnel, 6_000_000.0),
            item("s", BudgetCategory::Software, 1_000_000.0),
        ];

        let scenario = BudgetScenario {
            id: "s-1".to_string(),
            name: "人件費増".to_string(),
            multipliers: BTreeMap::from([(BudgetCategory::Personnel, 1.2)]),
            additional_items: vec![item("t", BudgetCategory::Training, 300_000.0)],
            ..Default::default()
        };

        let adjusted = scenario.apply(&base);
        assert_eq!(adjusted.len(), 3);
        assert_eq!(adjusted[0].total_amount, 7_200_000.0);
        assert_eq!(adjusted[1], base[1]);
        assert_eq!(adjusted[2].id, "t");

        // input items untouched
        assert_eq!(base[0].total_amount, 6_000_000.0);
    }

    #[test]
    fn test_scaled_schedule_still_sums_to_total() {
        let base = vec![item("e", BudgetCategory::External, 1_000_001.0)];
        let scenario = BudgetScenario {
            multipliers: BTreeMap::from([(BudgetCategory::External, 0.85)]),
            ..Default::default()
        };

        let adjusted = scenario.apply(&base);
        let scheduled: f64 = adjusted[0].schedule.iter().map(|s| s.planned_amount).sum();
        assert_eq!(adjusted[0].total_amount, 850_001.0);
        assert_eq!(scheduled, adjusted[0].total_amount);
        assert_eq!(adjusted[0].schedule[11].planned_amount, 0.0);
    }

    #[test]
    fn test_scenario_from_json() {
        let json = r#"{
            "id": "cut",
            "name": "Infrastructure cut",
            "multipliers": { "infrastructure": 0.5 }
        }"#;
        let scenario: BudgetScenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.multiplier(BudgetCategory::Infrastructure), 0.5);
        assert_eq!(scenario.multiplier(BudgetCategory::Personnel), 1.0);
        assert!(scenario.additional_items.is_empty());
    }
}
