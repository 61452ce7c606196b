use crate::error::{AccountingError, Result};
use crate::schema::{CostBreakdown, Project};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Allowed gap between the cost breakdown sum and the total cost, as a share of the total.
pub const BREAKDOWN_TOLERANCE_RATIO: f64 = 0.01;
pub const LOW_COST_THRESHOLD: f64 = 1_000_000.0;
pub const HIGH_COST_THRESHOLD: f64 = 100_000_000.0;
pub const LONG_DURATION_MONTHS: u32 = 24;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    RequiredField,
    InvalidValue,
    InconsistentData,
    InconsistentTotal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: ValidationErrorCode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    fn new(errors: Vec<ValidationError>, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Turns the first error into [`AccountingError::InvalidProject`], otherwise
    /// hands back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>> {
        match self.errors.into_iter().next() {
            Some(error) => Err(AccountingError::InvalidProject {
                field: error.field,
                details: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

fn error(field: &str, message: impl Into<String>, code: ValidationErrorCode) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
        code,
    }
}

fn warning(field: &str, message: &str, suggestion: &str) -> ValidationWarning {
    ValidationWarning {
        field: field.to_string(),
        message: message.to_string(),
        suggestion: suggestion.to_string(),
    }
}

pub fn validate_project(project: &Project) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if project.name.trim().is_empty() {
        errors.push(error(
            "name",
            "プロジェクト名は必須です",
            ValidationErrorCode::RequiredField,
        ));
    }

    if project.description.trim().is_empty() {
        errors.push(error(
            "description",
            "プロジェクトの説明は必須です",
            ValidationErrorCode::RequiredField,
        ));
    }

    let cost_is_positive = project.cost > 0.0;
    if !cost_is_positive {
        errors.push(error(
            "cost",
            "プロジェクト費用は正の数値である必要があります",
            ValidationErrorCode::InvalidValue,
        ));
    }

    if project.duration == 0 {
        errors.push(error(
            "duration",
            "期間は1ヶ月以上である必要があります",
            ValidationErrorCode::InvalidValue,
        ));
    }

    if project.team_size == 0 {
        errors.push(error(
            "teamSize",
            "チーム規模は1名以上である必要があります",
            ValidationErrorCode::InvalidValue,
        ));
    }

    if cost_is_positive && project.cost < LOW_COST_THRESHOLD {
        warnings.push(warning(
            "cost",
            "プロジェクト費用が低額です",
            "100万円未満のプロジェクトでは資産計上の検討は通常不要です",
        ));
    }

    if project.cost > HIGH_COST_THRESHOLD {
        warnings.push(warning(
            "cost",
            "プロジェクト費用が高額です",
            "1億円を超えるプロジェクトでは特に慎重な判断が必要です",
        ));
    }

    if project.duration > LONG_DURATION_MONTHS {
        warnings.push(warning(
            "duration",
            "プロジェクト期間が長期です",
            "2年を超えるプロジェクトでは段階的な資産計上を検討してください",
        ));
    }

    for (component, value) in project.cost_breakdown.components() {
        if value < 0.0 {
            errors.push(error(
                &format!("costBreakdown.{}", component),
                "費用は負の値にできません",
                ValidationErrorCode::InvalidValue,
            ));
        }
    }

    if cost_is_positive {
        let breakdown_total = project.cost_breakdown.total();
        if (breakdown_total - project.cost).abs() > project.cost * BREAKDOWN_TOLERANCE_RATIO {
            errors.push(error(
                "costBreakdown",
                "費用内訳の合計とプロジェクト総費用が一致しません",
                ValidationErrorCode::InconsistentData,
            ));
        }

        if project.cost_breakdown.personnel / project.cost > 0.8 {
            warnings.push(warning(
                "costBreakdown.personnel",
                "人件費の比率が高すぎます",
                "人件費が80%を超える場合、外部委託の検討をお勧めします",
            ));
        }
    }

    ValidationResult::new(errors, warnings)
}

pub fn validate_cost_breakdown(breakdown: &CostBreakdown, total_cost: f64) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (field, value) in breakdown.components() {
        if value < 0.0 {
            errors.push(error(
                field,
                "費用は負の値にできません",
                ValidationErrorCode::InvalidValue,
            ));
        }
    }

    let total = breakdown.total();
    if (total - total_cost).abs() > total_cost * BREAKDOWN_TOLERANCE_RATIO {
        errors.push(error(
            "total",
            format!(
                "費用内訳の合計({}円)とプロジェクト総費用({}円)が一致しません",
                crate::utils::format_amount(total),
                crate::utils::format_amount(total_cost)
            ),
            ValidationErrorCode::InconsistentTotal,
        ));
    }

    if total_cost > 0.0 {
        if breakdown.personnel / total_cost > 0.7 {
            warnings.push(warning(
                "personnel",
                "人件費の比率が高すぎます",
                "人件費が70%を超える場合、プロジェクト効率化を検討してください",
            ));
        }

        if breakdown.external / total_cost > 0.6 {
            warnings.push(warning(
                "external",
                "外部委託費の比率が高すぎます",
                "外部委託費が60%を超える場合、内製化の検討をお勧めします",
            ));
        }
    }

    ValidationResult::new(errors, warnings)
}
