//! Additive confidence heuristic for the capitalization decision.

use crate::schema::{
    AccountingTreatment, DecisionCriteria, DevelopmentPhase, Project, ProjectComplexity, RiskLevel,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const BASE_SCORE: i32 = 50;
pub const POINTS_PER_CRITERION: i32 = 15;

pub const HIGH_COMPLEXITY_ADJUSTMENT: i32 = -10;
pub const LOW_COMPLEXITY_ADJUSTMENT: i32 = 5;
pub const HIGH_RISK_ADJUSTMENT: i32 = -15;
pub const LOW_RISK_ADJUSTMENT: i32 = 10;

pub const LARGE_COST_THRESHOLD: f64 = 50_000_000.0;
pub const SMALL_COST_THRESHOLD: f64 = 5_000_000.0;
pub const LARGE_COST_ADJUSTMENT: i32 = 10;
pub const SMALL_COST_ADJUSTMENT: i32 = -5;

pub const LONG_DURATION_MONTHS: u32 = 12;
pub const SHORT_DURATION_MONTHS: u32 = 3;
pub const LONG_DURATION_ADJUSTMENT: i32 = 5;
pub const SHORT_DURATION_ADJUSTMENT: i32 = -10;

pub const CAPITALIZE_THRESHOLD: u8 = 70;
pub const REVIEW_THRESHOLD: u8 = 50;

/// Scores how safely a project can be capitalized, clamped to `0..=100`.
///
/// The treatment is accepted for signature parity with the decision flow but
/// does not affect the score.
pub fn calculate_confidence_score(
    project: &Project,
    criteria: &DecisionCriteria,
    _treatment: AccountingTreatment,
) -> u8 {
    let mut score = BASE_SCORE;

    let satisfied = criteria.satisfied_count().min(DecisionCriteria::TOTAL) as i32;
    score += satisfied * POINTS_PER_CRITERION;

    score += match project.complexity {
        ProjectComplexity::High => HIGH_COMPLEXITY_ADJUSTMENT,
        ProjectComplexity::Low => LOW_COMPLEXITY_ADJUSTMENT,
        ProjectComplexity::Medium => 0,
    };

    score += match project.risk_level {
        RiskLevel::High => HIGH_RISK_ADJUSTMENT,
        RiskLevel::Low => LOW_RISK_ADJUSTMENT,
        RiskLevel::Medium => 0,
    };

    if project.cost > LARGE_COST_THRESHOLD {
        score += LARGE_COST_ADJUSTMENT;
    } else if project.cost < SMALL_COST_THRESHOLD {
        score += SMALL_COST_ADJUSTMENT;
    }

    if project.duration > LONG_DURATION_MONTHS {
        score += LONG_DURATION_ADJUSTMENT;
    } else if project.duration < SHORT_DURATION_MONTHS {
        score += SHORT_DURATION_ADJUSTMENT;
    }

    score.clamp(0, 100) as u8
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Capitalize,
    Review,
    Expense,
}

impl Recommendation {
    pub fn title(&self) -> &'static str {
        match self {
            Recommendation::Capitalize => "資産計上を推奨",
            Recommendation::Review => "慎重な検討が必要",
            Recommendation::Expense => "費用計上を推奨",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Capitalize => {
                "多くの判断基準を満たしており、資産計上が適切と考えられます。"
            }
            Recommendation::Review => {
                "いくつかの基準を満たしていますが、より詳細な検討が必要です。"
            }
            Recommendation::Expense => {
                "基準を満たしていない項目が多いため、費用計上が適切です。"
            }
        }
    }

    pub fn suggested_treatment(&self) -> AccountingTreatment {
        match self {
            Recommendation::Capitalize => AccountingTreatment::Capitalize,
            Recommendation::Review | Recommendation::Expense => AccountingTreatment::Expense,
        }
    }
}

/// 70 and above recommends capitalizing, 50..=69 asks for review, below 50 expenses.
pub fn recommend(score: u8) -> Recommendation {
    if score >= CAPITALIZE_THRESHOLD {
        Recommendation::Capitalize
    } else if score >= REVIEW_THRESHOLD {
        Recommendation::Review
    } else {
        Recommendation::Expense
    }
}

pub fn permitted_treatments(phase: DevelopmentPhase) -> &'static [AccountingTreatment] {
    match phase {
        DevelopmentPhase::Development => {
            &[AccountingTreatment::Expense, AccountingTreatment::Capitalize]
        }
        DevelopmentPhase::Requirements | DevelopmentPhase::Maintenance => {
            &[AccountingTreatment::Expense]
        }
    }
}

pub fn default_treatment(phase: DevelopmentPhase) -> AccountingTreatment {
    match phase {
        DevelopmentPhase::Development => AccountingTreatment::Capitalize,
        DevelopmentPhase::Requirements | DevelopmentPhase::Maintenance => {
            AccountingTreatment::Expense
        }
    }
}

pub fn is_treatment_permitted(phase: DevelopmentPhase, treatment: AccountingTreatment) -> bool {
    permitted_treatments(phase).contains(&treatment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CostBreakdown;

    fn project(
        cost: f64,
        duration: u32,
        complexity: ProjectComplexity,
        risk_level: RiskLevel,
    ) -> Project {
        Project {
            id: "p".to_string(),
            name: "Scoring".to_string(),
            description: "score test".to_string(),
            phase: DevelopmentPhase::Development,
            cost,
            duration,
            team_size: 5,
            industry: "manufacturing".to_string(),
            complexity,
            risk_level,
            cost_breakdown: CostBreakdown {
                personnel: cost,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_neutral_project_scores_base_plus_criteria() {
        let p = project(20_000_000.0, 6, ProjectComplexity::Medium, RiskLevel::Medium);
        let mut criteria = DecisionCriteria::default();
        criteria.future_economic_benefit = true;

        let score = calculate_confidence_score(&p, &criteria, AccountingTreatment::Capitalize);
        assert_eq!(score, 65);
        assert_eq!(recommend(score), Recommendation::Review);
    }

    #[test]
    fn test_adjustments_are_additive() {
        // 50 + 2*15 - 10 - 15 + 10 + 5 = 70
        let p = project(60_000_000.0, 18, ProjectComplexity::High, RiskLevel::High);
        let criteria = DecisionCriteria {
            future_economic_benefit: true,
            technical_feasibility: true,
            ..Default::default()
        };
        assert_eq!(
            calculate_confidence_score(&p, &criteria, AccountingTreatment::Capitalize),
            70
        );

        // 50 + 0 + 5 + 10 - 5 - 10 = 50
        let p = project(1_000_000.0, 2, ProjectComplexity::Low, RiskLevel::Low);
        assert_eq!(
            calculate_confidence_score(&p, &DecisionCriteria::default(), AccountingTreatment::Expense),
            50
        );
    }

    #[test]
    fn test_score_clamped_to_range() {
        let best = project(90_000_000.0, 1000, ProjectComplexity::Low, RiskLevel::Low);
        let score = calculate_confidence_score(
            &best,
            &DecisionCriteria::all_satisfied(),
            AccountingTreatment::Capitalize,
        );
        assert_eq!(score, 100);

        let worst = project(0.0, 1, ProjectComplexity::High, RiskLevel::High);
        let score =
            calculate_confidence_score(&worst, &DecisionCriteria::default(), AccountingTreatment::Expense);
        // 50 - 10 - 15 - 5 - 10 = 10
        assert_eq!(score, 10);
        assert!(score <= 100);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(recommend(100), Recommendation::Capitalize);
        assert_eq!(recommend(70), Recommendation::Capitalize);
        assert_eq!(recommend(69), Recommendation::Review);
        assert_eq!(recommend(50), Recommendation::Review);
        assert_eq!(recommend(49), Recommendation::Expense);
        assert_eq!(recommend(0), Recommendation::Expense);
    }

    #[test]
    fn test_recommendation_text_and_treatment() {
        let capitalize = recommend(85);
        assert_eq!(capitalize.title(), "資産計上を推奨");
        assert!(capitalize.message().contains("資産計上が適切"));
        assert_eq!(capitalize.suggested_treatment(), AccountingTreatment::Capitalize);

        let review = recommend(60);
        assert_eq!(review.title(), "慎重な検討が必要");
        assert!(review.message().contains("より詳細な検討"));
        assert_eq!(review.suggested_treatment(), AccountingTreatment::Expense);

        let expense = recommend(20);
        assert_eq!(expense.title(), "費用計上を推奨");
        assert!(expense.message().contains("費用計上が適切"));
        assert_eq!(expense.suggested_treatment(), AccountingTreatment::Expense);
    }

    #[test]
    fn test_boundary_costs_and_durations_are_neutral() {
        let p = project(50_000_000.0, 12, ProjectComplexity::Medium, RiskLevel::Medium);
        assert_eq!(
            calculate_confidence_score(&p, &DecisionCriteria::default(), AccountingTreatment::Expense),
            50
        );

        let p = project(5_000_000.0, 3, ProjectComplexity::Medium, RiskLevel::Medium);
        assert_eq!(
            calculate_confidence_score(&p, &DecisionCriteria::default(), AccountingTreatment::Expense),
            50
        );
    }

    #[test]
    fn test_phase_rules() {
        assert!(is_treatment_permitted(
            DevelopmentPhase::Development,
            AccountingTreatment::Capitalize
        ));
        assert!(!is_treatment_permitted(
            DevelopmentPhase::Requirements,
            AccountingTreatment::Capitalize
        ));
        assert!(!is_treatment_permitted(
            DevelopmentPhase::Maintenance,
            AccountingTreatment::Capitalize
        ));
        assert_eq!(
            default_treatment(DevelopmentPhase::Maintenance),
            AccountingTreatment::Expense
        );
    }
}
