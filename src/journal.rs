//! Builds the complete journal artifact for an accounting decision: the main
//! entry, the sample monthly depreciation entry, the depreciation schedule, a
//! narrative explanation and the financial impact.

use crate::chart_of_accounts::{
    CASH_AND_DEPOSITS, SOFTWARE_ASSET, SOFTWARE_DEPRECIATION_EXPENSE, SYSTEM_DEVELOPMENT_EXPENSE,
};
use crate::depreciation::{
    annual_depreciation, generate_depreciation_schedule, monthly_depreciation,
    SOFTWARE_USEFUL_LIFE_YEARS,
};
use crate::error::{AccountingError, Result};
use crate::impact::calculate_financial_impact;
use crate::schema::{
    AccountingDecision, AccountingTreatment, DecisionCriteria, DetailedJournalEntry,
    DevelopmentPhase, EntryCategory, JournalEntry, Project,
};
use crate::utils::{format_amount, month_end_of, render_csv};
use chrono::NaiveDate;
use log::debug;

const BALANCE_EPSILON: f64 = 1e-6;

pub fn generate_journal_entries(
    project: &Project,
    treatment: AccountingTreatment,
    decision: &AccountingDecision,
    date: NaiveDate,
) -> Result<DetailedJournalEntry> {
    ensure_journal_input(project)?;

    let cost = project.cost;
    let mut related_entries = Vec::new();
    let mut depreciation_schedule = None;

    let main_entry = match treatment {
        AccountingTreatment::Expense => vec![
            debit_line(
                format!("{}-expense-debit", project.id),
                date,
                SYSTEM_DEVELOPMENT_EXPENSE,
                cost,
                format!("{}の開発費用", project.name),
                EntryCategory::Expense,
            ),
            credit_line(
                format!("{}-expense-credit", project.id),
                date,
                CASH_AND_DEPOSITS,
                cost,
                format!("{}の開発費用支払い", project.name),
                EntryCategory::Asset,
            ),
        ],
        AccountingTreatment::Capitalize => {
            depreciation_schedule = Some(generate_depreciation_schedule(
                cost,
                SOFTWARE_USEFUL_LIFE_YEARS,
            )?);

            let monthly = monthly_depreciation(cost, SOFTWARE_USEFUL_LIFE_YEARS);
            let month_end = month_end_of(date);
            related_entries.push(debit_line(
                format!("{}-depreciation-debit", project.id),
                month_end,
                SOFTWARE_DEPRECIATION_EXPENSE,
                monthly,
                format!("{}の月次減価償却", project.name),
                EntryCategory::Expense,
            ));
            related_entries.push(credit_line(
                format!("{}-depreciation-credit", project.id),
                month_end,
                SOFTWARE_ASSET,
                monthly,
                format!("{}の減価償却累計額", project.name),
                EntryCategory::Asset,
            ));

            vec![
                debit_line(
                    format!("{}-asset-debit", project.id),
                    date,
                    SOFTWARE_ASSET,
                    cost,
                    format!("{}のソフトウェア資産計上", project.name),
                    EntryCategory::Asset,
                ),
                credit_line(
                    format!("{}-asset-credit", project.id),
                    date,
                    CASH_AND_DEPOSITS,
                    cost,
                    format!("{}の開発費用支払い", project.name),
                    EntryCategory::Asset,
                ),
            ]
        }
    };

    let impact = calculate_financial_impact(project, treatment)?;
    let explanation = generate_explanation(project, treatment, decision);

    debug!(
        "Generated {} main and {} related journal lines for '{}'",
        main_entry.len(),
        related_entries.len(),
        project.name
    );

    Ok(DetailedJournalEntry {
        main_entry,
        related_entries: if related_entries.is_empty() {
            None
        } else {
            Some(related_entries)
        },
        depreciation_schedule,
        explanation,
        impact,
    })
}

fn ensure_journal_input(project: &Project) -> Result<()> {
    if project.name.trim().is_empty() {
        return Err(AccountingError::InvalidProject {
            field: "name".to_string(),
            details: "project name is required".to_string(),
        });
    }
    if !project.cost.is_finite() || project.cost <= 0.0 {
        return Err(AccountingError::InvalidProject {
            field: "cost".to_string(),
            details: format!("cost must be positive, got {}", project.cost),
        });
    }
    Ok(())
}

fn debit_line(
    id: String,
    date: NaiveDate,
    account: &str,
    amount: f64,
    description: String,
    category: EntryCategory,
) -> JournalEntry {
    JournalEntry {
        id,
        date,
        account: account.to_string(),
        debit: amount,
        credit: 0.0,
        description,
        category,
    }
}

fn credit_line(
    id: String,
    date: NaiveDate,
    account: &str,
    amount: f64,
    description: String,
    category: EntryCategory,
) -> JournalEntry {
    JournalEntry {
        id,
        date,
        account: account.to_string(),
        debit: 0.0,
        credit: amount,
        description,
        category,
    }
}

pub fn is_balanced(lines: &[JournalEntry]) -> bool {
    let debits: f64 = lines.iter().map(|l| l.debit).sum();
    let credits: f64 = lines.iter().map(|l| l.credit).sum();
    (debits - credits).abs() < BALANCE_EPSILON
}

/// Paragraphs joined by blank lines; empty paragraphs are left out.
pub fn generate_explanation(
    project: &Project,
    treatment: AccountingTreatment,
    decision: &AccountingDecision,
) -> String {
    let cost = format_amount(project.cost);
    let base = match treatment {
        AccountingTreatment::Expense => format!(
            "{}の開発費用 {}円を費用として即時計上しました。",
            project.name, cost
        ),
        AccountingTreatment::Capitalize => format!(
            "{}の開発費用 {}円をソフトウェア資産として計上しました。",
            project.name, cost
        ),
    };

    let criteria = match treatment {
        AccountingTreatment::Capitalize => criteria_explanation(&decision.criteria),
        AccountingTreatment::Expense => String::new(),
    };

    [
        base,
        phase_explanation(project.phase, treatment).to_string(),
        criteria,
        business_impact(project, treatment),
    ]
    .into_iter()
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}

fn phase_explanation(phase: DevelopmentPhase, treatment: AccountingTreatment) -> &'static str {
    match (phase, treatment) {
        (DevelopmentPhase::Requirements, _) => {
            "要件定義・設計段階では、将来の経済的便益が不確実なため、通常は費用として計上されます。"
        }
        (DevelopmentPhase::Development, AccountingTreatment::Capitalize) => {
            "開発・テスト段階では、資産計上の要件を満たす場合にソフトウェア資産として計上できます。"
        }
        (DevelopmentPhase::Development, AccountingTreatment::Expense) => {
            "開発・テスト段階ですが、資産計上の要件を満たさないため費用として計上しました。"
        }
        (DevelopmentPhase::Maintenance, _) => {
            "運用・保守段階での費用は、既存システムの機能維持にかかる費用として扱われ、通常は費用計上されます。"
        }
    }
}

fn criteria_explanation(criteria: &DecisionCriteria) -> String {
    let satisfied = criteria.satisfied_count();
    let total = DecisionCriteria::TOTAL;

    if satisfied >= 3 {
        format!(
            "資産計上の判断基準 {}/{} 項目を満たしており、資産計上が適切です。",
            satisfied, total
        )
    } else if satisfied >= 2 {
        format!(
            "資産計上の判断基準 {}/{} 項目を満たしていますが、より慎重な検討が必要です。",
            satisfied, total
        )
    } else {
        format!(
            "資産計上の判断基準 {}/{} 項目のみの満足のため、費用計上が適切です。",
            satisfied, total
        )
    }
}

fn business_impact(project: &Project, treatment: AccountingTreatment) -> String {
    match treatment {
        AccountingTreatment::Expense => format!(
            "当期の営業利益は {}円 減少しますが、将来年度への影響はありません。税務上の損金算入により、税負担軽減効果も期待できます。",
            format_amount(project.cost)
        ),
        AccountingTreatment::Capitalize => format!(
            "当期の営業利益への影響は減価償却費 {}円の減少に留まり、残りは今後{}年間に渡って費用配分されます。これにより期間損益の平準化が図れます。",
            format_amount(annual_depreciation(project.cost)),
            SOFTWARE_USEFUL_LIFE_YEARS
        ),
    }
}

impl DetailedJournalEntry {
    /// Main entry followed by any related entries.
    pub fn all_lines(&self) -> impl Iterator<Item = &JournalEntry> {
        self.main_entry
            .iter()
            .chain(self.related_entries.iter().flatten())
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.main_entry)
            && self
                .related_entries
                .as_deref()
                .map(is_balanced)
                .unwrap_or(true)
    }

    pub fn to_csv(&self) -> Result<String> {
        render_csv(
            &["Id", "Date", "Account", "Debit", "Credit", "Category", "Description"],
            self.all_lines().map(|line| {
                [
                    line.id.clone(),
                    line.date.format("%Y-%m-%d").to_string(),
                    line.account.clone(),
                    format!("{:.2}", line.debit),
                    format!("{:.2}", line.credit),
                    format!("{:?}", line.category),
                    line.description.clone(),
                ]
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CostBreakdown, ProjectComplexity, RiskLevel};

    fn project(cost: f64) -> Project {
        Project {
            id: "sys-01".to_string(),
            name: "販売管理システム".to_string(),
            description: "journal test".to_string(),
            phase: DevelopmentPhase::Development,
            cost,
            duration: 10,
            team_size: 4,
            industry: "wholesale".to_string(),
            complexity: ProjectComplexity::Medium,
            risk_level: RiskLevel::Low,
            cost_breakdown: CostBreakdown {
                personnel: cost,
                ..Default::default()
            },
        }
    }

    fn decision(treatment: AccountingTreatment, criteria: DecisionCriteria) -> AccountingDecision {
        AccountingDecision {
            phase: DevelopmentPhase::Development,
            treatment,
            criteria,
            reasoning: String::new(),
            confidence: 80,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
    }

    #[test]
    fn test_expense_entry() {
        let result = generate_journal_entries(
            &project(10_000_000.0),
            AccountingTreatment::Expense,
            &decision(AccountingTreatment::Expense, DecisionCriteria::default()),
            date(),
        )
        .unwrap();

        assert_eq!(result.main_entry.len(), 2);
        assert_eq!(result.main_entry[0].account, "システム開発費");
        assert_eq!(result.main_entry[0].debit, 10_000_000.0);
        assert_eq!(result.main_entry[0].credit, 0.0);
        assert_eq!(result.main_entry[1].account, "現金・預金");
        assert_eq!(result.main_entry[1].credit, 10_000_000.0);
        assert_eq!(result.main_entry[1].debit, 0.0);

        assert!(result.related_entries.is_none());
        assert!(result.depreciation_schedule.is_none());
        assert_eq!(result.impact.current_year.profit_loss, -10_000_000.0);
        assert!(result.impact.future_years.is_empty());
        assert!(result.is_balanced());
    }

    #[test]
    fn test_capitalize_entry() {
        let result = generate_journal_entries(
            &project(12_000_000.0),
            AccountingTreatment::Capitalize,
            &decision(AccountingTreatment::Capitalize, DecisionCriteria::all_satisfied()),
            date(),
        )
        .unwrap();

        assert_eq!(result.main_entry[0].account, "ソフトウェア資産");
        assert_eq!(result.main_entry[0].category, EntryCategory::Asset);

        let related = result.related_entries.as_ref().unwrap();
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].account, "ソフトウェア減価償却費");
        assert_eq!(related[0].debit, 200_000.0);
        assert_eq!(related[1].credit, 200_000.0);
        assert_eq!(related[0].date, NaiveDate::from_ymd_opt(2025, 4, 30).unwrap());

        let schedule = result.depreciation_schedule.as_ref().unwrap();
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[0].depreciation_amount, 2_400_000.0);

        assert!(result.is_balanced());
        assert_eq!(result.all_lines().count(), 4);
    }

    #[test]
    fn test_rejects_missing_cost_or_name() {
        let d = decision(AccountingTreatment::Expense, DecisionCriteria::default());

        let err = generate_journal_entries(&project(0.0), AccountingTreatment::Expense, &d, date());
        assert!(matches!(err, Err(AccountingError::InvalidProject { ref field, .. }) if field == "cost"));

        let mut unnamed = project(1_000_000.0);
        unnamed.name = "  ".to_string();
        let err = generate_journal_entries(&unnamed, AccountingTreatment::Expense, &d, date());
        assert!(matches!(err, Err(AccountingError::InvalidProject { ref field, .. }) if field == "name"));
    }

    #[test]
    fn test_expense_explanation() {
        let p = project(10_000_000.0);
        let text = generate_explanation(
            &p,
            AccountingTreatment::Expense,
            &decision(AccountingTreatment::Expense, DecisionCriteria::default()),
        );

        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].contains("10,000,000円を費用として即時計上"));
        assert!(paragraphs[1].contains("資産計上の要件を満たさない"));
        assert!(paragraphs[2].contains("将来年度への影響はありません"));
    }

    #[test]
    fn test_capitalize_explanation_reflects_criteria() {
        let p = project(12_000_000.0);

        let partial = DecisionCriteria {
            future_economic_benefit: true,
            technical_feasibility: true,
            ..Default::default()
        };
        let text = generate_explanation(
            &p,
            AccountingTreatment::Capitalize,
            &decision(AccountingTreatment::Capitalize, partial),
        );
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        assert!(paragraphs[2].contains("2/4 項目を満たしていますが"));
        assert!(paragraphs[3].contains("2,400,000円"));

        let text = generate_explanation(
            &p,
            AccountingTreatment::Capitalize,
            &decision(AccountingTreatment::Capitalize, DecisionCriteria::all_satisfied()),
        );
        assert!(text.contains("4/4 項目を満たしており"));
    }

    #[test]
    fn test_phase_explanations() {
        let mut p = project(3_000_000.0);
        let d = decision(AccountingTreatment::Expense, DecisionCriteria::default());

        p.phase = DevelopmentPhase::Requirements;
        assert!(generate_explanation(&p, AccountingTreatment::Expense, &d).contains("要件定義"));

        p.phase = DevelopmentPhase::Maintenance;
        assert!(generate_explanation(&p, AccountingTreatment::Expense, &d).contains("運用・保守"));
    }

    #[test]
    fn test_csv_export() {
        let result = generate_journal_entries(
            &project(12_000_000.0),
            AccountingTreatment::Capitalize,
            &decision(AccountingTreatment::Capitalize, DecisionCriteria::all_satisfied()),
            date(),
        )
        .unwrap();

        let csv = result.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("sys-01-asset-debit,2025-04-15,ソフトウェア資産,12000000.00,0.00"));
    }

    #[test]
    fn test_csv_export_quotes_separators() {
        let mut p = project(3_000_000.0);
        p.id = "sys,02".to_string();
        p.name = "Portal, \"v2\"".to_string();

        let result = generate_journal_entries(
            &p,
            AccountingTreatment::Expense,
            &decision(AccountingTreatment::Expense, DecisionCriteria::default()),
            date(),
        )
        .unwrap();

        let csv = result.to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "sys,02-expense-debit");
        assert_eq!(&records[0][6], "Portal, \"v2\"の開発費用");
        assert!(records.iter().all(|r| r.len() == 7));
    }
}
