use crate::error::Result;
use crate::schema::{EntryCategory, JournalEntry};
use crate::utils::render_csv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SYSTEM_DEVELOPMENT_EXPENSE: &str = "システム開発費";
pub const SOFTWARE_ASSET: &str = "ソフトウェア資産";
pub const CASH_AND_DEPOSITS: &str = "現金・預金";
pub const SOFTWARE_DEPRECIATION_EXPENSE: &str = "ソフトウェア減価償却費";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountEntry {
    pub name: String,
    pub category: EntryCategory,
    pub code: Option<String>,
}

/// Accounts the journal generator posts to, with their ledger codes.
pub fn standard_accounts() -> Vec<AccountEntry> {
    [
        (CASH_AND_DEPOSITS, EntryCategory::Asset, "1110"),
        (SOFTWARE_ASSET, EntryCategory::Asset, "1520"),
        (SYSTEM_DEVELOPMENT_EXPENSE, EntryCategory::Expense, "6410"),
        (SOFTWARE_DEPRECIATION_EXPENSE, EntryCategory::Expense, "6420"),
    ]
    .into_iter()
    .map(|(name, category, code)| AccountEntry {
        name: name.to_string(),
        category,
        code: Some(code.to_string()),
    })
    .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    pub assets: Vec<AccountEntry>,
    pub liabilities: Vec<AccountEntry>,
    pub equity: Vec<AccountEntry>,
    pub revenue: Vec<AccountEntry>,
    pub expenses: Vec<AccountEntry>,
}

impl ChartOfAccounts {
    pub fn standard() -> Self {
        let mut chart = Self::default();
        for account in standard_accounts() {
            chart.push(account);
        }
        chart.sort();
        chart
    }

    /// Collects the distinct accounts touched by a set of journal lines.
    /// Known accounts keep their ledger code; unknown ones get none.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a JournalEntry>) -> Self {
        let known: BTreeMap<String, AccountEntry> = standard_accounts()
            .into_iter()
            .map(|a| (a.name.clone(), a))
            .collect();

        let mut seen: BTreeMap<String, AccountEntry> = BTreeMap::new();
        for entry in entries {
            seen.entry(entry.account.clone()).or_insert_with(|| {
                known.get(&entry.account).cloned().unwrap_or(AccountEntry {
                    name: entry.account.clone(),
                    category: entry.category,
                    code: None,
                })
            });
        }

        let mut chart = Self::default();
        for account in seen.into_values() {
            chart.push(account);
        }
        chart.sort();
        chart
    }

    fn push(&mut self, account: AccountEntry) {
        match account.category {
            EntryCategory::Asset => self.assets.push(account),
            EntryCategory::Liability => self.liabilities.push(account),
            EntryCategory::Equity => self.equity.push(account),
            EntryCategory::Revenue => self.revenue.push(account),
            EntryCategory::Expense => self.expenses.push(account),
        }
    }

    fn sort(&mut self) {
        for section in [
            &mut self.assets,
            &mut self.liabilities,
            &mut self.equity,
            &mut self.revenue,
            &mut self.expenses,
        ] {
            section.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        }
    }

    fn sections(&self) -> [(&'static str, &Vec<AccountEntry>); 5] {
        [
            ("Assets", &self.assets),
            ("Liabilities", &self.liabilities),
            ("Equity", &self.equity),
            ("Revenue", &self.revenue),
            ("Expenses", &self.expenses),
        ]
    }

    pub fn find(&self, name: &str) -> Option<&AccountEntry> {
        self.sections()
            .into_iter()
            .flat_map(|(_, accounts)| accounts.iter())
            .find(|a| a.name == name)
    }

    pub fn total_accounts(&self) -> usize {
        self.sections().iter().map(|(_, a)| a.len()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_csv(&self) -> Result<String> {
        let rows = self.sections().into_iter().flat_map(|(section, accounts)| {
            accounts.iter().map(move |account| {
                [
                    section.to_string(),
                    account.code.clone().unwrap_or_default(),
                    account.name.clone(),
                    format!("{:?}", account.category),
                ]
            })
        });

        render_csv(&["Section", "Code", "Account Name", "Category"], rows)
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str("# Chart of Accounts\n\n");

        for (section, accounts) in self.sections() {
            if accounts.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", section));
            for account in accounts {
                match &account.code {
                    Some(code) => output.push_str(&format!("- {} {}\n", code, account.name)),
                    None => output.push_str(&format!("- {}\n", account.name)),
                }
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(account: &str, category: EntryCategory, debit: f64, credit: f64) -> JournalEntry {
        JournalEntry {
            id: format!("{}-line", account),
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            account: account.to_string(),
            debit,
            credit,
            description: String::new(),
            category,
        }
    }

    #[test]
    fn test_standard_chart() {
        let chart = ChartOfAccounts::standard();
        assert_eq!(chart.total_accounts(), 4);
        assert_eq!(chart.assets.len(), 2);
        assert_eq!(chart.expenses.len(), 2);
        assert_eq!(chart.assets[0].name, CASH_AND_DEPOSITS);
        assert_eq!(chart.find(SOFTWARE_ASSET).unwrap().code.as_deref(), Some("1520"));
    }

    #[test]
    fn test_from_entries_deduplicates() {
        let entries = vec![
            line(SOFTWARE_ASSET, EntryCategory::Asset, 100.0, 0.0),
            line(CASH_AND_DEPOSITS, EntryCategory::Asset, 0.0, 100.0),
            line(SOFTWARE_DEPRECIATION_EXPENSE, EntryCategory::Expense, 10.0, 0.0),
            line(SOFTWARE_ASSET, EntryCategory::Asset, 0.0, 10.0),
            line("未払金", EntryCategory::Liability, 0.0, 5.0),
        ];

        let chart = ChartOfAccounts::from_entries(&entries);
        assert_eq!(chart.total_accounts(), 4);
        assert_eq!(chart.liabilities.len(), 1);
        assert!(chart.liabilities[0].code.is_none());
    }

    #[test]
    fn test_chart_to_markdown() {
        let markdown = ChartOfAccounts::standard().to_markdown();
        assert!(markdown.contains("# Chart of Accounts"));
        assert!(markdown.contains("## Assets"));
        assert!(markdown.contains("1110 現金・預金"));
        assert!(!markdown.contains("## Liabilities"));
    }

    #[test]
    fn test_chart_to_csv() {
        let csv = ChartOfAccounts::standard().to_csv().unwrap();
        assert!(csv.starts_with("Section,Code,Account Name,Category\n"));
        assert!(csv.contains("Expenses,6410,システム開発費,Expense"));
    }

    #[test]
    fn test_chart_to_json() {
        let json = ChartOfAccounts::standard().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["assets"][1]["code"], "1520");
        assert_eq!(value["assets"][1]["name"], SOFTWARE_ASSET);
        assert_eq!(value["expenses"][0]["category"], "expense");
        assert!(value["liabilities"].as_array().unwrap().is_empty());
    }
}
