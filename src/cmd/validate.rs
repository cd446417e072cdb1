//! Validate command - surface data quality issues without generating full reports

use crate::cmd::read_records;
use crate::deductions::rule_for;
use crate::records::{IncomeCategory, Records, ValueType};
use crate::tax::TaxYear;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// CSV or JSON file containing income and expense records
    #[arg(short, long)]
    records: PathBuf,

    /// Year of assessment to filter (e.g., 2026 for 2025/26)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    #[serde(rename = "type")]
    issue_type: &'static str,
    date: String,
    kind: &'static str,
    amount: String,
    message: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    tax_year: String,
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_records(&self.records)?;
        let tax_year = self.year.map(TaxYear);
        let issues = collect_issues(&records, tax_year);

        if self.json {
            let output = ValidationOutput {
                tax_year: tax_year.map_or("All Years".to_string(), |y| y.display()),
                issue_count: issues.len(),
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&issues, tax_year);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[ValidationIssue], year: Option<TaxYear>) {
        let year_str = year.map_or("All Years".to_string(), |y| y.display());

        println!();
        println!("VALIDATION RESULTS ({})", year_str);
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", issues.len());
            println!();

            for (i, issue) in issues.iter().enumerate() {
                println!(
                    "  {}. [{}] {} {} of R{}",
                    i + 1,
                    issue.issue_type,
                    issue.date,
                    issue.kind,
                    issue.amount
                );
                println!("     {}", issue.message);
                println!();
            }
        }
    }
}

fn collect_issues(records: &Records, year: Option<TaxYear>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for income in &records.incomes {
        if year.is_some_and(|y| !y.contains(income.date)) {
            continue;
        }
        let date = income.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", income.amount);

        if income.amount <= Decimal::ZERO {
            issues.push(ValidationIssue {
                issue_type: "NonPositiveAmount",
                date: date.clone(),
                kind: "income",
                amount: amount.clone(),
                message: "Income amount should be greater than zero".to_string(),
            });
        }
        if income.tax_withheld > income.amount {
            issues.push(ValidationIssue {
                issue_type: "WithheldExceedsAmount",
                date: date.clone(),
                kind: "income",
                amount: amount.clone(),
                message: format!(
                    "Tax withheld R{:.2} exceeds the income amount",
                    income.tax_withheld
                ),
            });
        }
        // Barter and sponsorship income is received in kind, so it should
        // carry a declared fair market value
        let in_kind = matches!(
            income.category,
            IncomeCategory::Barter | IncomeCategory::Sponsorship
        );
        if in_kind && income.value_type == ValueType::Monetary {
            issues.push(ValidationIssue {
                issue_type: "MissingFairMarketValue",
                date,
                kind: "income",
                amount,
                message: format!(
                    "{} income should be declared non_monetary with its fair market value",
                    income.category.as_str()
                ),
            });
        }
    }

    for expense in &records.expenses {
        if year.is_some_and(|y| !y.contains(expense.date)) {
            continue;
        }
        let date = expense.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", expense.amount);

        if expense.amount <= Decimal::ZERO {
            issues.push(ValidationIssue {
                issue_type: "NonPositiveAmount",
                date: date.clone(),
                kind: "expense",
                amount: amount.clone(),
                message: "Expense amount should be greater than zero".to_string(),
            });
        }
        if expense.vat_amount > expense.amount {
            issues.push(ValidationIssue {
                issue_type: "VatExceedsAmount",
                date: date.clone(),
                kind: "expense",
                amount: amount.clone(),
                message: format!(
                    "VAT portion R{:.2} exceeds the expense amount",
                    expense.vat_amount
                ),
            });
        }
        if expense.deductible && rule_for(&expense.category).is_none() {
            issues.push(ValidationIssue {
                issue_type: "UnknownCategory",
                date,
                kind: "expense",
                amount,
                message: format!(
                    "Category '{}' has no SARS deduction rule - needs manual review",
                    expense.category
                ),
            });
        }
    }

    issues
}
