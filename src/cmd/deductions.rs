//! Deductions command - per-expense deductibility analysis

use crate::cmd::read_records;
use crate::deductions::{analyze, suggest_category};
use crate::money::format_zar;
use crate::tax::TaxYear;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct DeductionsCommand {
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

#[derive(Debug, Serialize)]
struct DeductionLine {
    date: String,
    category: String,
    section: String,
    amount: String,
    claimable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    annual_writeoff: Option<String>,
    recognised: bool,
    /// For unrecognised categories, the closest standard one
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_category: Option<&'static str>,
    reasoning: String,
    warnings: Vec<String>,
    documentation: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct DeductionsOutput {
    tax_year: String,
    expense_total: String,
    claimable_total: String,
    lines: Vec<DeductionLine>,
}

impl DeductionsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_records(&self.records)?;
        let year = self.year.map(TaxYear);

        let mut lines = Vec::new();
        let mut expense_total = Decimal::ZERO;
        let mut claimable_total = Decimal::ZERO;

        for expense in records
            .expenses
            .iter()
            .filter(|e| e.deductible && year.is_none_or(|y| y.contains(e.date)))
        {
            let assessment = analyze(expense.amount, &expense.category);
            expense_total += expense.amount;
            claimable_total += assessment.capped_amount;

            let suggested_category = if assessment.recognised {
                None
            } else {
                Some(suggest_category(
                    expense.description.as_deref().unwrap_or(&expense.category),
                ))
            };

            lines.push(DeductionLine {
                date: expense.date.format("%Y-%m-%d").to_string(),
                category: expense.category.clone(),
                section: assessment.section,
                amount: format!("{:.2}", expense.amount),
                claimable: format!("{:.2}", assessment.capped_amount),
                annual_writeoff: assessment
                    .annual_writeoff
                    .map(|w| format!("{:.2}", w)),
                recognised: assessment.recognised,
                suggested_category,
                reasoning: assessment.reasoning,
                warnings: assessment.warnings,
                documentation: assessment.documentation,
            });
        }

        if self.json {
            let output = DeductionsOutput {
                tax_year: year.map_or("All Years".to_string(), |y| y.display()),
                expense_total: format!("{:.2}", expense_total),
                claimable_total: format!("{:.2}", claimable_total),
                lines,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let year_str = year.map_or("All Years".to_string(), |y| y.display());
        println!();
        println!("DEDUCTION ANALYSIS ({})", year_str);
        println!();

        if lines.is_empty() {
            println!("No deductible expenses found.");
            return Ok(());
        }

        for line in &lines {
            println!(
                "  {} {:32} s{:6} R{:>12} -> claimable R{:>12}",
                line.date, line.category, line.section, line.amount, line.claimable
            );
            if let Some(writeoff) = &line.annual_writeoff {
                println!("     wear-and-tear: R{} per year", writeoff);
            }
            for warning in &line.warnings {
                println!("     \u{26A0} {}", warning);
            }
            if let Some(suggested) = line.suggested_category {
                println!("     consider re-filing under '{}'", suggested);
            }
            println!("     keep: {}", line.documentation.join(", "));
        }
        println!();
        println!(
            "  Claimed {} of {} in deductible expenses",
            format_zar(claimable_total),
            format_zar(expense_total)
        );
        println!();

        Ok(())
    }
}
