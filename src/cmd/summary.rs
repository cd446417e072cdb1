//! Summary command - aggregated totals, threshold progress and compliance

use crate::cmd::read_records;
use crate::ledger::{expenses_by_category, threshold_progress, year_totals};
use crate::money::{format_zar, group_decimal};
use crate::tax::{classify, compute_tax, RegistrationState, Severity, TaxYear, TaxYearConfig};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// CSV or JSON file containing income and expense records
    #[arg(short, long)]
    records: PathBuf,

    /// Year of assessment to report (e.g., 2026 for 2025/26)
    #[arg(short, long)]
    year: Option<i32>,

    /// SARS income tax reference number, if registered
    #[arg(long)]
    tax_number: Option<String>,

    /// VAT registration number, if registered
    #[arg(long)]
    vat_number: Option<String>,

    /// Registered as a provisional taxpayer
    #[arg(long)]
    provisional: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    tax_year: String,
    income: IncomeSummary,
    tax: TaxSummary,
    compliance: ComplianceSummary,
}

#[derive(Debug, Serialize)]
struct IncomeSummary {
    record_count: usize,
    gross_income: String,
    cash_income: String,
    fmv_income: String,
    deductible_expenses: String,
    threshold_progress_pct: String,
    top_expense_categories: Vec<CategoryTotal>,
}

#[derive(Debug, Serialize)]
struct CategoryTotal {
    category: String,
    total: String,
}

#[derive(Debug, Serialize)]
struct TaxSummary {
    taxable_income: String,
    estimated_tax: String,
    tax_bracket: String,
    effective_rate_pct: String,
    provisional_first_payment: String,
    provisional_second_payment: String,
}

#[derive(Debug, Serialize)]
struct ComplianceSummary {
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self
            .year
            .map(TaxYear)
            .unwrap_or_else(|| TaxYear::from_date(Utc::now().date_naive()));
        let config = TaxYearConfig::for_year(year);
        let records = read_records(&self.records)?;

        let totals = year_totals(&records, year);
        let assessment = compute_tax(totals.gross_income, totals.deductible_expenses, &config);
        let state = RegistrationState {
            has_tax_number: self.tax_number.is_some(),
            has_vat_number: self.vat_number.is_some(),
            provisional_registered: self.provisional,
        };
        let status = classify(&state, totals.gross_income, &config);
        let progress = threshold_progress(totals.gross_income, &config);
        let by_category = expenses_by_category(&records, year);

        if self.json {
            let data = SummaryData {
                tax_year: year.display(),
                income: IncomeSummary {
                    record_count: totals.income_count + totals.expense_count,
                    gross_income: format!("{:.2}", totals.gross_income),
                    cash_income: format!("{:.2}", totals.cash_income),
                    fmv_income: format!("{:.2}", totals.fmv_income),
                    deductible_expenses: format!("{:.2}", totals.deductible_expenses),
                    threshold_progress_pct: format!("{:.1}", progress),
                    top_expense_categories: by_category
                        .iter()
                        .map(|(category, total)| CategoryTotal {
                            category: category.clone(),
                            total: format!("{:.2}", total),
                        })
                        .collect(),
                },
                tax: TaxSummary {
                    taxable_income: format!("{:.2}", assessment.taxable_income),
                    estimated_tax: format!("{:.2}", assessment.estimated_tax),
                    tax_bracket: assessment.bracket_label.clone(),
                    effective_rate_pct: format!("{:.2}", assessment.effective_rate),
                    provisional_first_payment: format!(
                        "{:.2}",
                        assessment.provisional_first_payment
                    ),
                    provisional_second_payment: format!(
                        "{:.2}",
                        assessment.provisional_second_payment
                    ),
                },
                compliance: ComplianceSummary {
                    severity: status.severity,
                    message: status.message,
                    action: status.action,
                },
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!("TAX SUMMARY ({})", year.display());
        println!();

        println!("INCOME");
        println!("  Records: {} income, {} expense", totals.income_count, totals.expense_count);
        println!(
            "  Gross: {} (cash {}, FMV {})",
            format_zar(totals.gross_income),
            format_zar(totals.cash_income),
            format_zar(totals.fmv_income)
        );
        println!("  Deductible Expenses: {}", format_zar(totals.deductible_expenses));
        println!(
            "  Tax Threshold Progress: {}% of {}",
            progress.round_dp(1),
            format_zar(config.tax_free_threshold)
        );
        println!();

        if !by_category.is_empty() {
            println!("TOP DEDUCTIONS");
            for (category, total) in by_category.iter().take(5) {
                println!("  {:32} {}", category, format_zar(*total));
            }
            println!();
        }

        println!("TAX");
        println!("  Taxable Income: {}", format_zar(assessment.taxable_income));
        println!(
            "  Estimated Tax: {} (effective {}%)",
            format_zar(assessment.estimated_tax),
            group_decimal(assessment.effective_rate)
        );
        println!("  Bracket: {}", assessment.bracket_label);
        println!(
            "  Provisional: {} + {}",
            format_zar(assessment.provisional_first_payment),
            format_zar(assessment.provisional_second_payment)
        );
        println!();

        println!("COMPLIANCE");
        println!("  [{}] {}", severity_tag(status.severity), status.message);
        if let Some(action) = &status.action {
            println!("  Next step: {}", action);
        }
        println!();

        Ok(())
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "OK",
        Severity::Warning => "WARN",
        Severity::Urgent => "URGENT",
        Severity::Critical => "CRITICAL",
    }
}
