//! Export command - sectioned SARS filing report as CSV

use crate::cmd::read_records;
use crate::ledger::{expenses_by_category, year_totals};
use crate::records::ValueType;
use crate::tax::{compute_tax, TaxYear, TaxYearConfig};
use chrono::Utc;
use clap::Args;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// CSV or JSON file containing income and expense records
    #[arg(short, long)]
    records: PathBuf,

    /// Year of assessment to export (e.g., 2026 for 2025/26)
    #[arg(short, long)]
    year: Option<i32>,

    /// Taxpayer full name for the report header
    #[arg(long)]
    taxpayer: String,

    /// Taxpayer email address
    #[arg(long)]
    email: Option<String>,

    /// South African ID number
    #[arg(long)]
    id_number: Option<String>,

    /// SARS income tax reference number
    #[arg(long)]
    tax_number: Option<String>,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self
            .year
            .map(TaxYear)
            .unwrap_or_else(|| TaxYear::from_date(Utc::now().date_naive()));
        let config = TaxYearConfig::for_year(year);
        let records = read_records(&self.records)?;

        let totals = year_totals(&records, year);
        let assessment = compute_tax(totals.gross_income, totals.deductible_expenses, &config);
        let balance = assessment.estimated_tax - totals.tax_withheld;

        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(io::stdout());

        // Header section
        wtr.write_record([format!("SARS TAX REPORT - {}", year.display())])?;
        wtr.write_record([format!(
            "Generated: {}",
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        )])?;
        wtr.write_record([format!("Taxpayer: {}", self.taxpayer)])?;
        if let Some(email) = &self.email {
            wtr.write_record([format!("Email: {}", email)])?;
        }
        if let Some(id_number) = &self.id_number {
            wtr.write_record([format!("ID Number: {}", id_number)])?;
        }
        if let Some(tax_number) = &self.tax_number {
            wtr.write_record([format!("Tax Number: {}", tax_number)])?;
        }
        wtr.write_record([""])?;

        // Income summary
        wtr.write_record(["INCOME SUMMARY"])?;
        let summary_rows = [
            ("Total Cash Income", format!("{:.2}", totals.cash_income)),
            ("Total FMV Income", format!("{:.2}", totals.fmv_income)),
            ("Total Gross Income", format!("{:.2}", totals.gross_income)),
            (
                "Total Deductible Expenses",
                format!("{:.2}", totals.deductible_expenses),
            ),
            ("Taxable Income", format!("{:.2}", assessment.taxable_income)),
            ("Estimated Tax", format!("{:.2}", assessment.estimated_tax)),
            (
                "Effective Tax Rate",
                format!("{:.2}%", assessment.effective_rate),
            ),
            ("Tax Withheld", format!("{:.2}", totals.tax_withheld)),
            ("Balance Payable", format!("{:.2}", balance)),
        ];
        for (label, value) in summary_rows {
            wtr.write_record([label.to_string(), value])?;
        }
        wtr.write_record([""])?;

        // Income records
        wtr.write_record(["INCOME RECORDS"])?;
        wtr.write_record([
            "Date",
            "Amount (ZAR)",
            "Platform",
            "Client",
            "Category",
            "Status",
            "Value Type",
            "Tax Withheld",
            "Description",
        ])?;
        for income in records.incomes.iter().filter(|r| year.contains(r.date)) {
            wtr.write_record([
                income.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", income.amount),
                income.platform.clone().unwrap_or_default(),
                income.client.clone().unwrap_or_default(),
                income.category.as_str().to_string(),
                if income.paid { "Paid" } else { "Pending" }.to_string(),
                match income.value_type {
                    ValueType::Monetary => "monetary",
                    ValueType::NonMonetary => "non_monetary",
                }
                .to_string(),
                format!("{:.2}", income.tax_withheld),
                income.description.clone().unwrap_or_default(),
            ])?;
        }
        wtr.write_record([""])?;

        // Expense records
        wtr.write_record(["EXPENSE RECORDS"])?;
        wtr.write_record([
            "Date",
            "Amount (ZAR)",
            "Category",
            "Deductible",
            "VAT Amount",
            "Description",
        ])?;
        for expense in records.expenses.iter().filter(|r| year.contains(r.date)) {
            wtr.write_record([
                expense.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", expense.amount),
                expense.category.clone(),
                if expense.deductible { "Yes" } else { "No" }.to_string(),
                format!("{:.2}", expense.vat_amount),
                expense.description.clone().unwrap_or_default(),
            ])?;
        }
        wtr.write_record([""])?;

        // Deductible totals per category, largest first
        wtr.write_record(["DEDUCTIBLE EXPENSES BY CATEGORY"])?;
        wtr.write_record(["Category", "Total Amount (ZAR)"])?;
        for (category, total) in expenses_by_category(&records, year) {
            wtr.write_record([category, format!("{:.2}", total)])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
