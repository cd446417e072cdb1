//! Report command - full tax assessment for one year of assessment

use crate::cmd::read_records;
use crate::ledger::year_totals;
use crate::money::{format_zar, format_zar_signed, group_decimal};
use crate::tax::{compute_tax, TaxYear, TaxYearConfig};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// CSV or JSON file containing income and expense records
    #[arg(short, long)]
    records: PathBuf,

    /// Year of assessment to report (e.g., 2026 for 2025/26)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as CSV instead of formatted text
    #[arg(long)]
    csv: bool,
}

/// Flat CSV row mirroring the printed report
#[derive(Debug, Serialize)]
struct ReportRow {
    tax_year: String,
    gross_income: String,
    deductible_expenses: String,
    taxable_income: String,
    tax_bracket: String,
    estimated_tax: String,
    effective_rate_pct: String,
    provisional_first_payment: String,
    provisional_second_payment: String,
    tax_withheld: String,
    balance_payable: String,
}

impl ReportCommand {
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

        log::info!(
            "assessment {}: gross {} deductions {} tax {}",
            year,
            totals.gross_income,
            totals.deductible_expenses,
            assessment.estimated_tax
        );

        if self.csv {
            let row = ReportRow {
                tax_year: year.display(),
                gross_income: format!("{:.2}", totals.gross_income),
                deductible_expenses: format!("{:.2}", totals.deductible_expenses),
                taxable_income: format!("{:.2}", assessment.taxable_income),
                tax_bracket: assessment.bracket_label.clone(),
                estimated_tax: format!("{:.2}", assessment.estimated_tax),
                effective_rate_pct: format!("{:.2}", assessment.effective_rate),
                provisional_first_payment: format!("{:.2}", assessment.provisional_first_payment),
                provisional_second_payment: format!("{:.2}", assessment.provisional_second_payment),
                tax_withheld: format!("{:.2}", totals.tax_withheld),
                balance_payable: format!("{:.2}", balance),
            };
            let mut wtr = csv::Writer::from_writer(io::stdout());
            wtr.serialize(row)?;
            wtr.flush()?;
            return Ok(());
        }

        println!("╔══════════════════════════════════════════════════════════════════════════════╗");
        println!("║                      SARS TAX ASSESSMENT ({:^10})                        ║", year.display());
        println!("╠══════════════════════════════════════════════════════════════════════════════╣");
        println!("║  INCOME                                                                      ║");
        println!("╟──────────────────────────────────────────────────────────────────────────────╢");
        println!("║  Gross Income:             {:>16}                                  ║", format_zar(totals.gross_income));
        println!("║    Cash Income:            {:>16}                                  ║", format_zar(totals.cash_income));
        println!("║    Non-Monetary (FMV):     {:>16}                                  ║", format_zar(totals.fmv_income));
        println!("║  Deductible Expenses:      {:>16}                                  ║", format_zar(totals.deductible_expenses));
        println!("║  Taxable Income:           {:>16}                                  ║", format_zar(assessment.taxable_income));
        println!("╠══════════════════════════════════════════════════════════════════════════════╣");
        println!("║  TAX                                                                         ║");
        println!("╟──────────────────────────────────────────────────────────────────────────────╢");
        println!("║  Tax Bracket:   {:>40}                       ║", assessment.bracket_label);
        println!("║  Estimated Tax:            {:>16}                                  ║", format_zar(assessment.estimated_tax));
        println!("║  Effective Rate:           {:>15}%                                  ║", group_decimal(assessment.effective_rate));
        println!("╠══════════════════════════════════════════════════════════════════════════════╣");
        println!("║  PROVISIONAL TAX                                                             ║");
        println!("╟──────────────────────────────────────────────────────────────────────────────╢");
        println!("║  1st Payment (due 31 Aug): {:>16}                                  ║", format_zar(assessment.provisional_first_payment));
        println!("║  2nd Payment (due 28 Feb): {:>16}                                  ║", format_zar(assessment.provisional_second_payment));
        println!("╟──────────────────────────────────────────────────────────────────────────────╢");
        println!("║  Tax Withheld at Source:   {:>16}                                  ║", format_zar(totals.tax_withheld));
        println!("║  Balance Payable:          {:>16}                                  ║", format_zar_signed(balance));
        println!("╚══════════════════════════════════════════════════════════════════════════════╝");

        Ok(())
    }
}
