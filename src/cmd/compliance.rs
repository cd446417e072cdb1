//! Compliance command - single prioritized status for scripts and humans

use crate::cmd::read_records;
use crate::ledger::year_totals;
use crate::money::format_zar;
use crate::tax::{classify, RegistrationState, Severity, TaxYear, TaxYearConfig};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ComplianceCommand {
    /// CSV or JSON file containing income and expense records
    #[arg(short, long)]
    records: PathBuf,

    /// Year of assessment (e.g., 2026 for 2025/26)
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

/// JSON output structure
#[derive(Debug, Serialize)]
struct ComplianceOutput {
    tax_year: String,
    ytd_income: String,
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl ComplianceCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self
            .year
            .map(TaxYear)
            .unwrap_or_else(|| TaxYear::from_date(Utc::now().date_naive()));
        let config = TaxYearConfig::for_year(year);
        let records = read_records(&self.records)?;

        let totals = year_totals(&records, year);
        let state = RegistrationState {
            has_tax_number: self.tax_number.is_some(),
            has_vat_number: self.vat_number.is_some(),
            provisional_registered: self.provisional,
        };
        let status = classify(&state, totals.gross_income, &config);

        if self.json {
            let output = ComplianceOutput {
                tax_year: year.display(),
                ytd_income: format!("{:.2}", totals.gross_income),
                severity: status.severity,
                message: status.message.clone(),
                action: status.action.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!();
            println!("COMPLIANCE STATUS ({})", year.display());
            println!();
            println!("  YTD Income: {}", format_zar(totals.gross_income));
            println!("  [{:?}] {}", status.severity, status.message);
            if let Some(action) = &status.action {
                println!("  Next step: {}", action);
            }
            println!();
        }

        // Exit with code 1 when registration action is overdue
        if matches!(status.severity, Severity::Urgent | Severity::Critical) {
            std::process::exit(1);
        }
        Ok(())
    }
}
