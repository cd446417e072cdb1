//! Records command - record-level view with filtering

use crate::cmd::read_records;
use crate::money::format_zar;
use crate::records::{Records, ValueType};
use crate::tax::TaxYear;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RecordsCommand {
    /// CSV or JSON file containing income and expense records
    #[arg(short, long)]
    records: PathBuf,

    /// Year of assessment to filter (e.g., 2026 for 2025/26)
    #[arg(short, long)]
    year: Option<i32>,

    /// Show only one kind of record
    #[arg(short, long, value_enum)]
    kind: Option<KindFilter>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindFilter {
    Income,
    Expense,
}

/// Row for the records table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
struct RecordRow {
    #[tabled(rename = "#")]
    #[serde(rename = "row_num")]
    row_num: usize,

    #[tabled(rename = "Date")]
    date: String,

    #[tabled(rename = "Tax Year")]
    tax_year: String,

    #[tabled(rename = "Kind")]
    kind: String,

    #[tabled(rename = "Category")]
    category: String,

    #[tabled(rename = "Source")]
    source: String,

    #[tabled(rename = "Amount")]
    amount: String,

    #[tabled(rename = "Flags")]
    flags: String,

    #[tabled(rename = "Description")]
    description: String,
}

impl RecordsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self.year.map(TaxYear);
        let records = read_records(&self.records)?;
        let rows = build_rows(&records, year, self.kind);

        if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
            Ok(())
        } else {
            if rows.is_empty() {
                println!("No records found matching filters");
                return Ok(());
            }
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
            Ok(())
        }
    }
}

fn build_rows(records: &Records, year: Option<TaxYear>, kind: Option<KindFilter>) -> Vec<RecordRow> {
    let mut rows = Vec::new();

    if !matches!(kind, Some(KindFilter::Expense)) {
        for income in &records.incomes {
            if year.is_some_and(|y| !y.contains(income.date)) {
                continue;
            }
            let mut flags = Vec::new();
            if !income.paid {
                flags.push("pending");
            }
            if income.value_type == ValueType::NonMonetary {
                flags.push("fmv");
            }
            rows.push(RecordRow {
                row_num: 0,
                date: income.date.format("%Y-%m-%d").to_string(),
                tax_year: TaxYear::from_date(income.date).display(),
                kind: "income".to_string(),
                category: income.category.as_str().to_string(),
                source: income
                    .platform
                    .clone()
                    .or_else(|| income.client.clone())
                    .unwrap_or_default(),
                amount: format_zar(income.amount),
                flags: flags.join(","),
                description: income.description.clone().unwrap_or_default(),
            });
        }
    }

    if !matches!(kind, Some(KindFilter::Income)) {
        for expense in &records.expenses {
            if year.is_some_and(|y| !y.contains(expense.date)) {
                continue;
            }
            rows.push(RecordRow {
                row_num: 0,
                date: expense.date.format("%Y-%m-%d").to_string(),
                tax_year: TaxYear::from_date(expense.date).display(),
                kind: "expense".to_string(),
                category: expense.category.clone(),
                source: String::new(),
                amount: format_zar(expense.amount),
                flags: if expense.deductible {
                    "deductible".to_string()
                } else {
                    String::new()
                },
                description: expense.description.clone().unwrap_or_default(),
            });
        }
    }

    rows.sort_by(|a, b| a.date.cmp(&b.date));
    for (i, row) in rows.iter_mut().enumerate() {
        row.row_num = i + 1;
    }
    rows
}
