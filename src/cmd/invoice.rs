//! Invoice command - render an invoice from its JSON input

use crate::invoice::{self, Invoice, InvoiceStatus};
use crate::money::format_zar;
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InvoiceCommand {
    /// JSON file describing the invoice
    #[arg(short, long)]
    invoice: PathBuf,

    /// Output line items as CSV instead of the printable document
    #[arg(long)]
    csv: bool,
}

/// CSV row per line item, with totals in the trailing rows
#[derive(Debug, Serialize)]
struct LineItemRow {
    invoice_number: String,
    description: String,
    quantity: String,
    rate: String,
    amount: String,
}

impl InvoiceCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let file = File::open(&self.invoice)?;
        let invoice = invoice::read_json(BufReader::new(file))?;

        if self.csv {
            self.write_csv(&invoice)
        } else {
            self.print_document(&invoice);
            Ok(())
        }
    }

    fn write_csv(&self, invoice: &Invoice) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for item in &invoice.line_items {
            wtr.serialize(LineItemRow {
                invoice_number: invoice.number.clone(),
                description: item.description.clone(),
                quantity: format!("{}", item.quantity.normalize()),
                rate: format!("{:.2}", item.rate),
                amount: format!("{:.2}", item.amount()),
            })?;
        }
        wtr.serialize(LineItemRow {
            invoice_number: invoice.number.clone(),
            description: "SUBTOTAL".to_string(),
            quantity: String::new(),
            rate: String::new(),
            amount: format!("{:.2}", invoice.subtotal()),
        })?;
        wtr.serialize(LineItemRow {
            invoice_number: invoice.number.clone(),
            description: "VAT (15%)".to_string(),
            quantity: String::new(),
            rate: String::new(),
            amount: format!("{:.2}", invoice.vat_amount()),
        })?;
        wtr.serialize(LineItemRow {
            invoice_number: invoice.number.clone(),
            description: "TOTAL".to_string(),
            quantity: String::new(),
            rate: String::new(),
            amount: format!("{:.2}", invoice.total()),
        })?;
        wtr.flush()?;
        Ok(())
    }

    fn print_document(&self, invoice: &Invoice) {
        println!();
        println!("INVOICE {}", invoice.number);
        println!("{}", "=".repeat(62));
        println!("Date:     {}", invoice.date.format("%Y-%m-%d"));
        println!("Due:      {}", invoice.due_date.format("%Y-%m-%d"));
        println!("Status:   {}", status_label(invoice.status));
        println!();
        println!("Billed to: {}", invoice.client_name);
        if let Some(email) = &invoice.client_email {
            println!("           {}", email);
        }
        if let Some(vat) = &invoice.client_vat_number {
            println!("           VAT {}", vat);
        }
        println!();
        println!("{:<36} {:>6} {:>12} {:>12}", "Description", "Qty", "Rate", "Amount");
        println!("{}", "-".repeat(70));
        for item in &invoice.line_items {
            println!(
                "{:<36} {:>6} {:>12} {:>12}",
                item.description,
                item.quantity.normalize(),
                format_zar(item.rate),
                format_zar(item.amount())
            );
        }
        println!("{}", "-".repeat(70));
        println!("{:>56} {:>12}", "Subtotal:", format_zar(invoice.subtotal()));
        if invoice.vat_registered {
            println!("{:>56} {:>12}", "VAT (15%):", format_zar(invoice.vat_amount()));
        }
        println!("{:>56} {:>12}", "TOTAL DUE:", format_zar(invoice.total()));
        println!();
        if invoice.bank_name.is_some() {
            println!("Payment details:");
            if let Some(bank) = &invoice.bank_name {
                println!("  Bank:           {}", bank);
            }
            if let Some(account) = &invoice.account_number {
                println!("  Account:        {}", account);
            }
            if let Some(branch) = &invoice.branch_code {
                println!("  Branch code:    {}", branch);
            }
            println!();
        }
    }
}

fn status_label(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => "Draft",
        InvoiceStatus::Sent => "Sent",
        InvoiceStatus::Paid => "Paid",
    }
}
