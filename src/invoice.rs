//! Invoice model: line items, VAT treatment and numbering.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Standard VAT rate applied when the issuer is VAT-registered
pub const VAT_RATE: Decimal = dec!(0.15);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("invoice has no line items")]
    NoLineItems,
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("due date {due} is before invoice date {date}")]
    DueBeforeIssued { date: NaiveDate, due: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
}

/// One billable line: `quantity * rate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    pub description: String,
    #[schemars(with = "f64")]
    pub quantity: Decimal,
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl LineItem {
    pub fn amount(&self) -> Decimal {
        self.quantity * self.rate
    }
}

/// JSON input format for the invoice command
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceInput {
    /// Sequence number used to build the invoice number, e.g. 42 -> INV-2026-0042
    pub sequence: u32,
    /// Invoice date (YYYY-MM-DD)
    pub date: String,
    /// Due date (YYYY-MM-DD)
    pub due_date: String,
    pub client_name: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_vat_number: Option<String>,
    /// Whether the issuer is VAT-registered; VAT is only charged if so
    #[serde(default)]
    pub vat_registered: bool,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
    /// Issuer banking details shown on the rendered invoice
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub branch_code: Option<String>,
}

/// A validated invoice ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_vat_number: Option<String>,
    pub vat_registered: bool,
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub branch_code: Option<String>,
}

impl Invoice {
    pub fn subtotal(&self) -> Decimal {
        self.line_items.iter().map(LineItem::amount).sum()
    }

    /// VAT at 15%, charged only by VAT-registered issuers
    pub fn vat_amount(&self) -> Decimal {
        if self.vat_registered {
            self.subtotal() * VAT_RATE
        } else {
            Decimal::ZERO
        }
    }

    pub fn total(&self) -> Decimal {
        self.subtotal() + self.vat_amount()
    }
}

impl TryFrom<InvoiceInput> for Invoice {
    type Error = InvoiceError;

    fn try_from(input: InvoiceInput) -> Result<Self, Self::Error> {
        if input.line_items.is_empty() {
            return Err(InvoiceError::NoLineItems);
        }
        let date = parse_date(&input.date)?;
        let due_date = parse_date(&input.due_date)?;
        if due_date < date {
            return Err(InvoiceError::DueBeforeIssued {
                date,
                due: due_date,
            });
        }
        Ok(Invoice {
            number: invoice_number(date, input.sequence),
            date,
            due_date,
            client_name: input.client_name,
            client_email: input.client_email,
            client_vat_number: input.client_vat_number,
            vat_registered: input.vat_registered,
            status: input.status,
            line_items: input.line_items,
            bank_name: input.bank_name,
            account_number: input.account_number,
            branch_code: input.branch_code,
        })
    }
}

/// Invoice numbers follow `INV-<calendar year>-<zero-padded sequence>`
pub fn invoice_number(date: NaiveDate, sequence: u32) -> String {
    use chrono::Datelike;
    format!("INV-{}-{:04}", date.year(), sequence)
}

fn parse_date(s: &str) -> Result<NaiveDate, InvoiceError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| InvoiceError::InvalidDate(s.to_string()))
}

/// Read an invoice from its JSON input format
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Invoice> {
    let input: InvoiceInput = serde_json::from_reader(reader)?;
    Ok(Invoice::try_from(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> InvoiceInput {
        InvoiceInput {
            sequence: 42,
            date: "2025-11-05".to_string(),
            due_date: "2025-12-05".to_string(),
            client_name: "Acme Brands".to_string(),
            client_email: Some("billing@acme.example".to_string()),
            client_vat_number: None,
            vat_registered: false,
            status: InvoiceStatus::Draft,
            line_items: vec![
                LineItem {
                    description: "Sponsored post".to_string(),
                    quantity: dec!(2),
                    rate: dec!(3500),
                },
                LineItem {
                    description: "Story series".to_string(),
                    quantity: dec!(1),
                    rate: dec!(2100),
                },
            ],
            bank_name: None,
            account_number: None,
            branch_code: None,
        }
    }

    #[test]
    fn totals_without_vat_registration() {
        let invoice = Invoice::try_from(sample_input()).unwrap();
        assert_eq!(invoice.subtotal(), dec!(9100));
        assert_eq!(invoice.vat_amount(), dec!(0));
        assert_eq!(invoice.total(), dec!(9100));
    }

    #[test]
    fn vat_added_when_registered() {
        let mut input = sample_input();
        input.vat_registered = true;
        let invoice = Invoice::try_from(input).unwrap();
        assert_eq!(invoice.vat_amount(), dec!(1365.00));
        assert_eq!(invoice.total(), dec!(10465.00));
    }

    #[test]
    fn invoice_number_format() {
        let invoice = Invoice::try_from(sample_input()).unwrap();
        assert_eq!(invoice.number, "INV-2025-0042");
    }

    #[test]
    fn empty_line_items_rejected() {
        let mut input = sample_input();
        input.line_items.clear();
        assert_eq!(
            Invoice::try_from(input).unwrap_err(),
            InvoiceError::NoLineItems
        );
    }

    #[test]
    fn due_date_must_not_precede_invoice_date() {
        let mut input = sample_input();
        input.due_date = "2025-10-01".to_string();
        assert!(matches!(
            Invoice::try_from(input).unwrap_err(),
            InvoiceError::DueBeforeIssued { .. }
        ));
    }
}
