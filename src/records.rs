//! Income and expense records and their CSV/JSON input formats.

use chrono::NaiveDate;
use gigtax_derive::CsvSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid record kind: {0} (expected income or expense)")]
    InvalidKind(String),
    #[error("invalid income category: {0} (expected eft, cash, barter or sponsorship)")]
    InvalidIncomeCategory(String),
    #[error("invalid value type: {0} (expected monetary or non_monetary)")]
    InvalidValueType(String),
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Unified JSON input format
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GigInput {
    #[serde(default)]
    pub tax_year: Option<String>,
    pub records: Vec<RecordInput>,
}

/// How an income payment arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeCategory {
    Eft,
    Cash,
    /// Goods or services received in exchange, declared at fair market value
    Barter,
    Sponsorship,
}

impl IncomeCategory {
    fn parse(s: &str) -> Result<Self, RecordError> {
        match s.to_lowercase().as_str() {
            "eft" => Ok(IncomeCategory::Eft),
            "cash" => Ok(IncomeCategory::Cash),
            "barter" => Ok(IncomeCategory::Barter),
            "sponsorship" => Ok(IncomeCategory::Sponsorship),
            _ => Err(RecordError::InvalidIncomeCategory(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeCategory::Eft => "eft",
            IncomeCategory::Cash => "cash",
            IncomeCategory::Barter => "barter",
            IncomeCategory::Sponsorship => "sponsorship",
        }
    }
}

/// Whether the amount is money received or the fair market value of
/// goods/services received in kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Monetary,
    NonMonetary,
}

impl ValueType {
    fn parse(s: &str) -> Result<Self, RecordError> {
        match s.to_lowercase().as_str() {
            "monetary" => Ok(ValueType::Monetary),
            "non_monetary" | "non-monetary" => Ok(ValueType::NonMonetary),
            _ => Err(RecordError::InvalidValueType(s.to_string())),
        }
    }
}

/// A single income entry
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    pub date: NaiveDate,
    /// Rand amount; for non-monetary income this is the declared FMV
    pub amount: Decimal,
    pub category: IncomeCategory,
    pub platform: Option<String>,
    pub client: Option<String>,
    pub paid: bool,
    pub tax_withheld: Decimal,
    pub value_type: ValueType,
    pub description: Option<String>,
}

/// A single expense entry
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub amount: Decimal,
    /// Free-text category; recognised SARS categories get deduction rules
    pub category: String,
    pub deductible: bool,
    pub vat_amount: Decimal,
    pub description: Option<String>,
}

/// All records from one input file, split by kind and sorted by date
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub incomes: Vec<IncomeRecord>,
    pub expenses: Vec<ExpenseRecord>,
}

impl Records {
    pub fn from_inputs(inputs: Vec<RecordInput>) -> Result<Self, RecordError> {
        let mut records = Records::default();
        for input in inputs {
            match input.kind.to_lowercase().as_str() {
                "income" => records.incomes.push(input.into_income()?),
                "expense" => records.expenses.push(input.into_expense()?),
                other => return Err(RecordError::InvalidKind(other.to_string())),
            }
        }
        records.incomes.sort_by_key(|r| r.date);
        records.expenses.sort_by_key(|r| r.date);
        Ok(records)
    }
}

/// CSV column metadata produced by the `CsvSchema` derive
#[derive(Debug, Clone, Copy)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One row of the records input (CSV row or JSON array element)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct RecordInput {
    /// Record kind: income or expense
    pub kind: String,
    /// Record date (YYYY-MM-DD)
    pub date: String,
    /// Amount in rand; fair market value for non-monetary income
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Income category (eft, cash, barter, sponsorship) or expense category
    pub category: String,
    /// Platform the income came from (income only)
    #[serde(default)]
    pub platform: Option<String>,
    /// Client or brand paying (income only)
    #[serde(default)]
    pub client: Option<String>,
    /// Whether the income has been paid out; defaults to true
    #[serde(default)]
    pub paid: Option<bool>,
    /// Tax already withheld at source (income only)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub tax_withheld: Option<Decimal>,
    /// monetary or non_monetary; defaults to monetary
    #[serde(default)]
    pub value_type: Option<String>,
    /// Whether the expense is claimed as deductible; defaults to true
    #[serde(default)]
    pub deductible: Option<bool>,
    /// VAT portion of the expense amount
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub vat_amount: Option<Decimal>,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl RecordInput {
    fn parse_date(&self) -> Result<NaiveDate, RecordError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| RecordError::InvalidDate(self.date.clone()))
    }

    fn into_income(self) -> Result<IncomeRecord, RecordError> {
        let date = self.parse_date()?;
        let value_type = match &self.value_type {
            Some(raw) => ValueType::parse(raw)?,
            None => ValueType::default(),
        };
        Ok(IncomeRecord {
            date,
            amount: self.amount,
            category: IncomeCategory::parse(&self.category)?,
            platform: self.platform,
            client: self.client,
            paid: self.paid.unwrap_or(true),
            tax_withheld: self.tax_withheld.unwrap_or(Decimal::ZERO),
            value_type,
            description: self.description,
        })
    }

    fn into_expense(self) -> Result<ExpenseRecord, RecordError> {
        let date = self.parse_date()?;
        Ok(ExpenseRecord {
            date,
            amount: self.amount,
            category: self.category,
            deductible: self.deductible.unwrap_or(true),
            vat_amount: self.vat_amount.unwrap_or(Decimal::ZERO),
            description: self.description,
        })
    }
}

/// Read records from CSV
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Records> {
    let mut rdr = csv::Reader::from_reader(reader);
    let inputs: Result<Vec<RecordInput>, _> = rdr.deserialize::<RecordInput>().collect();
    let records = Records::from_inputs(inputs?)?;
    log::info!(
        "read {} income and {} expense records",
        records.incomes.len(),
        records.expenses.len()
    );
    Ok(records)
}

/// Read records from the JSON envelope
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Records> {
    let input: GigInput = serde_json::from_reader(reader)?;
    let records = Records::from_inputs(input.records)?;
    log::info!(
        "read {} income and {} expense records",
        records.incomes.len(),
        records.expenses.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_csv_records() {
        let csv_data = "\
kind,date,amount,category,platform,client,paid,tax_withheld,value_type,deductible,vat_amount,description
income,2025-06-15,4500.00,eft,Instagram,Acme Brands,true,0,monetary,,,Sponsored post
income,2025-07-01,2500.00,barter,TikTok,GadgetCo,true,0,non_monetary,,,Phone received for review
expense,2025-06-20,899.00,Data & Airtime,,,,,,true,117.26,Monthly fibre
expense,2025-05-10,15000.00,Equipment & Software,,,,,,false,,Camera body";

        let records = read_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(records.incomes.len(), 2);
        assert_eq!(records.expenses.len(), 2);

        let income = &records.incomes[0];
        assert_eq!(income.date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(income.amount, dec!(4500.00));
        assert_eq!(income.category, IncomeCategory::Eft);
        assert_eq!(income.platform.as_deref(), Some("Instagram"));
        assert_eq!(income.value_type, ValueType::Monetary);

        let barter = &records.incomes[1];
        assert_eq!(barter.category, IncomeCategory::Barter);
        assert_eq!(barter.value_type, ValueType::NonMonetary);

        // Expenses are sorted by date, so the camera comes first
        let camera = &records.expenses[0];
        assert_eq!(camera.category, "Equipment & Software");
        assert!(!camera.deductible);
        assert_eq!(camera.vat_amount, dec!(0));

        let fibre = &records.expenses[1];
        assert!(fibre.deductible);
        assert_eq!(fibre.vat_amount, dec!(117.26));
    }

    #[test]
    fn parse_json_envelope() {
        let json_data = r#"{
            "tax_year": "2025/26",
            "records": [
                {
                    "kind": "income",
                    "date": "2025-04-12",
                    "amount": 12000,
                    "category": "eft",
                    "client": "Direct client"
                },
                {
                    "kind": "expense",
                    "date": "2025-04-15",
                    "amount": 450.50,
                    "category": "Bank Charges"
                }
            ]
        }"#;

        let records = read_json(json_data.as_bytes()).unwrap();
        assert_eq!(records.incomes.len(), 1);
        assert_eq!(records.expenses.len(), 1);
        // Defaults: paid, deductible, monetary, zero withheld
        assert!(records.incomes[0].paid);
        assert_eq!(records.incomes[0].tax_withheld, dec!(0));
        assert!(records.expenses[0].deductible);
    }

    #[test]
    fn records_sorted_by_date() {
        let json_data = r#"{
            "records": [
                {"kind": "income", "date": "2025-09-01", "amount": 100, "category": "cash"},
                {"kind": "income", "date": "2025-03-01", "amount": 200, "category": "cash"}
            ]
        }"#;

        let records = read_json(json_data.as_bytes()).unwrap();
        assert_eq!(records.incomes[0].amount, dec!(200));
        assert_eq!(records.incomes[1].amount, dec!(100));
    }

    #[test]
    fn invalid_kind_is_rejected() {
        let inputs = vec![RecordInput {
            kind: "transfer".to_string(),
            date: "2025-05-01".to_string(),
            amount: dec!(100),
            category: "eft".to_string(),
            platform: None,
            client: None,
            paid: None,
            tax_withheld: None,
            value_type: None,
            deductible: None,
            vat_amount: None,
            description: None,
        }];
        let err = Records::from_inputs(inputs).unwrap_err();
        assert_eq!(err, RecordError::InvalidKind("transfer".to_string()));
    }

    #[test]
    fn invalid_income_category_is_rejected() {
        let inputs = vec![RecordInput {
            kind: "income".to_string(),
            date: "2025-05-01".to_string(),
            amount: dec!(100),
            category: "crypto".to_string(),
            platform: None,
            client: None,
            paid: None,
            tax_withheld: None,
            value_type: None,
            deductible: None,
            vat_amount: None,
            description: None,
        }];
        let err = Records::from_inputs(inputs).unwrap_err();
        assert_eq!(err, RecordError::InvalidIncomeCategory("crypto".to_string()));
    }

    #[test]
    fn csv_schema_reports_required_columns() {
        let schema = RecordInput::csv_schema();
        let kind = schema.iter().find(|f| f.name == "kind").unwrap();
        assert!(kind.required);
        let platform = schema.iter().find(|f| f.name == "platform").unwrap();
        assert!(!platform.required);
    }
}
