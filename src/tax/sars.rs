use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::group_whole;

/// SA Tax Year (runs 1 March to the last day of February)
/// The year value represents the year of assessment, i.e. the end year
/// (e.g., 2026 = 2025/26 tax year ending 28 February 2026).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        // Tax year starts 1 March
        // If date is 1 March or later, it's in the tax year ending next February
        // If date is in January or February, it's in the tax year ending this February
        if date >= NaiveDate::from_ymd_opt(year, 3, 1).unwrap() {
            TaxYear(year + 1)
        } else {
            TaxYear(year)
        }
    }

    /// Start date of the tax year (1 March of previous year)
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0 - 1, 3, 1).unwrap()
    }

    /// End date of the tax year (last day of February, leap-aware)
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 3, 1)
            .unwrap()
            .pred_opt()
            .unwrap()
    }

    /// Inclusive containment test for the assessment window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Display as "2025/26" format
    pub fn display(&self) -> String {
        format!("{}/{}", self.0 - 1, self.0 % 100)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One marginal bracket: income above `lower` is taxed at `rate`, on top
/// of `base_tax`, the precomputed total tax owed at `lower`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBracket {
    pub lower: Decimal,
    /// Upper bound of the band; `None` marks the open-ended top bracket
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Human-readable band label, e.g. "R370,501 - R512,800 (31%)"
    pub fn label(&self) -> String {
        let pct = (self.rate * dec!(100)).normalize();
        match self.upper {
            Some(upper) => format!(
                "R{} - R{} ({}%)",
                group_whole(self.lower),
                group_whole(upper),
                pct
            ),
            None => format!("R{}+ ({}%)", group_whole(self.lower), pct),
        }
    }
}

/// Bracket table and thresholds for one year of assessment.
///
/// Brackets are ordered ascending by lower bound, contiguous, with exactly
/// one open-ended bracket in last position. `base_tax` values are the
/// published cumulative amounts, not derived at runtime.
#[derive(Debug, Clone)]
pub struct TaxYearConfig {
    pub year: TaxYear,
    /// Income at or below this owes no tax
    pub tax_free_threshold: Decimal,
    /// Turnover above this requires VAT registration
    pub vat_threshold: Decimal,
    /// Non-PAYE income above this suggests provisional registration
    pub provisional_tax_threshold: Decimal,
    pub brackets: Vec<TaxBracket>,
}

impl TaxYearConfig {
    /// Published tables for the given year of assessment.
    pub fn for_year(year: TaxYear) -> Self {
        match year.0 {
            // 2025/26 tables; prior and future years fall back to the same
            // rates until SARS publishes new ones
            _ => Self {
                year,
                tax_free_threshold: dec!(95750),
                vat_threshold: dec!(1000000),
                provisional_tax_threshold: dec!(30000),
                brackets: vec![
                    bracket(dec!(0), Some(dec!(95750)), dec!(0), dec!(0)),
                    bracket(dec!(95751), Some(dec!(237100)), dec!(0.18), dec!(0)),
                    bracket(dec!(237101), Some(dec!(370500)), dec!(0.26), dec!(25443)),
                    bracket(dec!(370501), Some(dec!(512800)), dec!(0.31), dec!(60127)),
                    bracket(dec!(512801), Some(dec!(673000)), dec!(0.36), dec!(104240)),
                    bracket(dec!(673001), Some(dec!(857900)), dec!(0.39), dec!(161952)),
                    bracket(dec!(857901), Some(dec!(1817000)), dec!(0.41), dec!(234074)),
                    bracket(dec!(1817001), None, dec!(0.45), dec!(627283)),
                ],
            },
        }
    }

    /// Label for the zero-rate band reported below the tax-free threshold
    pub fn zero_band_label(&self) -> String {
        format!("R0 - R{} (0%)", group_whole(self.tax_free_threshold))
    }
}

fn bracket(lower: Decimal, upper: Option<Decimal>, rate: Decimal, base_tax: Decimal) -> TaxBracket {
    TaxBracket {
        lower,
        upper,
        rate,
        base_tax,
    }
}
