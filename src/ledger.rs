//! Year-of-assessment aggregation over income and expense records.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::records::{Records, ValueType};
use crate::tax::{TaxYear, TaxYearConfig};

/// Totals for one tax year, summed exactly (no rounding until display)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearTotals {
    /// Cash and FMV income combined
    pub gross_income: Decimal,
    /// Monetary income only
    pub cash_income: Decimal,
    /// Fair market value of non-monetary income (barter, sponsorships)
    pub fmv_income: Decimal,
    /// Expenses flagged deductible
    pub deductible_expenses: Decimal,
    /// Non-deductible expenses, kept for reporting completeness
    pub other_expenses: Decimal,
    /// Tax already withheld at source
    pub tax_withheld: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

/// Sum records falling inside the year's inclusive window
/// (1 March to the last day of February).
pub fn year_totals(records: &Records, year: TaxYear) -> YearTotals {
    let mut totals = YearTotals::default();

    for income in records.incomes.iter().filter(|r| year.contains(r.date)) {
        totals.gross_income += income.amount;
        match income.value_type {
            ValueType::Monetary => totals.cash_income += income.amount,
            ValueType::NonMonetary => totals.fmv_income += income.amount,
        }
        totals.tax_withheld += income.tax_withheld;
        totals.income_count += 1;
    }

    for expense in records.expenses.iter().filter(|r| year.contains(r.date)) {
        if expense.deductible {
            totals.deductible_expenses += expense.amount;
        } else {
            totals.other_expenses += expense.amount;
        }
        totals.expense_count += 1;
    }

    totals
}

/// Deductible expense totals per category, largest first
pub fn expenses_by_category(records: &Records, year: TaxYear) -> Vec<(String, Decimal)> {
    let mut by_category: HashMap<String, Decimal> = HashMap::new();
    for expense in records
        .expenses
        .iter()
        .filter(|r| r.deductible && year.contains(r.date))
    {
        *by_category.entry(expense.category.clone()).or_default() += expense.amount;
    }

    let mut sorted: Vec<_> = by_category.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// How far year-to-date income has progressed toward the tax-free
/// threshold, as a percentage capped at 100.
pub fn threshold_progress(ytd_income: Decimal, config: &TaxYearConfig) -> Decimal {
    if config.tax_free_threshold.is_zero() {
        return dec!(100);
    }
    (ytd_income.max(Decimal::ZERO) / config.tax_free_threshold * dec!(100)).min(dec!(100))
}
