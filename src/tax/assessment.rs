use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::tax::sars::TaxYearConfig;

/// SARS income tax estimate for one year of assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxAssessment {
    pub taxable_income: Decimal,
    pub estimated_tax: Decimal,
    /// Label of the marginal bracket the income lands in
    pub bracket_label: String,
    /// Effective rate as a percentage (full precision; round at display)
    pub effective_rate: Decimal,
    /// First provisional installment, due end of August
    pub provisional_first_payment: Decimal,
    /// Second provisional installment, due end of February
    pub provisional_second_payment: Decimal,
}

/// Estimate annual tax from gross income and total deductions.
///
/// Negative inputs are clamped to zero so that bad upstream sums degrade
/// to a nil assessment instead of failing a report run. Income at or
/// below the tax-free threshold short-circuits to a zero result without
/// consulting the bracket table.
pub fn compute_tax(
    annual_income: Decimal,
    total_deductions: Decimal,
    config: &TaxYearConfig,
) -> TaxAssessment {
    let income = annual_income.max(Decimal::ZERO);
    let deductions = total_deductions.max(Decimal::ZERO);
    let taxable_income = (income - deductions).max(Decimal::ZERO);

    if taxable_income <= config.tax_free_threshold {
        return TaxAssessment {
            taxable_income,
            estimated_tax: Decimal::ZERO,
            bracket_label: config.zero_band_label(),
            effective_rate: Decimal::ZERO,
            provisional_first_payment: Decimal::ZERO,
            provisional_second_payment: Decimal::ZERO,
        };
    }

    // Scan from the top: the first bracket whose lower bound is strictly
    // below the income is the one it lands in. Income exactly on a band
    // boundary therefore taxes at the lower band's rate.
    let bracket = config
        .brackets
        .iter()
        .rev()
        .find(|b| b.lower < taxable_income)
        .expect("bracket table starts at a zero lower bound");

    let estimated_tax = bracket.base_tax + (taxable_income - bracket.lower) * bracket.rate;
    let effective_rate = estimated_tax / taxable_income * dec!(100);
    let half = estimated_tax / dec!(2);

    log::debug!(
        "taxable {} lands in {} -> tax {}",
        taxable_income,
        bracket.label(),
        estimated_tax
    );

    TaxAssessment {
        taxable_income,
        estimated_tax,
        bracket_label: bracket.label(),
        effective_rate,
        provisional_first_payment: half,
        provisional_second_payment: half,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::sars::TaxYear;

    fn config() -> TaxYearConfig {
        TaxYearConfig::for_year(TaxYear(2026))
    }

    #[test]
    fn zero_income_owes_nothing() {
        let result = compute_tax(dec!(0), dec!(0), &config());
        assert_eq!(result.estimated_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.bracket_label, "R0 - R95,750 (0%)");
    }

    #[test]
    fn income_at_threshold_owes_nothing() {
        let result = compute_tax(dec!(95750), dec!(0), &config());
        assert_eq!(result.taxable_income, dec!(95750));
        assert_eq!(result.estimated_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.provisional_first_payment, dec!(0));
        assert_eq!(result.provisional_second_payment, dec!(0));
    }

    #[test]
    fn crossing_the_threshold_uses_the_bracket_scan() {
        // One rand over the threshold skips the short-circuit but still
        // lands in the zero band, because band entry is strict: the 18%
        // band starts charging from 95,752
        let config = config();
        let at_floor = compute_tax(dec!(95751), dec!(0), &config);
        assert_eq!(at_floor.estimated_tax, dec!(0));
        assert_eq!(at_floor.bracket_label, "R0 - R95,750 (0%)");

        let over_floor = compute_tax(dec!(95752), dec!(0), &config);
        assert_eq!(over_floor.estimated_tax, dec!(0.18));
        assert_eq!(over_floor.bracket_label, "R95,751 - R237,100 (18%)");
    }

    #[test]
    fn deductions_floor_taxable_income_at_zero() {
        let result = compute_tax(dec!(50000), dec!(80000), &config());
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.estimated_tax, dec!(0));
    }

    #[test]
    fn negative_inputs_clamp_to_zero() {
        let result = compute_tax(dec!(-10000), dec!(-500), &config());
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.estimated_tax, dec!(0));
    }

    #[test]
    fn worked_example_mid_bracket() {
        // 600,000 gross less 100,000 deductions = 500,000 taxable, which
        // lands in the 31% band: 60,127 + (500,000 - 370,501) * 0.31
        let result = compute_tax(dec!(600000), dec!(100000), &config());
        assert_eq!(result.taxable_income, dec!(500000));
        assert_eq!(result.estimated_tax, dec!(100271.69));
        assert_eq!(result.bracket_label, "R370,501 - R512,800 (31%)");
        assert_eq!(result.effective_rate.round_dp(2), dec!(20.05));
    }

    #[test]
    fn provisional_payments_are_exact_halves() {
        let result = compute_tax(dec!(600000), dec!(100000), &config());
        assert_eq!(
            result.provisional_first_payment + result.provisional_second_payment,
            result.estimated_tax
        );
        assert_eq!(result.provisional_first_payment, result.provisional_second_payment);
    }

    #[test]
    fn bracket_boundary_taxes_at_lower_band() {
        // Income exactly on a boundary belongs to the band below it;
        // one rand more crosses into the next band
        let config = config();
        let at_boundary = compute_tax(dec!(237100), dec!(0), &config);
        assert_eq!(at_boundary.bracket_label, "R95,751 - R237,100 (18%)");

        let over_boundary = compute_tax(dec!(237101), dec!(0), &config);
        assert_eq!(over_boundary.bracket_label, "R237,101 - R370,500 (26%)");
    }

    #[test]
    fn top_bracket_is_open_ended() {
        let result = compute_tax(dec!(2000000), dec!(0), &config());
        assert_eq!(result.bracket_label, "R1,817,001+ (45%)");
        // 627,283 + (2,000,000 - 1,817,001) * 0.45
        assert_eq!(result.estimated_tax, dec!(627283) + dec!(182999) * dec!(0.45));
    }

    #[test]
    fn tax_is_monotonic_in_income() {
        let config = config();
        let incomes = [
            dec!(0),
            dec!(95750),
            dec!(95751),
            dec!(150000),
            dec!(237100),
            dec!(237101),
            dec!(500000),
            dec!(857901),
            dec!(1817000),
            dec!(1817001),
            dec!(5000000),
        ];
        let mut previous = Decimal::ZERO;
        for income in incomes {
            let tax = compute_tax(income, dec!(20000), &config).estimated_tax;
            assert!(
                tax >= previous,
                "tax decreased from {} to {} at income {}",
                previous,
                tax,
                income
            );
            previous = tax;
        }
    }
}
