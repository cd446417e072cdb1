use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::money::group_whole;
use crate::tax::sars::TaxYearConfig;

/// Severity of a compliance finding, ranked by regulatory urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Urgent,
    Critical,
}

/// Registration flags as known to the caller. Anything the caller does
/// not know maps to `false`, the reading most likely to surface a
/// warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationState {
    pub has_tax_number: bool,
    pub has_vat_number: bool,
    pub provisional_registered: bool,
}

/// The single prioritized status returned per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceStatus {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ComplianceStatus {
    fn new(severity: Severity, message: String, action: Option<&str>) -> Self {
        ComplianceStatus {
            severity,
            message,
            action: action.map(str::to_string),
        }
    }
}

type Predicate = fn(&RegistrationState, Decimal, &TaxYearConfig) -> bool;
type Build = fn(&RegistrationState, Decimal, &TaxYearConfig) -> ComplianceStatus;

struct Rule {
    applies: Predicate,
    status: Build,
}

/// Ordered decision list; the first matching rule wins, so a taxpayer
/// near several thresholds sees only the most urgent finding. The final
/// "up to date" fallback lives in [`classify`] itself.
static RULES: &[Rule] = &[
    // Turnover above the VAT threshold without a VAT number
    Rule {
        applies: |state, ytd, config| ytd > config.vat_threshold && !state.has_vat_number,
        status: |_, _, config| {
            ComplianceStatus::new(
                Severity::Critical,
                format!(
                    "VAT registration required above R{} turnover",
                    group_whole(config.vat_threshold)
                ),
                Some("Register for VAT with SARS"),
            )
        },
    },
    // Over the tax threshold with no tax number
    Rule {
        applies: |state, ytd, config| !state.has_tax_number && ytd > config.tax_free_threshold,
        status: |_, _, _| {
            ComplianceStatus::new(
                Severity::Urgent,
                "Tax registration required! You have exceeded the tax threshold.".to_string(),
                Some("Register for SARS eFiling now"),
            )
        },
    },
    // Approaching the tax threshold (85%) with no tax number
    Rule {
        applies: |state, ytd, config| {
            !state.has_tax_number && ytd > config.tax_free_threshold * dec!(0.85)
        },
        status: |_, ytd, config| {
            let remaining = config.tax_free_threshold - ytd;
            ComplianceStatus::new(
                Severity::Warning,
                format!("You're R{:.2} away from the tax threshold", remaining),
                Some("Start SARS eFiling registration"),
            )
        },
    },
    // Non-PAYE income above the provisional threshold, not registered
    Rule {
        applies: |state, ytd, config| {
            ytd > config.provisional_tax_threshold && !state.provisional_registered
        },
        status: |_, _, config| {
            ComplianceStatus::new(
                Severity::Warning,
                format!(
                    "Consider provisional tax registration for non-PAYE income above R{}",
                    group_whole(config.provisional_tax_threshold)
                ),
                Some("Learn about provisional tax"),
            )
        },
    },
    // Below the threshold and nothing else outstanding
    Rule {
        applies: |_, ytd, config| ytd <= config.tax_free_threshold,
        status: |_, _, _| {
            ComplianceStatus::new(
                Severity::Success,
                "Great news! You're below the tax threshold - no tax payable!".to_string(),
                None,
            )
        },
    },
];

/// Map registration state and year-to-date income onto exactly one
/// prioritized compliance status. Never fails; negative income is
/// clamped to zero like everywhere else in the engine.
pub fn classify(
    state: &RegistrationState,
    ytd_income: Decimal,
    config: &TaxYearConfig,
) -> ComplianceStatus {
    let ytd = ytd_income.max(Decimal::ZERO);
    for rule in RULES {
        if (rule.applies)(state, ytd, config) {
            return (rule.status)(state, ytd, config);
        }
    }
    ComplianceStatus::new(
        Severity::Success,
        "Your tax compliance is up to date".to_string(),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::sars::TaxYear;

    fn config() -> TaxYearConfig {
        TaxYearConfig::for_year(TaxYear(2026))
    }

    fn unregistered() -> RegistrationState {
        RegistrationState::default()
    }

    fn fully_registered() -> RegistrationState {
        RegistrationState {
            has_tax_number: true,
            has_vat_number: true,
            provisional_registered: true,
        }
    }

    #[test]
    fn vat_rule_outranks_tax_number_rule() {
        // Both the VAT and tax-number rules match; only the VAT one fires
        let status = classify(&unregistered(), dec!(1200000), &config());
        assert_eq!(status.severity, Severity::Critical);
        assert!(status.message.contains("VAT registration required"));
    }

    #[test]
    fn missing_tax_number_over_threshold_is_urgent() {
        let state = RegistrationState {
            has_vat_number: true,
            ..unregistered()
        };
        let status = classify(&state, dec!(150000), &config());
        assert_eq!(status.severity, Severity::Urgent);
        assert_eq!(status.action.as_deref(), Some("Register for SARS eFiling now"));
    }

    #[test]
    fn near_threshold_message_reports_exact_remaining() {
        // 90,000 > 85% of 95,750 (= 81,387.50); remaining is 5,750
        let state = RegistrationState {
            provisional_registered: true,
            ..unregistered()
        };
        let status = classify(&state, dec!(90000), &config());
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(
            status.message,
            "You're R5750.00 away from the tax threshold"
        );
    }

    #[test]
    fn near_threshold_outranks_provisional_suggestion() {
        // At 90,000 both the 85% rule and the provisional rule match;
        // the 85% rule is the one that fires
        let status = classify(&unregistered(), dec!(90000), &config());
        assert!(status.message.contains("away from the tax threshold"));
    }

    #[test]
    fn provisional_suggestion_above_thirty_thousand() {
        let state = RegistrationState {
            has_tax_number: true,
            ..unregistered()
        };
        let status = classify(&state, dec!(50000), &config());
        assert_eq!(status.severity, Severity::Warning);
        assert!(status.message.contains("provisional tax registration"));
    }

    #[test]
    fn exactly_at_threshold_is_below_threshold_success() {
        // The below-threshold rule uses <=, so income exactly on the
        // threshold is still a success, not a registration warning
        let state = RegistrationState {
            provisional_registered: true,
            ..unregistered()
        };
        let status = classify(&state, dec!(95750), &config());
        assert_eq!(status.severity, Severity::Success);
        assert!(status.message.contains("below the tax threshold"));
    }

    #[test]
    fn low_income_unregistered_still_gets_provisional_nudge() {
        // With nothing registered, the provisional rule fires before the
        // below-threshold success for income above 30,000
        let status = classify(&unregistered(), dec!(95750), &config());
        assert_eq!(status.severity, Severity::Warning);
        assert!(status.message.contains("provisional tax"));
    }

    #[test]
    fn fully_registered_above_threshold_is_up_to_date() {
        let status = classify(&fully_registered(), dec!(500000), &config());
        assert_eq!(status.severity, Severity::Success);
        assert_eq!(status.message, "Your tax compliance is up to date");
        assert_eq!(status.action, None);
    }

    #[test]
    fn small_income_below_everything_is_success() {
        let status = classify(&unregistered(), dec!(10000), &config());
        assert_eq!(status.severity, Severity::Success);
        assert!(status.message.contains("below the tax threshold"));
    }

    #[test]
    fn negative_income_clamps_to_zero() {
        let status = classify(&unregistered(), dec!(-5000), &config());
        assert_eq!(status.severity, Severity::Success);
    }
}
