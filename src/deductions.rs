//! SARS deduction rules per expense category.
//!
//! Encodes the Income Tax Act sections gig workers typically claim
//! under, with per-category caps (home office 50%, travel 80%) and the
//! documentation SARS expects on audit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A deduction rule for one recognised expense category
#[derive(Debug, Clone, Copy)]
pub struct DeductionRule {
    pub category: &'static str,
    /// Income Tax Act section the claim falls under
    pub section: &'static str,
    /// Portion of the expense that may be claimed
    pub max_percentage: Decimal,
    /// Annual wear-and-tear rate for capital items, if any
    pub wear_tear_rate: Option<Decimal>,
    pub requirements: &'static [&'static str],
    pub documentation: &'static [&'static str],
}

pub static DEDUCTION_RULES: &[DeductionRule] = &[
    DeductionRule {
        category: "Home Office (Max 50%)",
        section: "11(a)",
        max_percentage: dec!(50),
        wear_tear_rate: None,
        requirements: &["Dedicated space for business", "Regular and exclusive use"],
        documentation: &[
            "Lease agreement or bond statement",
            "Utility bills",
            "Floor plan or photos",
        ],
    },
    DeductionRule {
        category: "Data & Airtime",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Primarily used for business purposes"],
        documentation: &["Itemized bills showing business usage"],
    },
    DeductionRule {
        category: "Equipment & Software",
        section: "11(e)",
        max_percentage: dec!(100),
        wear_tear_rate: Some(dec!(33.3)),
        requirements: &["Used for business"],
        documentation: &["Purchase invoices", "Asset register", "Proof of business use"],
    },
    DeductionRule {
        category: "Travel (Log Book Required)",
        section: "8(1)",
        max_percentage: dec!(80),
        wear_tear_rate: None,
        requirements: &["Detailed logbook", "Business purpose documented"],
        documentation: &["Travel logbook", "Trip receipts", "Business meeting proof"],
    },
    DeductionRule {
        category: "Marketing & Advertising",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Business promotion purpose"],
        documentation: &["Invoices", "Campaign details", "Advertising contracts"],
    },
    DeductionRule {
        category: "Professional Services",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Related to business operations"],
        documentation: &["Professional service invoices", "Contracts"],
    },
    DeductionRule {
        category: "Bank Charges",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Business bank account charges"],
        documentation: &["Bank statements", "Fee invoices"],
    },
    DeductionRule {
        category: "Training & Development",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Directly related to income-earning activities"],
        documentation: &[
            "Course receipts",
            "Training certificates",
            "Course content proof",
        ],
    },
    DeductionRule {
        category: "Insurance",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Business-related insurance"],
        documentation: &["Insurance policy documents", "Premium receipts"],
    },
    DeductionRule {
        category: "Repairs & Maintenance",
        section: "11(d)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Repairs to business equipment or premises"],
        documentation: &["Repair invoices", "Before/after photos", "Service reports"],
    },
    DeductionRule {
        category: "Other Deductible",
        section: "11(a)",
        max_percentage: dec!(100),
        wear_tear_rate: None,
        requirements: &["Wholly and exclusively for business"],
        documentation: &["Detailed receipts", "Business purpose explanation"],
    },
];

/// Look up the rule for a category, if it is one we recognise
pub fn rule_for(category: &str) -> Option<&'static DeductionRule> {
    DEDUCTION_RULES.iter().find(|r| r.category == category)
}

/// Outcome of analysing one expense against the rules
#[derive(Debug, Clone)]
pub struct DeductionAssessment {
    pub section: String,
    pub max_percentage: Decimal,
    /// The amount actually claimable after the category cap
    pub capped_amount: Decimal,
    /// First-year wear-and-tear write-off for capital items
    pub annual_writeoff: Option<Decimal>,
    pub recognised: bool,
    /// Why the expense qualifies, built from the rule's requirements
    pub reasoning: String,
    pub warnings: Vec<String>,
    pub documentation: Vec<&'static str>,
}

/// Apply the category's rule to an expense amount.
///
/// Unknown categories fall back to a fully-claimable 11(a) treatment
/// flagged for manual review, so a custom category never blocks a
/// report.
pub fn analyze(amount: Decimal, category: &str) -> DeductionAssessment {
    let amount = amount.max(Decimal::ZERO);

    let Some(rule) = rule_for(category) else {
        return DeductionAssessment {
            section: "11(a)".to_string(),
            max_percentage: dec!(100),
            capped_amount: amount,
            annual_writeoff: None,
            recognised: false,
            reasoning: "Category not in standard SARS deduction rules. Manual review recommended."
                .to_string(),
            warnings: vec![format!(
                "Custom category '{}' - ensure it qualifies under SARS rules",
                category
            )],
            documentation: vec!["Detailed receipts", "Business purpose explanation"],
        };
    };

    let capped_amount = amount * rule.max_percentage / dec!(100);
    let annual_writeoff = rule
        .wear_tear_rate
        .map(|rate| (amount * rate / dec!(100)).round_dp(2));

    let mut warnings = Vec::new();
    if rule.max_percentage < dec!(100) {
        warnings.push(format!(
            "Limited to {}% of the expense amount",
            rule.max_percentage.normalize()
        ));
    }
    if rule.category == "Travel (Log Book Required)" {
        warnings.push("Detailed logbook required for all business travel".to_string());
    }
    if let Some(rate) = rule.wear_tear_rate {
        warnings.push(format!(
            "Depreciation applies: {}% per year over 3 years",
            rate.normalize()
        ));
    }

    DeductionAssessment {
        section: rule.section.to_string(),
        max_percentage: rule.max_percentage,
        capped_amount,
        annual_writeoff,
        recognised: true,
        reasoning: format!(
            "Qualifies under SARS Section {} as a deductible business expense. {}.",
            rule.section,
            rule.requirements.join(". ")
        ),
        warnings,
        documentation: rule.documentation.to_vec(),
    }
}

/// Keyword-match a free-text description onto a recognised category
pub fn suggest_category(description: &str) -> &'static str {
    let desc = description.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| desc.contains(k));

    if matches(&["rent", "bond", "rates", "electricity"]) {
        "Home Office (Max 50%)"
    } else if matches(&["data", "airtime", "internet", "phone"]) {
        "Data & Airtime"
    } else if matches(&["laptop", "camera", "software", "computer"]) {
        "Equipment & Software"
    } else if matches(&["petrol", "fuel", "travel", "uber"]) {
        "Travel (Log Book Required)"
    } else if matches(&["ad", "marketing", "promo"]) {
        "Marketing & Advertising"
    } else if matches(&["accountant", "lawyer", "consultant"]) {
        "Professional Services"
    } else if matches(&["bank", "fee"]) {
        "Bank Charges"
    } else if matches(&["course", "training", "learn"]) {
        "Training & Development"
    } else if matches(&["insurance"]) {
        "Insurance"
    } else if matches(&["repair", "fix", "maintenance"]) {
        "Repairs & Maintenance"
    } else {
        "Other Deductible"
    }
}
