//! ZAR formatting helpers shared by reports and exports.

use rust_decimal::Decimal;

/// Format an amount as rand with thousands separators, e.g. "R 12,345.67".
pub fn format_zar(amount: Decimal) -> String {
    format!("R {}", group_decimal(amount))
}

/// Like [`format_zar`] but with a leading minus for negative amounts.
pub fn format_zar_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-R {}", group_decimal(amount.abs()))
    } else {
        format_zar(amount)
    }
}

/// Two-decimal rendering with thousands separators, no currency symbol.
/// Exports rely on this being the exact decimal value (no float drift).
pub fn group_decimal(amount: Decimal) -> String {
    let plain = format!("{:.2}", amount);
    match plain.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_digits(int_part), frac_part),
        None => group_digits(&plain),
    }
}

/// Whole-rand rendering with thousands separators, used in bracket labels.
pub fn group_whole(amount: Decimal) -> String {
    group_digits(&format!("{:.0}", amount))
}

fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_zar_groups_thousands() {
        assert_eq!(format_zar(dec!(1234567.89)), "R 1,234,567.89");
        assert_eq!(format_zar(dec!(95750)), "R 95,750.00");
        assert_eq!(format_zar(dec!(0)), "R 0.00");
        assert_eq!(format_zar(dec!(999.5)), "R 999.50");
    }

    #[test]
    fn format_zar_signed_negative() {
        assert_eq!(format_zar_signed(dec!(-1500.25)), "-R 1,500.25");
        assert_eq!(format_zar_signed(dec!(1500.25)), "R 1,500.25");
    }

    #[test]
    fn group_whole_drops_cents() {
        assert_eq!(group_whole(dec!(95750)), "95,750");
        assert_eq!(group_whole(dec!(1817001)), "1,817,001");
        assert_eq!(group_whole(dec!(0)), "0");
    }
}
