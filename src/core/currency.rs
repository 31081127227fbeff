use rust_decimal::Decimal;

/// A currency the tool knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Currencies available for portfolio denomination.
pub const CURRENCIES: &[Currency] = &[
    Currency {
        code: "GBP",
        symbol: "\u{00A3}",
        name: "British Pound",
    },
    Currency {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    Currency {
        code: "EUR",
        symbol: "\u{20AC}",
        name: "Euro",
    },
    Currency {
        code: "AUD",
        symbol: "A$",
        name: "Australian Dollar",
    },
    Currency {
        code: "CAD",
        symbol: "C$",
        name: "Canadian Dollar",
    },
    Currency {
        code: "JPY",
        symbol: "\u{00A5}",
        name: "Japanese Yen",
    },
];

impl Currency {
    /// Look up a currency by code, case-insensitively.
    pub fn find(code: &str) -> Option<&'static Currency> {
        let code = code.trim();
        CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Format an amount with this currency's symbol, thousands grouping and
    /// two decimal places. Negative amounts carry a leading minus.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        if rounded < Decimal::ZERO {
            format!("-{}{}", self.symbol, grouped(-rounded))
        } else {
            format!("{}{}", self.symbol, grouped(rounded))
        }
    }
}

/// Format an amount in the currency named by `code`. Codes outside the
/// registry fall back to the bare code as prefix.
pub fn format_amount(code: &str, amount: Decimal) -> String {
    match Currency::find(code) {
        Some(currency) => currency.format(amount),
        None => {
            let rounded = amount.round_dp(2);
            if rounded < Decimal::ZERO {
                format!("-{} {}", code.trim().to_uppercase(), grouped(-rounded))
            } else {
                format!("{} {}", code.trim().to_uppercase(), grouped(rounded))
            }
        }
    }
}

/// Render a non-negative, already-rounded amount with comma grouping.
fn grouped(amount: Decimal) -> String {
    let plain = format!("{:.2}", amount);
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut out = String::with_capacity(plain.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(Currency::find("gbp").map(|c| c.code), Some("GBP"));
        assert_eq!(Currency::find("AUD").map(|c| c.symbol), Some("A$"));
        assert_eq!(Currency::find(" usd ").map(|c| c.code), Some("USD"));
        assert_eq!(Currency::find("XYZ"), None);
    }

    #[test]
    fn format_groups_thousands() {
        let gbp = Currency::find("GBP").unwrap();
        assert_eq!(gbp.format(dec!(1234567.891)), "£1,234,567.89");
        assert_eq!(gbp.format(dec!(1000)), "£1,000.00");
        assert_eq!(gbp.format(dec!(999.99)), "£999.99");
        assert_eq!(gbp.format(dec!(0)), "£0.00");
    }

    #[test]
    fn format_rounding_crosses_grouping_boundary() {
        let gbp = Currency::find("GBP").unwrap();
        assert_eq!(gbp.format(dec!(999.999)), "£1,000.00");
    }

    #[test]
    fn format_negative_has_leading_minus() {
        let gbp = Currency::find("GBP").unwrap();
        assert_eq!(gbp.format(dec!(-12.5)), "-£12.50");
        assert_eq!(gbp.format(dec!(-1234567)), "-£1,234,567.00");
    }

    #[test]
    fn format_amount_falls_back_to_code() {
        assert_eq!(format_amount("xyz", dec!(12)), "XYZ 12.00");
        assert_eq!(format_amount("XYZ", dec!(-1500)), "-XYZ 1,500.00");
        assert_eq!(format_amount("jpy", dec!(850000)), "¥850,000.00");
    }
}
