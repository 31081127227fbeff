use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A progressive tax bracket: income between `min` and `max` is taxed at
/// `rate`. `max = None` marks the unbounded top bracket. Rates are
/// fractions (0.2 = 20%); a zero rate models a personal allowance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBracket {
    #[schemars(with = "f64")]
    pub min: Decimal,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub max: Option<Decimal>,
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

/// The portion of an income that fell into one bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketSlice {
    pub bracket: TaxBracket,
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Decompose an annual income into per-bracket taxed slices.
///
/// Brackets are sorted by `min` before slicing, so callers may supply them
/// in any order. Bracket tables are trusted input: non-overlap and
/// contiguity are the supplier's responsibility.
pub fn bracket_slices(annual_income: Decimal, brackets: &[TaxBracket]) -> Vec<BracketSlice> {
    let mut sorted = brackets.to_vec();
    sorted.sort_by(|a, b| a.min.cmp(&b.min));

    let mut slices = Vec::new();
    for bracket in sorted {
        if annual_income <= bracket.min {
            continue;
        }
        let above_min = annual_income - bracket.min;
        let taxable = match bracket.max {
            Some(max) => above_min.min(max - bracket.min),
            None => above_min,
        };
        let tax = taxable * bracket.rate;
        log::debug!(
            "band min={} max={:?} rate={}: taxable={} tax={}",
            bracket.min,
            bracket.max,
            bracket.rate,
            taxable,
            tax
        );
        slices.push(BracketSlice {
            bracket,
            taxable,
            tax,
        });
    }
    slices
}

/// Total progressive tax on an annual income under the given brackets.
///
/// An empty bracket table yields zero tax: currencies without a configured
/// table fall back to untaxed income rather than an error.
pub fn calculate_tax(annual_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    bracket_slices(annual_income, brackets)
        .iter()
        .map(|s| s.tax)
        .sum()
}

/// Bracket tables keyed by currency code.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxTables {
    tables: HashMap<String, Vec<TaxBracket>>,
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TaxTables {
    /// The bracket tables that ship with the tool.
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        tables.insert("GBP".to_string(), gbp_brackets());
        tables.insert("AUD".to_string(), aud_brackets());
        TaxTables { tables }
    }

    /// Built-in tables merged with per-portfolio overrides (override wins).
    pub fn with_overrides(overrides: HashMap<String, Vec<TaxBracket>>) -> Self {
        let mut merged = Self::builtin();
        for (code, brackets) in overrides {
            merged.tables.insert(code.trim().to_uppercase(), brackets);
        }
        merged
    }

    /// Brackets for a currency code; empty when none are configured.
    pub fn for_currency(&self, code: &str) -> &[TaxBracket] {
        match self.tables.get(code.trim().to_uppercase().as_str()) {
            Some(brackets) => brackets.as_slice(),
            None => {
                log::debug!("no tax table for {code}, treating income as untaxed");
                &[]
            }
        }
    }
}

/// UK income tax bands (personal allowance, basic, higher, additional).
fn gbp_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket {
            min: dec!(0),
            max: Some(dec!(12570)),
            rate: dec!(0),
        },
        TaxBracket {
            min: dec!(12571),
            max: Some(dec!(50270)),
            rate: dec!(0.20),
        },
        TaxBracket {
            min: dec!(50271),
            max: Some(dec!(125140)),
            rate: dec!(0.40),
        },
        TaxBracket {
            min: dec!(125141),
            max: None,
            rate: dec!(0.45),
        },
    ]
}

/// Australian resident income tax bands.
fn aud_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket {
            min: dec!(0),
            max: Some(dec!(18200)),
            rate: dec!(0),
        },
        TaxBracket {
            min: dec!(18201),
            max: Some(dec!(45000)),
            rate: dec!(0.19),
        },
        TaxBracket {
            min: dec!(45001),
            max: Some(dec!(120000)),
            rate: dec!(0.325),
        },
        TaxBracket {
            min: dec!(120001),
            max: Some(dec!(180000)),
            rate: dec!(0.37),
        },
        TaxBracket {
            min: dec!(180001),
            max: None,
            rate: dec!(0.45),
        },
    ]
}
