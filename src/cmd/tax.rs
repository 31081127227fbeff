//! Tax command - progressive bracket breakdown for an annual or monthly amount

use crate::core::{bracket_slices, format_amount, read_portfolio_json, TaxBracket, TaxTables};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Gross income amount
    #[arg(short, long)]
    amount: Decimal,

    /// Treat the amount as monthly rather than annual
    #[arg(short, long)]
    monthly: bool,

    /// Currency whose tax table to apply (defaults to GBP, or the
    /// portfolio's currency when --portfolio is given)
    #[arg(short, long)]
    currency: Option<String>,

    /// JSON portfolio file supplying custom tax tables
    #[arg(short, long)]
    portfolio: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Tax data for JSON output
#[derive(Debug, Serialize)]
struct TaxData {
    currency: String,
    annual_income: String,
    brackets: Vec<BracketData>,
    total_tax: String,
    effective_rate_pct: String,
    net_annual: String,
    net_monthly: String,
}

#[derive(Debug, Serialize)]
struct BracketData {
    band: String,
    rate_pct: String,
    taxable: String,
    tax: String,
}

/// Row for the bracket table output
#[derive(Debug, Tabled)]
struct BracketRow {
    #[tabled(rename = "Band")]
    band: String,

    #[tabled(rename = "Rate")]
    rate: String,

    #[tabled(rename = "Taxable")]
    taxable: String,

    #[tabled(rename = "Tax")]
    tax: String,
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (currency, tables) = self.resolve_tables()?;
        let brackets = tables.for_currency(&currency);

        let annual_income = if self.monthly {
            self.amount * dec!(12)
        } else {
            self.amount
        };

        let slices = bracket_slices(annual_income, brackets);
        let total_tax: Decimal = slices.iter().map(|s| s.tax).sum();
        let effective_rate = if annual_income.is_zero() {
            Decimal::ZERO
        } else {
            total_tax / annual_income * dec!(100)
        };
        let net_annual = annual_income - total_tax;

        if self.json {
            let data = TaxData {
                currency: currency.clone(),
                annual_income: format!("{:.2}", annual_income),
                brackets: slices
                    .iter()
                    .map(|slice| BracketData {
                        band: band_label(&slice.bracket),
                        rate_pct: rate_pct(slice.bracket.rate),
                        taxable: format!("{:.2}", slice.taxable),
                        tax: format!("{:.2}", slice.tax),
                    })
                    .collect(),
                total_tax: format!("{:.2}", total_tax),
                effective_rate_pct: format!("{:.2}", effective_rate),
                net_annual: format!("{:.2}", net_annual),
                net_monthly: format!("{:.2}", net_annual / dec!(12)),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!("TAX CALCULATION ({})", currency);
        println!();

        if brackets.is_empty() {
            println!("No tax table configured for {}; tax is zero.", currency);
        } else {
            let rows: Vec<BracketRow> = slices
                .iter()
                .map(|slice| BracketRow {
                    band: band_label(&slice.bracket),
                    rate: format!("{}%", rate_pct(slice.bracket.rate)),
                    taxable: format_amount(&currency, slice.taxable),
                    tax: format_amount(&currency, slice.tax),
                })
                .collect();
            if rows.is_empty() {
                println!("Income does not reach the first bracket.");
            } else {
                let table = Table::new(&rows)
                    .with(Style::rounded())
                    .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                    .to_string();
                println!("{}", table);
            }
        }
        println!();

        let fmt = |amount| format_amount(&currency, amount);
        println!("Gross annual income: {}", fmt(annual_income));
        println!(
            "Total tax: {} (effective rate {:.2}%)",
            fmt(total_tax),
            effective_rate
        );
        println!(
            "Net annual: {} | Net monthly: {}",
            fmt(net_annual),
            fmt(net_annual / dec!(12))
        );
        println!();

        Ok(())
    }

    fn resolve_tables(&self) -> anyhow::Result<(String, TaxTables)> {
        match &self.portfolio {
            Some(path) => {
                let file = File::open(path)?;
                let input = read_portfolio_json(BufReader::new(file))?;
                let currency = self
                    .currency
                    .clone()
                    .unwrap_or(input.currency)
                    .trim()
                    .to_uppercase();
                Ok((currency, TaxTables::with_overrides(input.tax_tables)))
            }
            None => {
                let currency = self
                    .currency
                    .clone()
                    .unwrap_or_else(|| "GBP".to_string())
                    .trim()
                    .to_uppercase();
                Ok((currency, TaxTables::default()))
            }
        }
    }
}

fn band_label(bracket: &TaxBracket) -> String {
    match bracket.max {
        Some(max) => format!("{} - {}", group_thousands(bracket.min), group_thousands(max)),
        None => format!("{}+", group_thousands(bracket.min)),
    }
}

/// Percentage with trailing zeros trimmed (20, 32.5)
fn rate_pct(rate: Decimal) -> String {
    let s = format!("{:.2}", rate * dec!(100));
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(amount: Decimal) -> String {
    let s = format!("{:.0}", amount);
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}
