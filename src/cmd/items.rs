//! Items command - itemized view of assets and liabilities

use crate::cmd::PortfolioArgs;
use crate::core::{format_amount, FinancialItem, ItemDetail, Portfolio};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ItemsCommand {
    #[command(flatten)]
    portfolio: PortfolioArgs,

    /// Which side of the balance sheet to show
    #[arg(short, long, value_enum, default_value_t = SideFilter::All)]
    side: SideFilter,

    /// Only show items acquired on or before this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, ValueEnum)]
pub enum SideFilter {
    #[default]
    All,
    Assets,
    Liabilities,
}

impl ItemsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = self.portfolio.read()?;
        let rows = build_item_rows(&portfolio, self.side, self.as_of);

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[ItemRow]) {
        if rows.is_empty() {
            println!("No items found matching filters");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, rows: &[ItemRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Row for the items table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct ItemRow {
    #[tabled(rename = "Side")]
    pub side: String,

    #[tabled(rename = "Label")]
    pub label: String,

    #[tabled(rename = "Kind")]
    pub kind: String,

    #[tabled(rename = "Acquired")]
    pub acquired: String,

    #[tabled(rename = "Value")]
    pub value: String,

    #[tabled(rename = "Eff. Mortgage")]
    pub effective_mortgage: String,

    #[tabled(rename = "Rate")]
    pub interest_rate: String,

    #[tabled(rename = "Repayment")]
    pub monthly_repayment: String,
}

fn build_item_rows(
    portfolio: &Portfolio,
    side: SideFilter,
    as_of: Option<NaiveDate>,
) -> Vec<ItemRow> {
    let mut rows = Vec::new();

    if side != SideFilter::Liabilities {
        for item in &portfolio.assets {
            if as_of.is_none_or(|date| item.acquired_by(date)) {
                rows.push(item_row(&portfolio.currency, "Asset", item));
            }
        }
    }
    if side != SideFilter::Assets {
        for item in &portfolio.liabilities {
            if as_of.is_none_or(|date| item.acquired_by(date)) {
                rows.push(item_row(&portfolio.currency, "Liability", item));
            }
        }
    }

    rows
}

fn item_row(currency: &str, side: &str, item: &FinancialItem) -> ItemRow {
    let (effective_mortgage, interest_rate, monthly_repayment) = match &item.detail {
        ItemDetail::Simple { .. } => ("-".to_string(), "-".to_string(), "-".to_string()),
        ItemDetail::Property(details) => (
            format_amount(currency, details.effective_mortgage()),
            format!("{:.2}%", details.interest_rate),
            format_amount(currency, details.monthly_repayment),
        ),
    };

    ItemRow {
        side: side.to_string(),
        label: item.label.clone(),
        kind: item.kind().to_string(),
        acquired: item.date_acquired.format("%Y-%m-%d").to_string(),
        value: format_amount(currency, item.value()),
        effective_mortgage,
        interest_rate,
        monthly_repayment,
    }
}
