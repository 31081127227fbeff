//! History command - reconstructed net-worth series and snapshot recording

use crate::cmd::PortfolioArgs;
use crate::core::{format_amount, monthly_series, NetWorthHistory, NetWorthPoint};
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use std::fs;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct HistoryCommand {
    #[command(flatten)]
    portfolio: PortfolioArgs,

    /// Number of months to reconstruct
    #[arg(short, long, default_value_t = 12)]
    months: u32,

    /// Final date of the series (defaults to today)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Record today's net worth into this JSON history file instead of
    /// printing a series
    #[arg(long)]
    record: Option<PathBuf>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// Row for the history table output
#[derive(Debug, Tabled, serde::Serialize)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,

    #[tabled(rename = "Net Worth")]
    net_worth: String,
}

impl HistoryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = self.portfolio.read()?;

        if let Some(path) = &self.record {
            let mut history = if path.exists() {
                let contents = fs::read_to_string(path)?;
                serde_json::from_str(&contents)?
            } else {
                NetWorthHistory::default()
            };

            let today = chrono::Local::now().date_naive();
            let net_worth = portfolio.net_worth(None);
            history.record(today, net_worth);
            fs::write(path, serde_json::to_string_pretty(&history)?)?;

            println!(
                "Recorded net worth {} at {} ({} point(s) in {})",
                format_amount(&portfolio.currency, net_worth),
                today,
                history.points.len(),
                path.display()
            );
            return Ok(());
        }

        let end = self
            .end
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let series = monthly_series(&portfolio, self.months, end);
        let rows: Vec<HistoryRow> = series
            .iter()
            .map(|point| HistoryRow {
                date: point.date.format("%Y-%m-%d").to_string(),
                net_worth: format_amount(&portfolio.currency, point.value),
            })
            .collect();

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&portfolio.currency, &series, &rows, end);
            Ok(())
        }
    }

    fn print_table(
        &self,
        currency: &str,
        series: &[NetWorthPoint],
        rows: &[HistoryRow],
        end: NaiveDate,
    ) {
        if rows.is_empty() {
            println!("No history to show");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        if let (Some(first), Some(last)) = (series.first(), series.last()) {
            let change = last.value - first.value;
            println!(
                "\nChange over {} month(s) to {}: {}",
                self.months,
                end,
                format_signed(currency, change)
            );
        }
    }

    fn write_csv(&self, rows: &[HistoryRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn format_signed(currency: &str, amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{}", format_amount(currency, amount.abs()))
    } else {
        format!("+{}", format_amount(currency, amount))
    }
}
