//! Income command - per-stream gross, tax and net monthly figures

use crate::cmd::PortfolioArgs;
use crate::core::{format_amount, Portfolio};
use clap::Args;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct IncomeCommand {
    #[command(flatten)]
    portfolio: PortfolioArgs,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl IncomeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = self.portfolio.read()?;
        let rows = build_income_rows(&portfolio);

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&portfolio, &rows);
            Ok(())
        }
    }

    fn print_table(&self, portfolio: &Portfolio, rows: &[IncomeRow]) {
        if rows.is_empty() {
            println!("No income streams found");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!(
            "\nTotal net monthly income: {}",
            format_amount(&portfolio.currency, portfolio.total_monthly_income())
        );
    }

    fn write_csv(&self, rows: &[IncomeRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Row for the income table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct IncomeRow {
    #[tabled(rename = "Label")]
    pub label: String,

    #[tabled(rename = "Frequency")]
    pub frequency: String,

    #[tabled(rename = "Gross")]
    pub gross: String,

    #[tabled(rename = "Annual")]
    pub annual: String,

    #[tabled(rename = "Taxed")]
    pub taxed: String,

    #[tabled(rename = "Annual Tax")]
    pub annual_tax: String,

    #[tabled(rename = "Net Monthly")]
    pub net_monthly: String,
}

fn build_income_rows(portfolio: &Portfolio) -> Vec<IncomeRow> {
    let currency = &portfolio.currency;
    let brackets = portfolio.brackets();

    portfolio
        .income
        .iter()
        .map(|stream| IncomeRow {
            label: stream.label.clone(),
            frequency: stream.frequency.to_string(),
            gross: format_amount(currency, stream.value),
            annual: format_amount(currency, stream.annual_gross()),
            taxed: if stream.is_salary { "yes" } else { "no" }.to_string(),
            annual_tax: format_amount(currency, stream.annual_tax(brackets)),
            net_monthly: format_amount(currency, stream.net_monthly(brackets)),
        })
        .collect()
}
