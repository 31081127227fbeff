//! Overview command - net worth and cash flow at a glance

use crate::cmd::PortfolioArgs;
use crate::core::{format_amount, Portfolio};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct OverviewCommand {
    #[command(flatten)]
    portfolio: PortfolioArgs,

    /// Only count items acquired on or before this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Overview data for JSON output
#[derive(Debug, Serialize)]
struct OverviewData {
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_of: Option<String>,
    total_assets: String,
    total_liabilities: String,
    net_worth: String,
    monthly_income: String,
    monthly_expenses: String,
    monthly_cash_flow: String,
    assets_by_kind: Vec<KindTotal>,
}

#[derive(Debug, Serialize)]
struct KindTotal {
    kind: String,
    total: String,
}

impl OverviewCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = self.portfolio.read()?;

        if self.json {
            self.print_json(&portfolio)
        } else {
            self.print_overview(&portfolio);
            Ok(())
        }
    }

    fn print_overview(&self, portfolio: &Portfolio) {
        let currency = &portfolio.currency;
        let fmt = |amount| format_amount(currency, amount);

        println!();
        if let Some(as_of) = self.as_of {
            println!("FINANCIAL OVERVIEW ({}) as of {}", currency, as_of);
        } else {
            println!("FINANCIAL OVERVIEW ({})", currency);
        }
        println!();

        println!("NET WORTH");
        println!(
            "  Assets: {} | Liabilities: {} | Net Worth: {}",
            fmt(portfolio.total_assets(self.as_of)),
            fmt(portfolio.total_liabilities(self.as_of)),
            fmt(portfolio.net_worth(self.as_of))
        );
        if self.as_of.is_none() {
            let breakdown: Vec<String> = portfolio
                .kind_breakdown()
                .into_iter()
                .map(|(kind, total)| format!("{}: {}", kind, fmt(total)))
                .collect();
            if !breakdown.is_empty() {
                println!("  {}", breakdown.join(" | "));
            }
        }
        println!();

        println!("MONTHLY CASH FLOW");
        println!(
            "  Income: {} | Expenses: {} | Cash Flow: {}",
            fmt(portfolio.total_monthly_income()),
            fmt(portfolio.total_monthly_expenses()),
            fmt(portfolio.monthly_cash_flow())
        );
        println!();
    }

    fn print_json(&self, portfolio: &Portfolio) -> anyhow::Result<()> {
        let assets_by_kind = portfolio
            .kind_breakdown()
            .into_iter()
            .map(|(kind, total)| KindTotal {
                kind: kind.to_string(),
                total: format!("{:.2}", total),
            })
            .collect();

        let data = OverviewData {
            currency: portfolio.currency.clone(),
            as_of: self.as_of.map(|d| d.to_string()),
            total_assets: format!("{:.2}", portfolio.total_assets(self.as_of)),
            total_liabilities: format!("{:.2}", portfolio.total_liabilities(self.as_of)),
            net_worth: format!("{:.2}", portfolio.net_worth(self.as_of)),
            monthly_income: format!("{:.2}", portfolio.total_monthly_income()),
            monthly_expenses: format!("{:.2}", portfolio.total_monthly_expenses()),
            monthly_cash_flow: format!("{:.2}", portfolio.monthly_cash_flow()),
            assets_by_kind,
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
