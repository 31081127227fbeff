pub mod history;
pub mod income;
pub mod items;
pub mod overview;
pub mod schema;
pub mod tax;
pub mod validate;

use crate::core::{
    build_portfolio, read_income_csv, read_items_csv, read_portfolio_json, Portfolio,
    PortfolioInput, Warning,
};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Shared input arguments for commands that operate on a portfolio.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// JSON portfolio file (or stdin with "-")
    #[arg(short, long, conflicts_with_all = ["assets", "liabilities", "income"])]
    portfolio: Option<PathBuf>,

    /// CSV file of assets
    #[arg(long)]
    assets: Option<PathBuf>,

    /// CSV file of liabilities
    #[arg(long)]
    liabilities: Option<PathBuf>,

    /// CSV file of income streams
    #[arg(long)]
    income: Option<PathBuf>,

    /// Currency code override (e.g. GBP, AUD)
    #[arg(short, long)]
    currency: Option<String>,
}

impl PortfolioArgs {
    /// Read and build the portfolio, logging any data quality warnings.
    pub fn read(&self) -> anyhow::Result<Portfolio> {
        let (portfolio, warnings) = self.read_with_warnings()?;
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        Ok(portfolio)
    }

    /// Read and build the portfolio, handing warnings back to the caller.
    pub fn read_with_warnings(&self) -> anyhow::Result<(Portfolio, Vec<Warning>)> {
        let mut input = self.read_input()?;
        if let Some(currency) = &self.currency {
            input.currency = currency.clone();
        }
        let today = chrono::Local::now().date_naive();
        let (portfolio, warnings) = build_portfolio(input, today)?;
        Ok((portfolio, warnings))
    }

    fn read_input(&self) -> anyhow::Result<PortfolioInput> {
        if let Some(path) = &self.portfolio {
            return if path.as_os_str() == "-" {
                read_json_from_stdin()
            } else {
                read_json_from_file(path)
            };
        }

        if self.assets.is_none() && self.liabilities.is_none() && self.income.is_none() {
            anyhow::bail!(
                "No input provided. Pass --portfolio (JSON) or --assets/--liabilities/--income (CSV)."
            );
        }

        let mut input = PortfolioInput::default();
        if let Some(path) = &self.assets {
            input.assets = read_items_csv(BufReader::new(File::open(path)?))?;
        }
        if let Some(path) = &self.liabilities {
            input.liabilities = read_items_csv(BufReader::new(File::open(path)?))?;
        }
        if let Some(path) = &self.income {
            input.income = read_income_csv(BufReader::new(File::open(path)?))?;
        }
        Ok(input)
    }
}

fn read_json_from_file(path: &Path) -> anyhow::Result<PortfolioInput> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let input = read_portfolio_json(reader)?;
    Ok(input)
}

fn read_json_from_stdin() -> anyhow::Result<PortfolioInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let cursor = io::Cursor::new(buffer);
    let input = read_portfolio_json(cursor)?;
    Ok(input)
}
