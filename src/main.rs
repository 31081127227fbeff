use clap::{Parser, Subcommand};

mod cmd;
mod core;

#[derive(Parser, Debug)]
#[command(
    name = "finc",
    version,
    about = "Personal finance calculator for net worth, cash flow and income tax"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net worth and cash flow at a glance
    Overview(cmd::overview::OverviewCommand),
    /// Itemized view of assets and liabilities
    Items(cmd::items::ItemsCommand),
    /// Per-stream income, tax and net monthly figures
    Income(cmd::income::IncomeCommand),
    /// Progressive tax breakdown for an amount
    Tax(cmd::tax::TaxCommand),
    /// Reconstructed net-worth series and snapshot recording
    History(cmd::history::HistoryCommand),
    /// Check input data for quality issues
    Validate(cmd::validate::ValidateCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Overview(cmd) => cmd.exec(),
        Command::Items(cmd) => cmd.exec(),
        Command::Income(cmd) => cmd.exec(),
        Command::Tax(cmd) => cmd.exec(),
        Command::History(cmd) => cmd.exec(),
        Command::Validate(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
