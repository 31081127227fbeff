pub mod currency;
pub mod history;
pub mod income;
pub mod input;
pub mod item;
pub mod portfolio;
pub mod tax;
pub mod warnings;

// Flat public surface for domain types and functions.
pub use currency::{format_amount, Currency, CURRENCIES};
pub use history::{monthly_series, NetWorthHistory, NetWorthPoint};
pub use income::{Frequency, IncomeItem};
pub use input::{
    build_portfolio, read_income_csv, read_items_csv, read_portfolio_json, CsvField, IncomeRecord,
    ItemRecord, PortfolioError, PortfolioInput,
};
pub use item::{FinancialItem, ItemDetail, ItemKind, PropertyDetails};
pub use portfolio::Portfolio;
pub use tax::{bracket_slices, calculate_tax, BracketSlice, TaxBracket, TaxTables};
pub use warnings::Warning;
