use super::income::{Frequency, IncomeItem};
use super::item::{FinancialItem, ItemDetail, ItemKind, PropertyDetails};
use super::portfolio::Portfolio;
use super::tax::{TaxBracket, TaxTables};
use super::warnings::Warning;
use chrono::NaiveDate;
use finc_derive::CsvSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Read;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PortfolioError {
    #[error("duplicate item id: {0}")]
    DuplicateItemId(String),
    #[error("duplicate income id: {0}")]
    DuplicateIncomeId(String),
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("tax table for {currency} has invalid rate {rate} (expected a fraction between 0 and 1)")]
    InvalidBracketRate { currency: String, rate: Decimal },
    #[error("tax table for {currency} has bracket max {max} below min {min}")]
    InvalidBracketBounds {
        currency: String,
        min: Decimal,
        max: Decimal,
    },
}

/// CSV column metadata generated by the CsvSchema derive.
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Input root for a portfolio JSON file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PortfolioInput {
    /// ISO currency code the whole portfolio is denominated in
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub assets: Vec<ItemRecord>,
    #[serde(default)]
    pub liabilities: Vec<ItemRecord>,
    #[serde(default)]
    pub income: Vec<IncomeRecord>,
    /// Extra or replacement bracket tables keyed by currency code
    #[serde(default)]
    pub tax_tables: HashMap<String, Vec<TaxBracket>>,
}

impl Default for PortfolioInput {
    fn default() -> Self {
        PortfolioInput {
            currency: default_currency(),
            assets: Vec::new(),
            liabilities: Vec::new(),
            income: Vec::new(),
            tax_tables: HashMap::new(),
        }
    }
}

fn default_currency() -> String {
    "GBP".to_string()
}

/// Flat input row for an asset or liability, shared by CSV and JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct ItemRecord {
    /// Unique identifier for this item
    pub id: String,
    /// Display name (e.g. "Family Home", "Car Loan")
    pub label: String,
    /// Item kind: Simple or Property (defaults to Simple)
    #[serde(default, rename = "type")]
    pub kind: Option<ItemKind>,
    /// Acquisition date (YYYY-MM-DD), used for as-of filtering
    #[serde(deserialize_with = "deserialize_date")]
    #[schemars(with = "String")]
    pub date_acquired: NaiveDate,
    /// Stored value for Simple items; ignored for Property rows, whose value
    /// is derived from the mortgage fields
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub value: Option<Decimal>,
    /// Property purchase price
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub purchase_price: Option<Decimal>,
    /// Property current market value
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub current_value: Option<Decimal>,
    /// Mortgage principal owing
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub mortgage_owing: Option<Decimal>,
    /// Offset account balance netted against the mortgage
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub offset_account: Option<Decimal>,
    /// Mortgage interest rate in percent (informational)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub interest_rate: Option<Decimal>,
    /// Monthly mortgage repayment, counted as a monthly expense
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub monthly_repayment: Option<Decimal>,
}

/// Flat input row for an income stream, shared by CSV and JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct IncomeRecord {
    /// Unique identifier for this income stream
    pub id: String,
    /// Display name (e.g. "Salary", "Dividends")
    pub label: String,
    /// Gross amount per payment period
    #[schemars(with = "f64")]
    pub value: Decimal,
    /// Payment frequency: Monthly or Annually (defaults to Monthly)
    #[serde(default)]
    pub frequency: Option<Frequency>,
    /// Subject to progressive tax (defaults to true); set false for streams
    /// already taxed at source
    #[serde(default)]
    pub is_salary: Option<bool>,
}

/// Read a portfolio input file from JSON
pub fn read_portfolio_json<R: Read>(reader: R) -> anyhow::Result<PortfolioInput> {
    let input: PortfolioInput = serde_json::from_reader(reader)?;
    Ok(input)
}

/// Read asset/liability rows from CSV
pub fn read_items_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ItemRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Read income rows from CSV
pub fn read_income_csv<R: Read>(reader: R) -> anyhow::Result<Vec<IncomeRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Convert input records into the domain portfolio plus any data quality
/// warnings. `today` anchors the future-acquisition check.
pub fn build_portfolio(
    input: PortfolioInput,
    today: NaiveDate,
) -> Result<(Portfolio, Vec<Warning>), PortfolioError> {
    validate_tax_tables(&input.tax_tables)?;

    let currency = input.currency.trim().to_uppercase();
    let tax_tables = TaxTables::with_overrides(input.tax_tables);

    let mut warnings = Vec::new();
    if tax_tables.for_currency(&currency).is_empty() {
        warnings.push(Warning::UnknownCurrency {
            code: currency.clone(),
        });
    }

    // assets and liabilities share one id namespace
    let mut seen = HashSet::new();
    for record in input.assets.iter().chain(&input.liabilities) {
        if !seen.insert(record.id.clone()) {
            return Err(PortfolioError::DuplicateItemId(record.id.clone()));
        }
    }
    let mut seen_income = HashSet::new();
    for record in &input.income {
        if !seen_income.insert(record.id.clone()) {
            return Err(PortfolioError::DuplicateIncomeId(record.id.clone()));
        }
    }

    let assets: Vec<FinancialItem> = input
        .assets
        .iter()
        .map(|r| convert_item(r, today, &mut warnings))
        .collect();
    let liabilities: Vec<FinancialItem> = input
        .liabilities
        .iter()
        .map(|r| convert_item(r, today, &mut warnings))
        .collect();
    let income: Vec<IncomeItem> = input
        .income
        .iter()
        .map(|r| convert_income(r, &mut warnings))
        .collect();

    Ok((
        Portfolio {
            currency,
            assets,
            liabilities,
            income,
            tax_tables,
        },
        warnings,
    ))
}

fn convert_item(record: &ItemRecord, today: NaiveDate, warnings: &mut Vec<Warning>) -> FinancialItem {
    if record.date_acquired > today {
        warnings.push(Warning::FutureAcquisition {
            id: record.id.clone(),
            date: record.date_acquired,
        });
    }

    let detail = match record.kind.unwrap_or_default() {
        ItemKind::Simple => {
            let value = record.value.unwrap_or_default();
            if value < Decimal::ZERO {
                warnings.push(Warning::NegativeAmount {
                    id: record.id.clone(),
                    field: "value".to_string(),
                });
            }
            ItemDetail::Simple { value }
        }
        ItemKind::Property => {
            if record.current_value.is_none() {
                warnings.push(Warning::MissingValuation {
                    id: record.id.clone(),
                });
            }
            let details = PropertyDetails {
                purchase_price: record.purchase_price.unwrap_or_default(),
                current_value: record.current_value.unwrap_or_default(),
                mortgage_owing: record.mortgage_owing.unwrap_or_default(),
                offset_account: record.offset_account.unwrap_or_default(),
                interest_rate: record.interest_rate.unwrap_or_default(),
                monthly_repayment: record.monthly_repayment.unwrap_or_default(),
            };
            for (field, amount) in [
                ("current_value", details.current_value),
                ("mortgage_owing", details.mortgage_owing),
                ("offset_account", details.offset_account),
                ("monthly_repayment", details.monthly_repayment),
            ] {
                if amount < Decimal::ZERO {
                    warnings.push(Warning::NegativeAmount {
                        id: record.id.clone(),
                        field: field.to_string(),
                    });
                }
            }
            // a stored value on a property row is redundant; flag drift
            if let Some(stored) = record.value {
                let derived = details.equity();
                if stored != derived {
                    warnings.push(Warning::PropertyValueDrift {
                        id: record.id.clone(),
                        stored,
                        derived,
                    });
                }
            }
            ItemDetail::Property(details)
        }
    };

    FinancialItem {
        id: record.id.clone(),
        label: record.label.clone(),
        date_acquired: record.date_acquired,
        detail,
    }
}

fn convert_income(record: &IncomeRecord, warnings: &mut Vec<Warning>) -> IncomeItem {
    if record.value < Decimal::ZERO {
        warnings.push(Warning::NegativeAmount {
            id: record.id.clone(),
            field: "value".to_string(),
        });
    }
    IncomeItem {
        id: record.id.clone(),
        label: record.label.clone(),
        value: record.value,
        frequency: record.frequency.unwrap_or_default(),
        is_salary: record.is_salary.unwrap_or(true),
    }
}

fn validate_tax_tables(
    tables: &HashMap<String, Vec<TaxBracket>>,
) -> Result<(), PortfolioError> {
    for (currency, brackets) in tables {
        for bracket in brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(PortfolioError::InvalidBracketRate {
                    currency: currency.clone(),
                    rate: bracket.rate,
                });
            }
            if let Some(max) = bracket.max {
                if max < bracket.min {
                    return Err(PortfolioError::InvalidBracketBounds {
                        currency: currency.clone(),
                        min: bracket.min,
                        max,
                    });
                }
            }
        }
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, PortfolioError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| PortfolioError::InvalidDate(s.to_string()))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_date(&s).map_err(|err| serde::de::Error::custom(err.to_string()))
}
