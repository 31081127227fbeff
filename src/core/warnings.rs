use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Data quality findings raised while building a portfolio from input.
/// These never abort a calculation; `validate` surfaces them and other
/// commands log them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Stored value on a property row disagrees with the derived equity.
    PropertyValueDrift {
        id: String,
        #[schemars(with = "f64")]
        stored: Decimal,
        #[schemars(with = "f64")]
        derived: Decimal,
    },
    /// Amount is negative where a non-negative figure is expected.
    NegativeAmount { id: String, field: String },
    /// Item claims to be acquired in the future.
    FutureAcquisition { id: String, date: NaiveDate },
    /// Property row has no current value.
    MissingValuation { id: String },
    /// Portfolio currency has no configured tax brackets.
    UnknownCurrency { code: String },
}

impl Warning {
    /// Short name matching the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::PropertyValueDrift { .. } => "PropertyValueDrift",
            Warning::NegativeAmount { .. } => "NegativeAmount",
            Warning::FutureAcquisition { .. } => "FutureAcquisition",
            Warning::MissingValuation { .. } => "MissingValuation",
            Warning::UnknownCurrency { .. } => "UnknownCurrency",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::PropertyValueDrift {
                id,
                stored,
                derived,
            } => write!(
                f,
                "{id}: stored value {stored} disagrees with derived equity {derived}; the derived figure is used"
            ),
            Warning::NegativeAmount { id, field } => {
                write!(f, "{id}: {field} is negative")
            }
            Warning::FutureAcquisition { id, date } => {
                write!(f, "{id}: acquisition date {date} is in the future")
            }
            Warning::MissingValuation { id } => {
                write!(f, "{id}: property has no current value, equity assumes zero")
            }
            Warning::UnknownCurrency { code } => {
                write!(f, "no tax brackets configured for {code}; income is untaxed")
            }
        }
    }
}
