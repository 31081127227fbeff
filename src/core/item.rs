use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of financial item, controls how its value is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum ItemKind {
    #[default]
    Simple,
    Property,
}

impl ItemKind {
    pub fn display(&self) -> &'static str {
        match self {
            ItemKind::Simple => "Simple",
            ItemKind::Property => "Property",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Property financials. The item value is always derived from these fields;
/// there is no independently stored value to drift out of sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDetails {
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    pub mortgage_owing: Decimal,
    pub offset_account: Decimal,
    /// Interest rate in percent, informational only
    pub interest_rate: Decimal,
    pub monthly_repayment: Decimal,
}

impl PropertyDetails {
    /// Mortgage owing net of the offset balance, floored at zero.
    /// An offset larger than the mortgage never produces a negative debt.
    pub fn effective_mortgage(&self) -> Decimal {
        (self.mortgage_owing - self.offset_account).max(Decimal::ZERO)
    }

    /// Equity: current value less the effective mortgage. May be negative.
    pub fn equity(&self) -> Decimal {
        self.current_value - self.effective_mortgage()
    }
}

#[derive(Debug, Clone)]
pub enum ItemDetail {
    Simple { value: Decimal },
    Property(PropertyDetails),
}

/// A single asset or liability line item.
#[derive(Debug, Clone)]
pub struct FinancialItem {
    pub id: String,
    pub label: String,
    pub date_acquired: NaiveDate,
    pub detail: ItemDetail,
}

impl FinancialItem {
    /// The value this item contributes to totals.
    ///
    /// Properties contribute their equity, everything else the stored value.
    /// A property is never counted by both a stored value and its mortgage
    /// fields at the same time.
    pub fn value(&self) -> Decimal {
        match &self.detail {
            ItemDetail::Simple { value } => *value,
            ItemDetail::Property(p) => p.equity(),
        }
    }

    /// Monthly repayment outgoing (zero for simple items).
    pub fn monthly_repayment(&self) -> Decimal {
        match &self.detail {
            ItemDetail::Simple { .. } => Decimal::ZERO,
            ItemDetail::Property(p) => p.monthly_repayment,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match &self.detail {
            ItemDetail::Simple { .. } => ItemKind::Simple,
            ItemDetail::Property(_) => ItemKind::Property,
        }
    }

    /// Whether the item already existed on the given date.
    pub fn acquired_by(&self, date: NaiveDate) -> bool {
        self.date_acquired <= date
    }
}
