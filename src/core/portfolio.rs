use super::income::IncomeItem;
use super::item::{FinancialItem, ItemKind};
use super::tax::{TaxBracket, TaxTables};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A point-in-time snapshot of everything the calculator works over:
/// asset and liability items, income streams, the denomination currency
/// and the bracket tables in force.
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Upper-case ISO currency code
    pub currency: String,
    pub assets: Vec<FinancialItem>,
    pub liabilities: Vec<FinancialItem>,
    pub income: Vec<IncomeItem>,
    pub tax_tables: TaxTables,
}

impl Portfolio {
    /// Brackets for this portfolio's currency (empty when unconfigured).
    pub fn brackets(&self) -> &[TaxBracket] {
        self.tax_tables.for_currency(&self.currency)
    }

    /// Total asset value, optionally as of a past date.
    ///
    /// With `as_of`, items acquired later are excluded; item values are
    /// assumed constant since acquisition.
    pub fn total_assets(&self, as_of: Option<NaiveDate>) -> Decimal {
        sum_values(&self.assets, as_of)
    }

    /// Total liability value, optionally as of a past date.
    pub fn total_liabilities(&self, as_of: Option<NaiveDate>) -> Decimal {
        sum_values(&self.liabilities, as_of)
    }

    /// Assets less liabilities, optionally as of a past date.
    pub fn net_worth(&self, as_of: Option<NaiveDate>) -> Decimal {
        let net = self.total_assets(as_of) - self.total_liabilities(as_of);
        log::debug!(
            "net worth{}: {}",
            as_of.map(|d| format!(" as of {d}")).unwrap_or_default(),
            net
        );
        net
    }

    /// Net monthly income across all streams, after bracket tax.
    pub fn total_monthly_income(&self) -> Decimal {
        let brackets = self.brackets();
        self.income.iter().map(|i| i.net_monthly(brackets)).sum()
    }

    /// Monthly outgoings: the repayment schedules carried by property
    /// assets. Liability items have no repayment field.
    pub fn total_monthly_expenses(&self) -> Decimal {
        self.assets.iter().map(|i| i.monthly_repayment()).sum()
    }

    /// Net monthly income less monthly expenses.
    pub fn monthly_cash_flow(&self) -> Decimal {
        self.total_monthly_income() - self.total_monthly_expenses()
    }

    /// Asset totals grouped by item kind, skipping kinds with no items.
    pub fn kind_breakdown(&self) -> Vec<(ItemKind, Decimal)> {
        [ItemKind::Property, ItemKind::Simple]
            .into_iter()
            .filter_map(|kind| {
                let of_kind: Vec<&FinancialItem> =
                    self.assets.iter().filter(|i| i.kind() == kind).collect();
                if of_kind.is_empty() {
                    return None;
                }
                Some((kind, of_kind.iter().map(|i| i.value()).sum()))
            })
            .collect()
    }
}

fn sum_values(items: &[FinancialItem], as_of: Option<NaiveDate>) -> Decimal {
    items
        .iter()
        .filter(|i| as_of.is_none_or(|d| i.acquired_by(d)))
        .map(|i| i.value())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::income::Frequency;
    use crate::core::item::{ItemDetail, PropertyDetails};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn simple(id: &str, label: &str, value: Decimal, acquired: &str) -> FinancialItem {
        FinancialItem {
            id: id.to_string(),
            label: label.to_string(),
            date_acquired: date(acquired),
            detail: ItemDetail::Simple { value },
        }
    }

    fn house() -> FinancialItem {
        FinancialItem {
            id: "a-house".to_string(),
            label: "Family Home".to_string(),
            date_acquired: date("2020-01-15"),
            detail: ItemDetail::Property(PropertyDetails {
                purchase_price: dec!(450000),
                current_value: dec!(500000),
                mortgage_owing: dec!(350000),
                offset_account: dec!(25000),
                interest_rate: dec!(4.5),
                monthly_repayment: dec!(1800),
            }),
        }
    }

    fn stream(id: &str, value: Decimal, frequency: Frequency, is_salary: bool) -> IncomeItem {
        IncomeItem {
            id: id.to_string(),
            label: id.to_string(),
            value,
            frequency,
            is_salary,
        }
    }

    fn portfolio() -> Portfolio {
        Portfolio {
            currency: "GBP".to_string(),
            assets: vec![
                house(),
                simple("a-car", "Tesla Model 3", dec!(45000), "2022-06-01"),
                simple("a-savings", "Emergency Fund", dec!(15000), "2021-03-10"),
                simple("a-shares", "Share Portfolio", dec!(75000), "2019-12-01"),
            ],
            liabilities: vec![
                simple("l-car-loan", "Car Loan", dec!(25000), "2022-06-01"),
                simple("l-credit-card", "Credit Card", dec!(2500), "2023-12-15"),
            ],
            income: vec![
                stream("salary", dec!(85000), Frequency::Annually, true),
                stream("freelance", dec!(2000), Frequency::Monthly, false),
                stream("dividends", dec!(3600), Frequency::Annually, false),
            ],
            tax_tables: TaxTables::default(),
        }
    }

    #[test]
    fn totals_use_derived_property_equity() {
        let p = portfolio();
        // house contributes 175000, not its 500000 market value
        assert_eq!(p.total_assets(None), dec!(310000));
        assert_eq!(p.total_liabilities(None), dec!(27500));
        assert_eq!(p.net_worth(None), dec!(282500));
    }

    #[test]
    fn as_of_excludes_later_acquisitions() {
        let p = portfolio();
        // only the house and the share portfolio existed at 2021-01-01
        assert_eq!(p.total_assets(Some(date("2021-01-01"))), dec!(250000));
        assert_eq!(p.total_liabilities(Some(date("2021-01-01"))), dec!(0));
        assert_eq!(p.net_worth(Some(date("2021-01-01"))), dec!(250000));
    }

    #[test]
    fn as_of_before_everything_is_zero() {
        let p = portfolio();
        assert_eq!(p.net_worth(Some(date("2019-01-01"))), dec!(0));
    }

    #[test]
    fn monthly_income_taxes_salary_only() {
        let p = portfolio();
        // salary: (85000 - 21431.40) / 12, freelance 2000, dividends 300
        let expected = dec!(63568.60) / dec!(12) + dec!(2300);
        assert_eq!(p.total_monthly_income(), expected);
    }

    #[test]
    fn expenses_are_property_repayments_only() {
        let p = portfolio();
        // liabilities contribute nothing, only the house repayment counts
        assert_eq!(p.total_monthly_expenses(), dec!(1800));
    }

    #[test]
    fn cash_flow_is_income_less_expenses() {
        let p = portfolio();
        assert_eq!(
            p.monthly_cash_flow(),
            p.total_monthly_income() - p.total_monthly_expenses()
        );
    }

    #[test]
    fn recomputation_is_drift_free() {
        let p = portfolio();
        assert_eq!(p.net_worth(None), p.net_worth(None));
        assert_eq!(p.monthly_cash_flow(), p.monthly_cash_flow());
    }

    #[test]
    fn kind_breakdown_groups_assets() {
        let p = portfolio();
        assert_eq!(
            p.kind_breakdown(),
            vec![
                (ItemKind::Property, dec!(175000)),
                (ItemKind::Simple, dec!(135000)),
            ]
        );
    }

    #[test]
    fn kind_breakdown_skips_absent_kinds() {
        let mut p = portfolio();
        p.assets.retain(|i| i.kind() == ItemKind::Simple);
        assert_eq!(p.kind_breakdown(), vec![(ItemKind::Simple, dec!(135000))]);
    }

    #[test]
    fn unknown_currency_leaves_income_untaxed() {
        let mut p = portfolio();
        p.currency = "XYZ".to_string();
        assert!(p.brackets().is_empty());
        assert_eq!(
            p.total_monthly_income(),
            dec!(85000) / dec!(12) + dec!(2300)
        );
    }
}
