use super::tax::{calculate_tax, TaxBracket};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Payment frequency for an income stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Frequency {
    #[default]
    Monthly,
    Annually,
}

impl Frequency {
    pub fn display(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Annually => "Annually",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// An income stream (salary, freelance work, dividends, ...).
#[derive(Debug, Clone)]
pub struct IncomeItem {
    pub id: String,
    pub label: String,
    /// Gross amount per payment period
    pub value: Decimal,
    pub frequency: Frequency,
    /// Subject to progressive tax. Streams taxed elsewhere pass through.
    pub is_salary: bool,
}

impl IncomeItem {
    /// Annualized gross amount.
    pub fn annual_gross(&self) -> Decimal {
        match self.frequency {
            Frequency::Monthly => self.value * dec!(12),
            Frequency::Annually => self.value,
        }
    }

    /// Annual tax due on this stream under the given brackets.
    /// Non-salary streams owe nothing here.
    pub fn annual_tax(&self, brackets: &[TaxBracket]) -> Decimal {
        if self.is_salary {
            calculate_tax(self.annual_gross(), brackets)
        } else {
            Decimal::ZERO
        }
    }

    /// Monthly amount net of tax.
    ///
    /// Annualizes, deducts bracket tax, and divides by twelve, so the result
    /// does not depend on whether the same annual amount was entered as
    /// monthly or annual.
    pub fn net_monthly(&self, brackets: &[TaxBracket]) -> Decimal {
        let annual = self.annual_gross();
        (annual - self.annual_tax(brackets)) / dec!(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tax::TaxTables;

    fn gbp() -> Vec<TaxBracket> {
        TaxTables::default().for_currency("GBP").to_vec()
    }

    fn income(value: Decimal, frequency: Frequency, is_salary: bool) -> IncomeItem {
        IncomeItem {
            id: "i-1".to_string(),
            label: "Income".to_string(),
            value,
            frequency,
            is_salary,
        }
    }

    #[test]
    fn annual_gross_normalizes_frequency() {
        assert_eq!(
            income(dec!(5000), Frequency::Monthly, true).annual_gross(),
            dec!(60000)
        );
        assert_eq!(
            income(dec!(60000), Frequency::Annually, true).annual_gross(),
            dec!(60000)
        );
    }

    #[test]
    fn salary_is_taxed_through_brackets() {
        let salary = income(dec!(60000), Frequency::Annually, true);
        assert_eq!(salary.annual_tax(&gbp()), dec!(11431.40));
        assert_eq!(salary.net_monthly(&gbp()), dec!(48568.60) / dec!(12));
    }

    #[test]
    fn equivalent_monthly_and_annual_amounts_net_the_same() {
        let annual = income(dec!(60000), Frequency::Annually, true);
        let monthly = income(dec!(5000), Frequency::Monthly, true);
        assert_eq!(annual.net_monthly(&gbp()), monthly.net_monthly(&gbp()));
    }

    #[test]
    fn non_salary_passes_through_untaxed() {
        let freelance = income(dec!(2000), Frequency::Monthly, false);
        assert_eq!(freelance.annual_tax(&gbp()), dec!(0));
        assert_eq!(freelance.net_monthly(&gbp()), dec!(2000));

        let dividends = income(dec!(3600), Frequency::Annually, false);
        assert_eq!(dividends.net_monthly(&gbp()), dec!(300));
    }

    #[test]
    fn salary_with_empty_table_is_untaxed() {
        let salary = income(dec!(60000), Frequency::Annually, true);
        assert_eq!(salary.net_monthly(&[]), dec!(5000));
    }
}
