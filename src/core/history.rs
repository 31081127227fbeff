use super::portfolio::Portfolio;
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A net-worth observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NetWorthPoint {
    #[schemars(with = "String")]
    pub date: NaiveDate,
    #[schemars(with = "f64")]
    pub value: Decimal,
}

/// Capped, date-ordered record of net-worth observations.
///
/// A new point is appended only when the value actually changed, an
/// observation on an already-recorded date replaces it, and the series
/// keeps at most [`Self::MAX_POINTS`] entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NetWorthHistory {
    pub points: Vec<NetWorthPoint>,
}

impl NetWorthHistory {
    pub const MAX_POINTS: usize = 365;

    /// Record an observation, honoring the append-on-change contract.
    pub fn record(&mut self, date: NaiveDate, value: Decimal) {
        if let Some(existing) = self.points.iter_mut().find(|p| p.date == date) {
            log::debug!("history: replacing {} with {}", date, value);
            existing.value = value;
            return;
        }

        if let Some(latest) = self.points.last() {
            if latest.date < date && latest.value == value {
                log::debug!("history: unchanged since {}, not recording {}", latest.date, date);
                return;
            }
        }

        log::debug!("history: recording {} = {}", date, value);
        self.points.push(NetWorthPoint { date, value });
        self.points.sort_by_key(|p| p.date);

        if self.points.len() > Self::MAX_POINTS {
            let excess = self.points.len() - Self::MAX_POINTS;
            self.points.drain(..excess);
        }
    }

    /// The most recent observation.
    pub fn latest(&self) -> Option<&NetWorthPoint> {
        self.points.last()
    }
}

/// Reconstruct a month-end net-worth series from a snapshot.
///
/// Produces one point per month ending at `end` (the final point is `end`
/// itself, earlier points fall on month-ends), each evaluated with as-of
/// acquisition filtering. Values are approximate: items are assumed to have
/// held their current value since acquisition.
pub fn monthly_series(portfolio: &Portfolio, months: u32, end: NaiveDate) -> Vec<NetWorthPoint> {
    if months == 0 {
        return Vec::new();
    }

    let mut series = Vec::with_capacity(months as usize);
    for back in (1..months).rev() {
        let date = month_end(end.checked_sub_months(Months::new(back)).unwrap_or(end));
        series.push(NetWorthPoint {
            date,
            value: portfolio.net_worth(Some(date)),
        });
    }
    series.push(NetWorthPoint {
        date: end,
        value: portfolio.net_worth(Some(end)),
    });
    series
}

/// Last day of the month containing `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt()).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::{FinancialItem, ItemDetail};
    use crate::core::tax::TaxTables;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn record_appends_changed_values() {
        let mut history = NetWorthHistory::default();
        history.record(date("2024-01-01"), dec!(1000));
        history.record(date("2024-01-02"), dec!(1100));
        assert_eq!(history.points.len(), 2);
        assert_eq!(history.latest().unwrap().value, dec!(1100));
    }

    #[test]
    fn record_skips_unchanged_values() {
        let mut history = NetWorthHistory::default();
        history.record(date("2024-01-01"), dec!(1000));
        history.record(date("2024-01-02"), dec!(1000));
        assert_eq!(history.points.len(), 1);
    }

    #[test]
    fn record_replaces_same_date() {
        let mut history = NetWorthHistory::default();
        history.record(date("2024-01-01"), dec!(1000));
        history.record(date("2024-01-01"), dec!(1200));
        assert_eq!(history.points.len(), 1);
        assert_eq!(history.latest().unwrap().value, dec!(1200));
    }

    #[test]
    fn record_keeps_points_date_ordered() {
        let mut history = NetWorthHistory::default();
        history.record(date("2024-01-10"), dec!(1000));
        history.record(date("2024-01-05"), dec!(900));
        let dates: Vec<_> = history.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date("2024-01-05"), date("2024-01-10")]);
    }

    #[test]
    fn record_caps_series_length() {
        let mut history = NetWorthHistory::default();
        let start = date("2023-01-01");
        for day in 0..400u64 {
            let d = start + chrono::Duration::days(day as i64);
            history.record(d, Decimal::from(day));
        }
        assert_eq!(history.points.len(), NetWorthHistory::MAX_POINTS);
        // the oldest points were dropped
        assert_eq!(history.points[0].date, start + chrono::Duration::days(35));
        assert_eq!(history.latest().unwrap().value, dec!(399));
    }

    #[test]
    fn month_end_handles_year_boundary_and_leap_years() {
        assert_eq!(month_end(date("2023-12-05")), date("2023-12-31"));
        assert_eq!(month_end(date("2024-02-10")), date("2024-02-29"));
        assert_eq!(month_end(date("2023-02-10")), date("2023-02-28"));
        assert_eq!(month_end(date("2024-06-30")), date("2024-06-30"));
    }

    fn snapshot() -> Portfolio {
        let item = |id: &str, value: Decimal, acquired: &str| FinancialItem {
            id: id.to_string(),
            label: id.to_string(),
            date_acquired: date(acquired),
            detail: ItemDetail::Simple { value },
        };
        Portfolio {
            currency: "GBP".to_string(),
            assets: vec![
                item("a-1", dec!(1000), "2023-11-20"),
                item("a-2", dec!(500), "2024-02-15"),
            ],
            liabilities: vec![item("l-1", dec!(200), "2024-03-01")],
            income: vec![],
            tax_tables: TaxTables::default(),
        }
    }

    #[test]
    fn monthly_series_reconstructs_acquisitions() {
        let series = monthly_series(&snapshot(), 3, date("2024-03-15"));
        assert_eq!(
            series,
            vec![
                NetWorthPoint {
                    date: date("2024-01-31"),
                    value: dec!(1000),
                },
                NetWorthPoint {
                    date: date("2024-02-29"),
                    value: dec!(1500),
                },
                NetWorthPoint {
                    date: date("2024-03-15"),
                    value: dec!(1300),
                },
            ]
        );
    }

    #[test]
    fn monthly_series_zero_months_is_empty() {
        assert!(monthly_series(&snapshot(), 0, date("2024-03-15")).is_empty());
    }

    #[test]
    fn monthly_series_single_month_is_end_date_only() {
        let series = monthly_series(&snapshot(), 1, date("2024-03-15"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date("2024-03-15"));
    }
}
