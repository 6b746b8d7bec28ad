use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Frequency;

/// Step between two occurrences: `interval` units of `frequency`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(deserialize_with = "at_least_one")]
    pub interval: u32,
}

fn at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)?.max(1))
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval: interval.max(1),
        }
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly, 1)
    }

    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        self.shift(from, self.interval as i32)
    }

    pub fn previous_date(&self, from: NaiveDate) -> NaiveDate {
        self.shift(from, -(self.interval as i32))
    }

    /// Moves `steps` occurrences away from `from`, computed from the anchor so
    /// that month-end clamping does not drift (Jan 31 → Feb 28 → Mar 31).
    pub fn add_to(&self, from: NaiveDate, steps: i32) -> NaiveDate {
        self.shift(from, steps.saturating_mul(self.interval as i32))
    }

    pub fn label(&self) -> String {
        match (self.interval, self.frequency) {
            (1, Frequency::Daily) => "Daily".into(),
            (1, Frequency::Weekly) => "Weekly".into(),
            (1, Frequency::Monthly) => "Monthly".into(),
            (1, Frequency::Yearly) => "Yearly".into(),
            (n, frequency) => {
                let unit = match frequency {
                    Frequency::Daily => "day",
                    Frequency::Weekly => "week",
                    Frequency::Monthly => "month",
                    Frequency::Yearly => "year",
                };
                format!("Every {} {}s", n, unit)
            }
        }
    }

    fn shift(&self, from: NaiveDate, units: i32) -> NaiveDate {
        match self.frequency {
            Frequency::Daily => from + Duration::days(units as i64),
            Frequency::Weekly => from + Duration::weeks(units as i64),
            Frequency::Monthly => shift_month(from, units),
            Frequency::Yearly => shift_month(from, units.saturating_mul(12)),
        }
    }
}

pub(crate) fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_date_per_frequency() {
        let start = date(2025, 1, 1);
        assert_eq!(RecurrenceRule::new(Frequency::Daily, 3).next_date(start), date(2025, 1, 4));
        assert_eq!(RecurrenceRule::new(Frequency::Weekly, 2).next_date(start), date(2025, 1, 15));
        assert_eq!(RecurrenceRule::monthly().next_date(start), date(2025, 2, 1));
        assert_eq!(RecurrenceRule::new(Frequency::Yearly, 1).next_date(start), date(2026, 1, 1));
    }

    #[test]
    fn month_end_is_clamped() {
        let rule = RecurrenceRule::monthly();
        assert_eq!(rule.next_date(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(rule.next_date(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(rule.add_to(date(2025, 1, 31), 2), date(2025, 3, 31));
        assert_eq!(rule.previous_date(date(2025, 3, 31)), date(2025, 2, 28));
    }

    #[test]
    fn add_to_crosses_year_boundaries() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 3);
        assert_eq!(rule.add_to(date(2025, 11, 15), 1), date(2026, 2, 15));
        assert_eq!(rule.add_to(date(2025, 2, 15), -1), date(2024, 11, 15));
        assert_eq!(rule.add_to(date(2025, 2, 15), 0), date(2025, 2, 15));
    }

    #[test]
    fn zero_interval_is_bumped_to_one() {
        assert_eq!(RecurrenceRule::new(Frequency::Daily, 0).interval, 1);
    }

    #[test]
    fn zero_interval_from_json_is_bumped_to_one() {
        let rule: RecurrenceRule =
            serde_json::from_str(r#"{"frequency":"MONTHLY","interval":0}"#).unwrap();
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.next_date(date(2025, 1, 1)), date(2025, 2, 1));
    }

    #[test]
    fn labels() {
        assert_eq!(RecurrenceRule::monthly().label(), "Monthly");
        assert_eq!(RecurrenceRule::new(Frequency::Weekly, 2).label(), "Every 2 weeks");
    }
}
