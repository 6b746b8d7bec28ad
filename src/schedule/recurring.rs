use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PaymentStatus, RecurrenceRule, MAX_PROJECTED_OCCURRENCES};

/// Recurring transaction template as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringSchedule {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(flatten)]
    pub rule: RecurrenceRule,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Next occurrence as tracked by the server, if it reported one.
    #[serde(default)]
    pub next_occurrence: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl RecurringSchedule {
    pub fn is_past_end(&self, reference: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| reference > end)
    }

    fn within_end(&self, date: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| date <= end)
    }

    /// Scheduled dates from the start, stopping at the end date.
    fn occurrences(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..MAX_PROJECTED_OCCURRENCES as i32)
            .map(move |step| self.rule.add_to(self.start_date, step))
            .take_while(move |date| self.within_end(*date))
    }

    /// Next date money is expected. The server-tracked occurrence wins; without
    /// one the first scheduled date on or after `reference` is used.
    pub fn next_due(&self, reference: NaiveDate) -> Option<NaiveDate> {
        if !self.is_active {
            return None;
        }
        match self.next_occurrence {
            Some(next) => Some(next).filter(|date| self.within_end(*date)),
            None => self.occurrences().find(|date| *date >= reference),
        }
    }

    /// Up to `limit` scheduled dates on or after `from`.
    pub fn upcoming(&self, from: NaiveDate, limit: usize) -> Vec<NaiveDate> {
        if !self.is_active {
            return Vec::new();
        }
        self.occurrences()
            .filter(|date| *date >= from)
            .take(limit)
            .collect()
    }

    pub fn status(&self, reference: NaiveDate, due_soon_days: u32) -> PaymentStatus {
        if !self.is_active {
            return PaymentStatus::Paused;
        }
        if self.is_past_end(reference) {
            return PaymentStatus::Ended;
        }
        match self.next_due(reference) {
            Some(due) => PaymentStatus::classify(due, reference, due_soon_days),
            None => PaymentStatus::Ended,
        }
    }
}
