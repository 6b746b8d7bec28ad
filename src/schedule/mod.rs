//! Derived state for installment plans and recurring transactions.
//!
//! Everything here is computed from records the server already returned:
//! overdue and due-soon classification, progress, next due dates. Occurrence
//! generation itself stays on the server.

pub mod installment;
pub mod recurring;
pub mod time_interval;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub use installment::InstallmentPlan;
pub use recurring::RecurringSchedule;
pub use time_interval::RecurrenceRule;

pub const DEFAULT_DUE_SOON_DAYS: u32 = 7;
const MAX_PROJECTED_OCCURRENCES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Completed,
    Paused,
    Ended,
    Overdue,
    DueSoon,
    Upcoming,
}

impl PaymentStatus {
    /// Classifies a due date relative to `reference`.
    pub fn classify(due: NaiveDate, reference: NaiveDate, due_soon_days: u32) -> PaymentStatus {
        if due < reference {
            return PaymentStatus::Overdue;
        }
        let cutoff = reference + Duration::days(due_soon_days as i64);
        if due <= cutoff {
            PaymentStatus::DueSoon
        } else {
            PaymentStatus::Upcoming
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, PaymentStatus::Overdue | PaymentStatus::DueSoon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_windows() {
        let reference = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2025, 5, d).unwrap();
        assert_eq!(PaymentStatus::classify(day(9), reference, 7), PaymentStatus::Overdue);
        assert_eq!(PaymentStatus::classify(day(10), reference, 7), PaymentStatus::DueSoon);
        assert_eq!(PaymentStatus::classify(day(17), reference, 7), PaymentStatus::DueSoon);
        assert_eq!(PaymentStatus::classify(day(18), reference, 7), PaymentStatus::Upcoming);
        assert!(PaymentStatus::Overdue.needs_attention());
        assert!(!PaymentStatus::Upcoming.needs_attention());
    }
}
