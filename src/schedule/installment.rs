use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PaymentStatus, RecurrenceRule};

/// Installment plan as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub total_amount: f64,
    pub total_installments: u32,
    #[serde(default)]
    pub paid_installments: u32,
    pub first_installment_date: NaiveDate,
}

impl InstallmentPlan {
    fn total_cents(&self) -> i64 {
        (self.total_amount * 100.0).round() as i64
    }

    fn count(&self) -> i64 {
        self.total_installments.max(1) as i64
    }

    fn paid_count(&self) -> u32 {
        self.paid_installments.min(self.total_installments)
    }

    /// Amount of every parcel but the last.
    pub fn installment_amount(&self) -> f64 {
        (self.total_cents() / self.count()) as f64 / 100.0
    }

    /// The last parcel absorbs the rounding remainder.
    pub fn last_installment_amount(&self) -> f64 {
        let base = self.total_cents() / self.count();
        (self.total_cents() - base * (self.count() - 1)) as f64 / 100.0
    }

    /// Every parcel in order; they add up to `total_amount`.
    pub fn parcels(&self) -> Vec<f64> {
        let count = self.total_installments.max(1) as usize;
        let mut parcels = vec![self.installment_amount(); count];
        if let Some(last) = parcels.last_mut() {
            *last = self.last_installment_amount();
        }
        parcels
    }

    pub fn paid_amount(&self) -> f64 {
        let cents: i64 = self
            .parcels()
            .iter()
            .take(self.paid_count() as usize)
            .map(|parcel| (parcel * 100.0).round() as i64)
            .sum();
        cents as f64 / 100.0
    }

    pub fn remaining_amount(&self) -> f64 {
        let paid = (self.paid_amount() * 100.0).round() as i64;
        (self.total_cents() - paid) as f64 / 100.0
    }

    /// Share of parcels already paid, 0 to 100.
    pub fn progress_percentage(&self) -> f64 {
        if self.total_installments == 0 {
            return 0.0;
        }
        self.paid_count() as f64 / self.total_installments as f64 * 100.0
    }

    pub fn is_completed(&self) -> bool {
        self.total_installments > 0 && self.paid_installments >= self.total_installments
    }

    /// Due date of the zero-based parcel `index`; parcels fall monthly.
    pub fn due_date(&self, index: u32) -> Option<NaiveDate> {
        if index >= self.total_installments {
            return None;
        }
        Some(RecurrenceRule::monthly().add_to(self.first_installment_date, index as i32))
    }

    pub fn next_due_date(&self) -> Option<NaiveDate> {
        if self.is_completed() {
            None
        } else {
            self.due_date(self.paid_count())
        }
    }

    pub fn final_due_date(&self) -> Option<NaiveDate> {
        self.total_installments
            .checked_sub(1)
            .and_then(|last| self.due_date(last))
    }

    /// Unpaid parcels whose due date is before `reference`.
    pub fn overdue_installments(&self, reference: NaiveDate) -> u32 {
        (self.paid_count()..self.total_installments)
            .filter_map(|index| self.due_date(index))
            .take_while(|due| *due < reference)
            .count() as u32
    }

    pub fn status(&self, reference: NaiveDate, due_soon_days: u32) -> PaymentStatus {
        match self.next_due_date() {
            None => PaymentStatus::Completed,
            Some(due) => PaymentStatus::classify(due, reference, due_soon_days),
        }
    }
}
