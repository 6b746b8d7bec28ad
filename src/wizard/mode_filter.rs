use crate::domain::{TransactionMode, TransactionType};

/// Modes that may be offered for `kind`. Installment plans are expense-only;
/// with no type chosen yet every mode is listed.
pub fn available_modes(kind: Option<TransactionType>) -> Vec<TransactionMode> {
    match kind {
        Some(TransactionType::Income) => vec![TransactionMode::Simple, TransactionMode::Recurring],
        Some(TransactionType::Expense) | None => TransactionMode::ALL.to_vec(),
    }
}

pub fn is_mode_available(kind: Option<TransactionType>, mode: TransactionMode) -> bool {
    available_modes(kind).contains(&mode)
}
