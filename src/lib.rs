#![doc(test(attr(deny(warnings))))]

//! FinDuo core holds the client-side business rules of the transaction
//! creation flow: the type → mode → form wizard, per-mode form strategies,
//! visibility rules for joint and personal accounts, and the derived schedule
//! state of installment plans and recurring transactions.

pub mod config;
pub mod domain;
pub mod errors;
pub mod schedule;
pub mod utils;
pub mod wizard;

use std::sync::Once;

pub use errors::{Result, WizardError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("FinDuo core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
