#![allow(dead_code)]

use chrono::NaiveDate;
use finduo_core::config::PlanFeatures;
use finduo_core::domain::Account;
use finduo_core::wizard::{FormValues, WizardController};
use serde_json::Value;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub fn accounts() -> Vec<Account> {
    vec![
        Account::joint("acc1", "Household"),
        Account::personal("acc2", "Ana's card"),
        Account::personal("acc3", "Bruno's wallet"),
    ]
}

/// Opened controller over the shared account fixture.
pub fn open_wizard(allow_private_transactions: bool) -> WizardController {
    let mut wizard = WizardController::new(
        accounts(),
        PlanFeatures {
            allow_private_transactions,
        },
        today(),
    );
    wizard.open();
    wizard
}

pub fn form(raw: Value) -> FormValues {
    raw.as_object().cloned().expect("form fixture must be an object")
}
