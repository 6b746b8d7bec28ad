//! Composition root of the transaction wizard.
//!
//! The controller owns one wizard session: the step state, the values of the
//! form being filled, and the injected account list and plan features. It
//! re-derives defaults whenever the type or mode changes, keeps the
//! `visibility` field in line with the selected account, and turns submitted
//! form data into the payload sent to the transaction-creation API.

use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;

use crate::config::{Config, PlanFeatures};
use crate::domain::{Account, TransactionMode, TransactionType, Visibility};
use crate::errors::{Result, WizardError};
use crate::wizard::forms::{is_blank, FormDescriptor, FormValues, Validator};
use crate::wizard::mode_filter::{available_modes, is_mode_available};
use crate::wizard::state_machine::{reduce, WizardContext, WizardEvent, WizardState};
use crate::wizard::strategy::{strategy_for, FormStrategy};
use crate::wizard::visibility::{compute_visibility, visibility_for, VisibilityDecision};

/// Normalized payload plus the mode that decides the server endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub payload: FormValues,
    pub mode: TransactionMode,
}

/// External transaction-creation API.
pub trait TransactionSink {
    type Error: fmt::Display;

    fn create(&mut self, mode: TransactionMode, payload: &FormValues)
        -> std::result::Result<(), Self::Error>;
}

pub struct WizardController {
    state: WizardState,
    values: FormValues,
    accounts: Vec<Account>,
    features: PlanFeatures,
    today: NaiveDate,
    open: bool,
}

impl WizardController {
    pub fn new(accounts: Vec<Account>, features: PlanFeatures, today: NaiveDate) -> Self {
        Self {
            state: WizardState::Type,
            values: FormValues::new(),
            accounts,
            features,
            today,
            open: false,
        }
    }

    pub fn from_config(config: &Config, accounts: Vec<Account>, today: NaiveDate) -> Self {
        Self::new(accounts, config.features, today)
    }

    /// Replaces the account list, e.g. after the account query refreshed.
    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
        self.refresh_visibility();
    }

    pub fn open(&mut self) {
        self.open = true;
        self.dispatch(WizardEvent::Reset);
    }

    /// Closing discards the session: the machine resets and values are cleared.
    pub fn close(&mut self) {
        self.open = false;
        self.dispatch(WizardEvent::Reset);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn context(&self) -> WizardContext {
        self.state.context()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Modes offered for the selected type.
    pub fn available_modes(&self) -> Vec<TransactionMode> {
        available_modes(self.state.selected_type())
    }

    pub fn strategy(&self) -> Option<&'static dyn FormStrategy> {
        self.state.selected_mode().map(strategy_for)
    }

    pub fn select_type(&mut self, kind: TransactionType) -> WizardState {
        self.dispatch(WizardEvent::SelectType(kind))
    }

    /// Selects a mode; modes filtered out for the chosen type are refused.
    pub fn select_mode(&mut self, mode: TransactionMode) -> WizardState {
        if let Some(kind) = self.state.selected_type() {
            if !is_mode_available(Some(kind), mode) {
                tracing::warn!(%kind, %mode, "mode not offered for this transaction type");
                return self.state;
            }
        }
        self.dispatch(WizardEvent::SelectMode(mode))
    }

    pub fn go_back(&mut self) -> WizardState {
        self.dispatch(WizardEvent::GoBack)
    }

    pub fn reset(&mut self) -> WizardState {
        self.dispatch(WizardEvent::Reset)
    }

    /// Visibility decision for the account currently in the form.
    pub fn visibility_decision(&self) -> VisibilityDecision {
        self.decision_for(&self.values)
    }

    fn decision_for(&self, values: &FormValues) -> VisibilityDecision {
        let account_id = values
            .get("account_id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        compute_visibility(
            account_id,
            &self.accounts,
            self.features.allow_private_transactions,
        )
    }

    fn derived_visibility(&self, values: &FormValues) -> Visibility {
        visibility_for(&self.decision_for(values), is_free_spending(values))
    }

    /// Writes one form value. Changing the account or the free-spending flag
    /// rewrites `visibility`.
    pub fn set_field(&mut self, key: &str, value: Value) {
        if !self.state.context().is_complete {
            tracing::warn!(key, step = self.state.step(), "no form to write to");
            return;
        }
        let changed = self.values.get(key) != Some(&value);
        self.values.insert(key.to_string(), value);
        if changed && matches!(key, "account_id" | "is_free_spending") {
            self.refresh_visibility();
        }
    }

    /// Validates and normalizes `raw` into the server payload.
    pub fn submit(&self, raw: &FormValues) -> Result<Submission> {
        let WizardState::Form {
            selected_type,
            selected_mode,
        } = self.state
        else {
            tracing::warn!(step = self.state.step(), "submit outside the form step");
            return Err(WizardError::NotOnFormStep(self.state.step()));
        };

        let strategy = strategy_for(selected_mode);
        let mut input = raw.clone();
        input.insert("type".into(), Value::from(selected_type.as_str()));
        if input.get("visibility").map_or(true, is_blank) {
            let visibility = self.derived_visibility(&input);
            input.insert("visibility".into(), Value::from(visibility.as_str()));
        }
        let input = strategy.descriptor().apply_defaults(&input, self.today);

        let clean = strategy.validate(&input).map_err(|errors| {
            tracing::warn!(mode = %selected_mode, failures = errors.len(), "submission blocked");
            WizardError::Validation(errors)
        })?;
        let payload = normalize_payload(clean, strategy.descriptor());

        tracing::info!(mode = %selected_mode, kind = %selected_type, "transaction payload ready");
        Ok(Submission {
            payload,
            mode: selected_mode,
        })
    }

    /// Submits the values collected through [`set_field`](Self::set_field).
    pub fn submit_current(&self) -> Result<Submission> {
        self.submit(&self.values)
    }

    /// Submits `raw` through `sink` and closes the wizard once it is accepted.
    pub fn submit_to<S: TransactionSink>(
        &mut self,
        sink: &mut S,
        raw: &FormValues,
    ) -> Result<Submission> {
        let submission = self.submit(raw)?;
        sink.create(submission.mode, &submission.payload)
            .map_err(|err| WizardError::Rejected(err.to_string()))?;
        self.close();
        Ok(submission)
    }

    fn dispatch(&mut self, event: WizardEvent) -> WizardState {
        let previous = self.state;
        self.state = reduce(previous, event);
        if self.state != previous || matches!(event, WizardEvent::Reset) {
            self.rederive_defaults();
        }
        self.state
    }

    fn rederive_defaults(&mut self) {
        self.values = match self.state {
            WizardState::Form {
                selected_type,
                selected_mode,
            } => strategy_for(selected_mode).default_values(selected_type, self.today),
            _ => FormValues::new(),
        };
        self.refresh_visibility();
    }

    fn refresh_visibility(&mut self) {
        if !self.state.context().is_complete {
            return;
        }
        let visibility = self.derived_visibility(&self.values);
        self.values
            .insert("visibility".into(), Value::from(visibility.as_str()));
    }
}

/// Reads the free-spending flag the way the form validates it, so `"true"`
/// counts as set.
fn is_free_spending(values: &FormValues) -> bool {
    values
        .get("is_free_spending")
        .and_then(|flag| Validator::Boolean.validate(flag).ok())
        .and_then(|flag| flag.as_bool())
        .unwrap_or(false)
}

/// Applies the submission rules to validated values: free spending forces its
/// own visibility, `end_date` survives only behind a set `has_end_date`, and
/// client-only fields are stripped.
fn normalize_payload(mut payload: FormValues, descriptor: &FormDescriptor) -> FormValues {
    if payload.get("is_free_spending").and_then(Value::as_bool) == Some(true) {
        payload.insert(
            "visibility".into(),
            Value::from(Visibility::FreeSpending.as_str()),
        );
    }

    if let Some(flag) = payload.remove("has_end_date") {
        let has_end = flag.as_bool().unwrap_or(false)
            && payload.get("end_date").is_some_and(|end| !is_blank(end));
        if !has_end {
            payload.remove("end_date");
        }
    }

    for field in descriptor.fields.iter().filter(|field| field.client_only) {
        payload.remove(field.key);
    }
    payload
}
