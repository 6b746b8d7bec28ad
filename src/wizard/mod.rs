//! Multi-step transaction creation: type → mode → form.

pub mod controller;
pub mod forms;
pub mod mode_filter;
pub mod state_machine;
pub mod strategy;
pub mod visibility;

pub use controller::{Submission, TransactionSink, WizardController};
pub use forms::{FieldError, FieldErrors, FormDescriptor, FormValues, ValidationError};
pub use mode_filter::{available_modes, is_mode_available};
pub use state_machine::{reduce, WizardContext, WizardEvent, WizardState};
pub use strategy::{
    strategy_for, strategy_for_name, FormStrategy, InstallmentStrategy, RecurringStrategy,
    SimpleStrategy,
};
pub use visibility::{compute_visibility, visibility_for, VisibilityDecision};
