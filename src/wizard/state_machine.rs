//! Step reducer for the transaction wizard (type → mode → form).

use serde::{Deserialize, Serialize};

use crate::domain::{TransactionMode, TransactionType};

/// Wizard position. Each variant carries exactly the selections made so far,
/// so a mode can never exist without a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum WizardState {
    #[default]
    Type,
    Mode {
        selected_type: TransactionType,
    },
    Form {
        selected_type: TransactionType,
        selected_mode: TransactionMode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    SelectType(TransactionType),
    SelectMode(TransactionMode),
    GoBack,
    Reset,
}

/// Flags derived from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardContext {
    pub can_go_back: bool,
    pub is_complete: bool,
}

impl WizardState {
    pub fn step(&self) -> &'static str {
        match self {
            WizardState::Type => "type",
            WizardState::Mode { .. } => "mode",
            WizardState::Form { .. } => "form",
        }
    }

    pub fn selected_type(&self) -> Option<TransactionType> {
        match self {
            WizardState::Type => None,
            WizardState::Mode { selected_type } | WizardState::Form { selected_type, .. } => {
                Some(*selected_type)
            }
        }
    }

    pub fn selected_mode(&self) -> Option<TransactionMode> {
        match self {
            WizardState::Form { selected_mode, .. } => Some(*selected_mode),
            _ => None,
        }
    }

    pub fn context(&self) -> WizardContext {
        WizardContext {
            can_go_back: !matches!(self, WizardState::Type),
            is_complete: matches!(self, WizardState::Form { .. }),
        }
    }
}

/// Applies `event` to `state`. Events that do not fit the current step leave
/// the state untouched.
pub fn reduce(state: WizardState, event: WizardEvent) -> WizardState {
    let next = match (state, event) {
        (_, WizardEvent::Reset) => WizardState::Type,
        (_, WizardEvent::SelectType(selected_type)) => WizardState::Mode { selected_type },
        (WizardState::Mode { selected_type }, WizardEvent::SelectMode(selected_mode)) => {
            WizardState::Form {
                selected_type,
                selected_mode,
            }
        }
        (current, WizardEvent::SelectMode(mode)) => {
            tracing::warn!(
                step = current.step(),
                %mode,
                "ignoring mode selection outside the mode step"
            );
            current
        }
        (WizardState::Form { selected_type, .. }, WizardEvent::GoBack) => {
            WizardState::Mode { selected_type }
        }
        (WizardState::Mode { .. }, WizardEvent::GoBack) => WizardState::Type,
        (WizardState::Type, WizardEvent::GoBack) => WizardState::Type,
    };
    if next != state {
        tracing::debug!(from = state.step(), to = next.step(), ?event, "wizard transition");
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reachable_states() -> Vec<WizardState> {
        let mut states = vec![WizardState::Type];
        for selected_type in TransactionType::ALL {
            states.push(WizardState::Mode { selected_type });
            for selected_mode in TransactionMode::ALL {
                states.push(WizardState::Form {
                    selected_type,
                    selected_mode,
                });
            }
        }
        states
    }

    fn all_events() -> Vec<WizardEvent> {
        let mut events = vec![WizardEvent::GoBack, WizardEvent::Reset];
        events.extend(TransactionType::ALL.map(WizardEvent::SelectType));
        events.extend(TransactionMode::ALL.map(WizardEvent::SelectMode));
        events
    }

    #[test]
    fn select_type_then_mode_reaches_form() {
        let state = reduce(
            WizardState::Type,
            WizardEvent::SelectType(TransactionType::Expense),
        );
        assert_eq!(
            state,
            WizardState::Mode {
                selected_type: TransactionType::Expense
            }
        );
        let state = reduce(state, WizardEvent::SelectMode(TransactionMode::Installment));
        assert_eq!(state.selected_type(), Some(TransactionType::Expense));
        assert_eq!(state.selected_mode(), Some(TransactionMode::Installment));
        assert!(state.context().is_complete);
    }

    #[test]
    fn select_mode_outside_mode_step_is_noop() {
        assert_eq!(
            reduce(
                WizardState::Type,
                WizardEvent::SelectMode(TransactionMode::Simple)
            ),
            WizardState::Type
        );
        let form = WizardState::Form {
            selected_type: TransactionType::Income,
            selected_mode: TransactionMode::Recurring,
        };
        assert_eq!(
            reduce(form, WizardEvent::SelectMode(TransactionMode::Simple)),
            form
        );
    }

    #[test]
    fn select_type_clears_previous_mode() {
        let form = WizardState::Form {
            selected_type: TransactionType::Expense,
            selected_mode: TransactionMode::Installment,
        };
        let next = reduce(form, WizardEvent::SelectType(TransactionType::Income));
        assert_eq!(
            next,
            WizardState::Mode {
                selected_type: TransactionType::Income
            }
        );
        assert_eq!(next.selected_mode(), None);
    }

    #[test]
    fn go_back_walks_one_step() {
        let form = WizardState::Form {
            selected_type: TransactionType::Expense,
            selected_mode: TransactionMode::Simple,
        };
        let mode = reduce(form, WizardEvent::GoBack);
        assert_eq!(
            mode,
            WizardState::Mode {
                selected_type: TransactionType::Expense
            }
        );
        assert_eq!(reduce(mode, WizardEvent::GoBack), WizardState::Type);
        assert_eq!(
            reduce(WizardState::Type, WizardEvent::GoBack),
            WizardState::Type
        );
    }

    #[test]
    fn reset_from_anywhere_returns_to_type() {
        for state in reachable_states() {
            assert_eq!(reduce(state, WizardEvent::Reset), WizardState::Type);
        }
    }

    #[test]
    fn shape_invariant_holds_after_any_event() {
        for state in reachable_states() {
            for event in all_events() {
                let next = reduce(state, event);
                assert_eq!(next.selected_mode().is_some(), next.step() == "form");
                assert_eq!(next.selected_type().is_some(), next.step() != "type");
            }
        }
    }

    #[test]
    fn context_flags_follow_step() {
        assert_eq!(
            WizardState::Type.context(),
            WizardContext {
                can_go_back: false,
                is_complete: false
            }
        );
        let mode = WizardState::Mode {
            selected_type: TransactionType::Income,
        };
        assert!(mode.context().can_go_back);
        assert!(!mode.context().is_complete);
    }

    #[test]
    fn state_serializes_with_step_tag() {
        let form = WizardState::Form {
            selected_type: TransactionType::Expense,
            selected_mode: TransactionMode::Recurring,
        };
        assert_eq!(
            serde_json::to_value(form).unwrap(),
            serde_json::json!({
                "step": "form",
                "selected_type": "EXPENSE",
                "selected_mode": "recurring"
            })
        );
        assert_eq!(
            serde_json::to_value(WizardState::Type).unwrap(),
            serde_json::json!({ "step": "type" })
        );
    }
}
