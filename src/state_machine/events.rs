use serde::{Deserialize, Serialize};

use super::errors::{StateMachineError, StateMachineResult};
use super::states::WizardState;

/// Reserved words recognized while collecting steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedCommand {
    Done,
    Review,
    Cancel,
}

impl ReservedCommand {
    /// Case-insensitive match of already-trimmed input against the reserved set
    pub fn parse(input: &str) -> Option<Self> {
        if input.eq_ignore_ascii_case("done") {
            Some(Self::Done)
        } else if input.eq_ignore_ascii_case("review") {
            Some(Self::Review)
        } else if input.eq_ignore_ascii_case("cancel") {
            Some(Self::Cancel)
        } else {
            None
        }
    }
}

/// Events that can trigger wizard state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WizardEvent {
    /// Leave `Init` and start prompting
    Start,
    SetTitle(String),
    SetDescription(String),
    AddStep(String),
    /// Stop collecting steps and move to review
    FinishSteps,
    /// Finalize the SOP
    Confirm,
    /// Return from review to step collection, keeping collected steps
    RestartSteps,
    Cancel,
}

impl WizardEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SetTitle(_) => "set_title",
            Self::SetDescription(_) => "set_description",
            Self::AddStep(_) => "add_step",
            Self::FinishSteps => "finish_steps",
            Self::Confirm => "confirm",
            Self::RestartSteps => "restart_steps",
            Self::Cancel => "cancel",
        }
    }

    /// Turn one raw user input into the event it means in `state`.
    ///
    /// While collecting steps the reserved command set is checked before the
    /// input is ever considered step text, so a command is never appended.
    pub fn from_input(state: WizardState, input: &str) -> StateMachineResult<Self> {
        if state.is_terminal() {
            return Err(StateMachineError::TerminalState {
                state: state.to_string(),
            });
        }

        let trimmed = input.trim();

        let event = match state {
            WizardState::CollectingSteps => match ReservedCommand::parse(trimmed) {
                Some(ReservedCommand::Done | ReservedCommand::Review) => Self::FinishSteps,
                Some(ReservedCommand::Cancel) => Self::Cancel,
                None if trimmed.is_empty() => {
                    return Err(StateMachineError::InputRejected {
                        state: state.to_string(),
                        reason: "step text must not be blank".to_string(),
                    })
                }
                None => Self::AddStep(trimmed.to_string()),
            },
            WizardState::CollectingTitle => Self::SetTitle(trimmed.to_string()),
            WizardState::CollectingDescription => Self::SetDescription(trimmed.to_string()),
            WizardState::Review => {
                let lowered = trimmed.to_lowercase();
                match lowered.as_str() {
                    "confirm" | "complete" => Self::Confirm,
                    "restart steps" => Self::RestartSteps,
                    "cancel" => Self::Cancel,
                    _ => {
                        return Err(StateMachineError::InputRejected {
                            state: state.to_string(),
                            reason: format!(
                                "expected 'confirm', 'complete', 'restart steps' or 'cancel', got '{trimmed}'"
                            ),
                        })
                    }
                }
            }
            WizardState::Init | WizardState::Complete | WizardState::Aborted => {
                return Err(StateMachineError::InputRejected {
                    state: state.to_string(),
                    reason: "session does not accept input in this state".to_string(),
                })
            }
        };

        Ok(event)
    }
}
