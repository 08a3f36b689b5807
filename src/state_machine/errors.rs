use thiserror::Error;

/// Error types for wizard state machine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("Guard condition failed: missing {}", fields.join(", "))]
    GuardFailed { fields: Vec<String> },

    #[error("Invalid state transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Session is in terminal state {state}")]
    TerminalState { state: String },

    #[error("Input rejected in state {state}: {reason}")]
    InputRejected { state: String, reason: String },
}

impl StateMachineError {
    /// State the session was in when the error was raised, if it names one
    pub fn state(&self) -> Option<&str> {
        match self {
            Self::InvalidTransition { from, .. } => Some(from),
            Self::TerminalState { state } | Self::InputRejected { state, .. } => Some(state),
            Self::GuardFailed { .. } => None,
        }
    }
}

/// Result type alias for state machine operations
pub type StateMachineResult<T> = Result<T, StateMachineError>;
