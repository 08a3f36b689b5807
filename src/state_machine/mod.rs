// State machine module for wizard sessions
//
// A pure transition table over `WizardSession` values. Locking and storage
// belong to the session manager.

pub mod errors;
pub mod events;
pub mod guards;
pub mod states;
pub mod wizard_state_machine;

// Re-export main types for convenient access
pub use errors::{StateMachineError, StateMachineResult};
pub use events::{ReservedCommand, WizardEvent};
pub use states::WizardState;
pub use wizard_state_machine::WizardStateMachine;

// Common traits and utilities
pub use guards::{SopReadyGuard, StateGuard};
