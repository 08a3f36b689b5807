use super::errors::{StateMachineError, StateMachineResult};
use crate::models::WizardSession;

/// Trait for implementing state transition guards
pub trait StateGuard<T> {
    /// Check if a transition is allowed
    fn check(&self, entity: &T) -> StateMachineResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard to check a session holds enough content to finalize a SOP
pub struct SopReadyGuard;

impl StateGuard<WizardSession> for SopReadyGuard {
    fn check(&self, session: &WizardSession) -> StateMachineResult<()> {
        let mut missing = Vec::new();

        if session.title.trim().is_empty() {
            missing.push("title".to_string());
        }
        if session.steps.is_empty() {
            missing.push("steps".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StateMachineError::GuardFailed { fields: missing })
        }
    }

    fn description(&self) -> &'static str {
        "SOP must have a non-empty title and at least one step"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_names_every_missing_field() {
        let session = WizardSession::new();
        let err = SopReadyGuard.check(&session).unwrap_err();
        assert_eq!(
            err,
            StateMachineError::GuardFailed {
                fields: vec!["title".to_string(), "steps".to_string()]
            }
        );
    }

    #[test]
    fn test_guard_passes_with_title_and_step() {
        let mut session = WizardSession::new();
        session.title = "Deploy Service".to_string();
        session.steps.push("Build".to_string());
        assert!(SopReadyGuard.check(&session).is_ok());
    }
}
