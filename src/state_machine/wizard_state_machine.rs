use chrono::Utc;

use super::{
    errors::{StateMachineError, StateMachineResult},
    events::WizardEvent,
    guards::{SopReadyGuard, StateGuard},
    states::WizardState,
};
use crate::models::WizardSession;

/// Transition table for wizard sessions.
///
/// Stateless: all mutable state lives in the `WizardSession` passed in, and
/// callers hold that session's lock for the duration of one transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Apply one event to the session, returning the state it ends in
    pub fn transition(
        &self,
        session: &mut WizardSession,
        event: WizardEvent,
    ) -> StateMachineResult<WizardState> {
        let current_state = session.state;
        let target_state = self.determine_target_state(current_state, &event)?;

        if let Err(err) = self.check_guards(session, target_state) {
            // A failed finalization always leaves the session reviewable
            if current_state != WizardState::Review {
                session.state = WizardState::Review;
                session.updated_at = Utc::now();
            }
            return Err(err);
        }

        match event {
            WizardEvent::SetTitle(title) => session.title = title,
            WizardEvent::SetDescription(description) => {
                session.description = (!description.is_empty()).then_some(description);
            }
            WizardEvent::AddStep(step) => session.steps.push(step),
            WizardEvent::Start
            | WizardEvent::FinishSteps
            | WizardEvent::Confirm
            | WizardEvent::RestartSteps
            | WizardEvent::Cancel => {}
        }

        session.state = target_state;
        session.updated_at = Utc::now();

        tracing::debug!(
            session_token = %session.session_token,
            from = %current_state,
            to = %target_state,
            "Wizard state transition"
        );

        Ok(target_state)
    }

    /// Determine the target state based on current state and event
    pub fn determine_target_state(
        &self,
        current_state: WizardState,
        event: &WizardEvent,
    ) -> StateMachineResult<WizardState> {
        if current_state.is_terminal() {
            return Err(StateMachineError::TerminalState {
                state: current_state.to_string(),
            });
        }

        let target = match (current_state, event) {
            (WizardState::Init, WizardEvent::Start) => WizardState::CollectingTitle,
            (WizardState::CollectingTitle, WizardEvent::SetTitle(_)) => {
                WizardState::CollectingDescription
            }
            (WizardState::CollectingDescription, WizardEvent::SetDescription(_)) => {
                WizardState::CollectingSteps
            }
            (WizardState::CollectingSteps, WizardEvent::AddStep(_)) => WizardState::CollectingSteps,
            (WizardState::CollectingSteps, WizardEvent::FinishSteps) => WizardState::Review,

            // Finalization, either confirmed from review or requested directly
            (WizardState::Review | WizardState::CollectingSteps, WizardEvent::Confirm) => {
                WizardState::Complete
            }

            (WizardState::Review, WizardEvent::RestartSteps) => WizardState::CollectingSteps,

            (_, WizardEvent::Cancel) => WizardState::Aborted,

            (from_state, _) => {
                return Err(StateMachineError::InvalidTransition {
                    from: from_state.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }

    fn check_guards(
        &self,
        session: &WizardSession,
        target_state: WizardState,
    ) -> StateMachineResult<()> {
        if target_state == WizardState::Complete {
            SopReadyGuard.check(session)?;
        }
        Ok(())
    }
}
