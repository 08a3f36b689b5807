//! # Wizard Session Manager
//!
//! Drives one SOP into existence through a sequence of small inputs.
//!
//! Every call resolves the session handle from the [`SessionStore`] and holds
//! that session's lock for the whole call, so inputs addressed to one token
//! are applied in arrival order. Sessions for different tokens share nothing
//! but the store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::session_store::{SessionHandle, SessionStore};
use crate::config::WizardConfig;
use crate::error::{OperationsError, OperationsResult};
use crate::logging::log_wizard_operation;
use crate::models::{SopDocument, SopOrigin, SopStatus, WizardProgress, WizardSession};
use crate::state_machine::{StateMachineError, WizardEvent, WizardState, WizardStateMachine};
use crate::validation::validate_wizard_input;

/// Returned by [`WizardSessionManager::start`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStart {
    pub session_token: String,
    pub state: WizardState,
    pub prompt: String,
}

/// Result of applying one input to a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardStepOutcome {
    pub session_token: String,
    pub state: WizardState,
    pub next_prompt: String,
    pub progress: WizardProgress,
    /// Present only when this call finalized the SOP
    pub sop: Option<SopDocument>,
}

impl WizardStepOutcome {
    fn from_session(session: &WizardSession, sop: Option<SopDocument>) -> Self {
        Self {
            session_token: session.session_token.clone(),
            state: session.state,
            next_prompt: session.state.prompt().to_string(),
            progress: session.progress(),
            sop,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == WizardState::Complete
    }
}

pub struct WizardSessionManager {
    store: Arc<dyn SessionStore>,
    machine: WizardStateMachine,
    limits: WizardConfig,
}

impl std::fmt::Debug for WizardSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardSessionManager")
            .field("limits", &self.limits)
            .finish()
    }
}

impl WizardSessionManager {
    pub fn new(store: Arc<dyn SessionStore>, limits: WizardConfig) -> Self {
        Self {
            store,
            machine: WizardStateMachine::new(),
            limits,
        }
    }

    /// Open a new session and advance it to title collection
    pub async fn start(&self) -> OperationsResult<WizardStart> {
        let mut session = WizardSession::new();
        let token = session.session_token.clone();

        self.machine
            .transition(&mut session, WizardEvent::Start)
            .map_err(|err| session_error(&token, WizardState::Init, err))?;

        let state = session.state;
        self.store.insert(session).await?;

        log_wizard_operation("start", &token, &state.to_string(), 0, None);

        Ok(WizardStart {
            session_token: token,
            state,
            prompt: state.prompt().to_string(),
        })
    }

    /// Apply one raw input to the session in its current state
    pub async fn process_step(&self, token: &str, input: &str) -> OperationsResult<WizardStepOutcome> {
        let handle = self.handle(token).await?;
        let mut session = handle.lock().await;
        let current_state = session.state;

        if current_state.is_terminal() {
            return Err(session_error(
                token,
                current_state,
                StateMachineError::TerminalState {
                    state: current_state.to_string(),
                },
            ));
        }
        validate_wizard_input(input, self.limits.max_input_length)?;

        let event = WizardEvent::from_input(current_state, input)
            .map_err(|err| session_error(token, current_state, err))?;
        let event_type = event.event_type();

        let sop = if event == WizardEvent::Confirm {
            Some(self.finalize(&mut session)?)
        } else {
            self.machine
                .transition(&mut session, event)
                .map_err(|err| session_error(token, current_state, err))?;
            None
        };

        log_wizard_operation(
            "process_step",
            token,
            &session.state.to_string(),
            session.steps.len(),
            Some(event_type),
        );

        Ok(WizardStepOutcome::from_session(&session, sop))
    }

    /// Finalize the session into a SOP with status `final`
    pub async fn complete(&self, token: &str) -> OperationsResult<SopDocument> {
        let handle = self.handle(token).await?;
        let mut session = handle.lock().await;

        let sop = self.finalize(&mut session)?;

        log_wizard_operation(
            "complete",
            token,
            &session.state.to_string(),
            sop.steps.len(),
            Some(&sop.sop_id),
        );

        Ok(sop)
    }

    /// Abort a session from any non-terminal state
    pub async fn cancel(&self, token: &str) -> OperationsResult<WizardStepOutcome> {
        let handle = self.handle(token).await?;
        let mut session = handle.lock().await;
        let current_state = session.state;

        self.machine
            .transition(&mut session, WizardEvent::Cancel)
            .map_err(|err| session_error(token, current_state, err))?;

        log_wizard_operation(
            "cancel",
            token,
            &session.state.to_string(),
            session.steps.len(),
            None,
        );

        Ok(WizardStepOutcome::from_session(&session, None))
    }

    /// Snapshot of a session as it stands now
    pub async fn session(&self, token: &str) -> OperationsResult<WizardSession> {
        let handle = self.handle(token).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    async fn handle(&self, token: &str) -> OperationsResult<SessionHandle> {
        self.store
            .get(token)
            .await?
            .ok_or_else(|| OperationsError::not_found("session", token))
    }

    /// Caller holds the session lock
    fn finalize(&self, session: &mut WizardSession) -> OperationsResult<SopDocument> {
        let current_state = session.state;
        let token = session.session_token.clone();

        if let Err(err) = self.machine.transition(session, WizardEvent::Confirm) {
            debug!(
                session_token = %token,
                state = %session.state,
                error = %err,
                "Wizard finalization rejected"
            );
            return Err(session_error(&token, current_state, err));
        }

        let mut sop = SopDocument::draft(
            session.title.clone(),
            session.description.clone(),
            session.steps.clone(),
            SopOrigin::Wizard {
                session_token: token.clone(),
            },
        );
        sop.status = SopStatus::Final;
        sop.completed_at = Some(Utc::now());
        session.sop_id = Some(sop.sop_id.clone());

        info!(
            session_token = %token,
            sop_id = %sop.sop_id,
            step_count = sop.steps.len(),
            "SOP finalized"
        );

        Ok(sop)
    }
}

/// Translate a state machine failure into the public error taxonomy
fn session_error(token: &str, current_state: WizardState, err: StateMachineError) -> OperationsError {
    match err {
        StateMachineError::GuardFailed { fields } => OperationsError::Validation { fields },
        other => OperationsError::InvalidSessionState {
            token: token.to_string(),
            state: other
                .state()
                .map(str::to_string)
                .unwrap_or_else(|| current_state.to_string()),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_store::InMemorySessionStore;

    fn manager() -> WizardSessionManager {
        WizardSessionManager::new(
            Arc::new(InMemorySessionStore::new()),
            WizardConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_start_prompts_for_title() {
        let manager = manager();
        let start = manager.start().await.unwrap();

        assert_eq!(start.state, WizardState::CollectingTitle);
        assert_eq!(start.prompt, WizardState::CollectingTitle.prompt());
        assert!(start.session_token.starts_with("wizard_"));
    }

    #[tokio::test]
    async fn test_done_is_never_appended() {
        let manager = manager();
        let token = manager.start().await.unwrap().session_token;

        manager.process_step(&token, "Deploy").await.unwrap();
        manager.process_step(&token, "").await.unwrap();
        manager.process_step(&token, "Build").await.unwrap();
        let outcome = manager.process_step(&token, "DONE").await.unwrap();

        assert_eq!(outcome.state, WizardState::Review);
        assert_eq!(outcome.progress.step_count, 1);
        assert_eq!(manager.session(&token).await.unwrap().steps, vec!["Build"]);
    }

    #[tokio::test]
    async fn test_confirm_in_review_finalizes() {
        let manager = manager();
        let token = manager.start().await.unwrap().session_token;

        for input in ["Deploy", "Routine", "Build", "review"] {
            manager.process_step(&token, input).await.unwrap();
        }
        let outcome = manager.process_step(&token, "confirm").await.unwrap();

        assert!(outcome.is_complete());
        let sop = outcome.sop.unwrap();
        assert_eq!(sop.status, SopStatus::Final);
        assert!(sop.completed_at.is_some());
        assert_eq!(
            manager.session(&token).await.unwrap().sop_id,
            Some(sop.sop_id)
        );
    }

    #[tokio::test]
    async fn test_complete_without_steps_names_field() {
        let manager = manager();
        let token = manager.start().await.unwrap().session_token;
        manager.process_step(&token, "Deploy").await.unwrap();
        manager.process_step(&token, "").await.unwrap();

        let err = manager.complete(&token).await.unwrap_err();
        match err {
            OperationsError::Validation { fields } => assert_eq!(fields, vec!["steps"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            manager.session(&token).await.unwrap().state,
            WizardState::Review
        );
    }

    #[tokio::test]
    async fn test_complete_before_steps_is_invalid_state() {
        let manager = manager();
        let token = manager.start().await.unwrap().session_token;

        let err = manager.complete(&token).await.unwrap_err();
        assert!(matches!(err, OperationsError::InvalidSessionState { .. }));
    }

    #[tokio::test]
    async fn test_oversized_input_is_rejected_before_mutation() {
        let manager = WizardSessionManager::new(
            Arc::new(InMemorySessionStore::new()),
            WizardConfig {
                max_input_length: 5,
            },
        );
        let token = manager.start().await.unwrap().session_token;

        let err = manager
            .process_step(&token, "A title that is too long")
            .await
            .unwrap_err();
        assert!(matches!(err, OperationsError::Validation { .. }));

        let session = manager.session(&token).await.unwrap();
        assert_eq!(session.state, WizardState::CollectingTitle);
        assert!(session.title.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_then_input_fails() {
        let manager = manager();
        let token = manager.start().await.unwrap().session_token;

        let outcome = manager.cancel(&token).await.unwrap();
        assert_eq!(outcome.state, WizardState::Aborted);

        let err = manager.process_step(&token, "Deploy").await.unwrap_err();
        assert!(matches!(err, OperationsError::InvalidSessionState { .. }));
        assert!(manager.cancel(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_input_to_finished_session_is_invalid_state() {
        let manager = WizardSessionManager::new(
            Arc::new(InMemorySessionStore::new()),
            WizardConfig {
                max_input_length: 5,
            },
        );
        let token = manager.start().await.unwrap().session_token;
        manager.cancel(&token).await.unwrap();

        let err = manager
            .process_step(&token, "An input well over the limit")
            .await
            .unwrap_err();
        assert!(matches!(err, OperationsError::InvalidSessionState { .. }));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let manager = manager();
        let err = manager.process_step("wizard_missing", "x").await.unwrap_err();
        assert!(matches!(err, OperationsError::NotFound { kind: "session", .. }));
    }
}
