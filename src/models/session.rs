use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifiers::new_session_token;
use crate::state_machine::WizardState;

/// Partially collected SOP owned by a single wizard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    pub session_token: String,
    pub state: WizardState,
    pub title: String,
    pub description: Option<String>,
    pub steps: Vec<String>,
    /// Id of the SOP produced on completion
    pub sop_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WizardSession {
    /// Create a session in `Init` with a fresh token
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            session_token: new_session_token(),
            state: WizardState::Init,
            title: String::new(),
            description: None,
            steps: Vec::new(),
            sop_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn progress(&self) -> WizardProgress {
        WizardProgress {
            title: self.title.clone(),
            description: self.description.clone(),
            step_count: self.steps.len(),
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of what a session has collected so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardProgress {
    pub title: String,
    pub description: Option<String>,
    pub step_count: usize,
}
