//! Fresh, unpredictable identifiers for every document, session and analysis.
//!
//! Identifiers are a readable prefix plus a v4 UUID in simple form, so two calls
//! never collide even for structurally identical inputs.

use uuid::Uuid;

pub const SOP_PREFIX: &str = "sop";
pub const WORKFLOW_PREFIX: &str = "workflow";
pub const WORKFLOW_STEP_PREFIX: &str = "step";
pub const SESSION_PREFIX: &str = "wizard";
pub const BLUEPRINT_PREFIX: &str = "blueprint";
pub const ANALYSIS_PREFIX: &str = "analysis";
pub const ARTIFACT_PREFIX: &str = "artifact";

/// Generate a new identifier of the form `<prefix>_<uuid>`
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

pub fn new_sop_id() -> String {
    generate_id(SOP_PREFIX)
}

pub fn new_workflow_id() -> String {
    generate_id(WORKFLOW_PREFIX)
}

pub fn new_workflow_step_id() -> String {
    generate_id(WORKFLOW_STEP_PREFIX)
}

pub fn new_session_token() -> String {
    generate_id(SESSION_PREFIX)
}

pub fn new_blueprint_id() -> String {
    generate_id(BLUEPRINT_PREFIX)
}

pub fn new_analysis_id() -> String {
    generate_id(ANALYSIS_PREFIX)
}

pub fn new_artifact_id() -> String {
    generate_id(ARTIFACT_PREFIX)
}
