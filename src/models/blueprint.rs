use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workflow step the SOP does not document, flagged as an automation candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationOpportunity {
    pub step: String,
    pub rationale: String,
}

/// Output of a coexistence analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoexistenceBlueprint {
    pub blueprint_id: String,
    pub analysis_id: String,
    pub sop_reference: String,
    pub workflow_reference: String,
    pub matched_steps: Vec<String>,
    /// Steps present in the workflow that the SOP lacks
    pub gaps_sop_only: Vec<String>,
    /// Steps present in the SOP that the workflow lacks
    pub gaps_workflow_only: Vec<String>,
    pub opportunities: Vec<AutomationOpportunity>,
    /// Fraction of aligned steps, always within `[0, 1]`
    pub alignment_score: f64,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CoexistenceBlueprint {
    pub fn is_fully_aligned(&self) -> bool {
        self.gaps_sop_only.is_empty() && self.gaps_workflow_only.is_empty()
    }
}
