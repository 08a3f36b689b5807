use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::identifiers::new_workflow_id;

/// Direction a document was converted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionType {
    SopToWorkflow,
    WorkflowToSop,
}

impl fmt::Display for ConversionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SopToWorkflow => write!(f, "sop_to_workflow"),
            Self::WorkflowToSop => write!(f, "workflow_to_sop"),
        }
    }
}

impl std::str::FromStr for ConversionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sop_to_workflow" | "workflow" => Ok(Self::SopToWorkflow),
            "workflow_to_sop" | "sop" => Ok(Self::WorkflowToSop),
            _ => Err(format!("Invalid conversion direction: {s}")),
        }
    }
}

/// A single machine-actionable step with a link to its predecessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    #[serde(alias = "action_text", alias = "name")]
    pub action: String,
    /// Predecessor step id; `None` only for the first step of the chain
    #[serde(default, alias = "dependency")]
    pub depends_on: Option<String>,
}

/// Structured workflow: an ordered chain of dependent steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub workflow_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub steps: Vec<WorkflowStep>,
    #[serde(default)]
    pub conversion_type: Option<ConversionType>,
    #[serde(default)]
    pub source_document_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl WorkflowDocument {
    /// Create an empty workflow with a freshly generated id
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            workflow_id: new_workflow_id(),
            title: title.into(),
            description,
            steps: Vec::new(),
            conversion_type: None,
            source_document_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Steps that have no predecessor
    pub fn root_steps(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.steps.iter().filter(|step| step.depends_on.is_none())
    }
}
