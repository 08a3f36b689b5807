use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation whose output an artifact records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    SopAuthoring,
    SopToWorkflow,
    WorkflowToSop,
    CoexistenceAnalysis,
}

impl OperationType {
    /// Kind of document the operation produces
    pub fn artifact_type(&self) -> &'static str {
        match self {
            Self::SopAuthoring | Self::WorkflowToSop => "sop",
            Self::SopToWorkflow => "workflow",
            Self::CoexistenceAnalysis => "coexistence_blueprint",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SopAuthoring => write!(f, "sop_authoring"),
            Self::SopToWorkflow => write!(f, "sop_to_workflow"),
            Self::WorkflowToSop => write!(f, "workflow_to_sop"),
            Self::CoexistenceAnalysis => write!(f, "coexistence_analysis"),
        }
    }
}

/// Status stamped on persisted artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactRecordStatus {
    #[default]
    Draft,
    Final,
}

impl std::str::FromStr for ArtifactRecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "final" => Ok(Self::Final),
            _ => Err(format!("Invalid artifact status: {s}")),
        }
    }
}

/// Request to persist one operation output, with lineage back to its sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub operation: OperationType,
    pub artifact_type: String,
    pub source_references: Vec<String>,
    pub output_reference: String,
    pub status: ArtifactRecordStatus,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ArtifactRecord {
    pub fn new(
        operation: OperationType,
        source_references: Vec<String>,
        output_reference: impl Into<String>,
        status: ArtifactRecordStatus,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            operation,
            artifact_type: operation.artifact_type().to_string(),
            source_references,
            output_reference: output_reference.into(),
            status,
            payload,
            created_at: Utc::now(),
        }
    }
}

/// What happened to the artifact requested for a successful operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ArtifactStatus {
    Created { artifact_id: String },
    Failed { reason: String },
    /// Artifact creation is disabled by configuration
    Skipped,
}

impl ArtifactStatus {
    pub fn artifact_id(&self) -> Option<&str> {
        match self {
            Self::Created { artifact_id } => Some(artifact_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_type_follows_operation() {
        let record = ArtifactRecord::new(
            OperationType::CoexistenceAnalysis,
            vec!["sop-ref".to_string(), "wf-ref".to_string()],
            "blueprint_1",
            ArtifactRecordStatus::Draft,
            serde_json::json!({}),
        );
        assert_eq!(record.artifact_type, "coexistence_blueprint");
        assert_eq!(OperationType::WorkflowToSop.artifact_type(), "sop");
    }

    #[test]
    fn test_artifact_status_id() {
        let created = ArtifactStatus::Created {
            artifact_id: "artifact_1".to_string(),
        };
        assert_eq!(created.artifact_id(), Some("artifact_1"));
        assert_eq!(ArtifactStatus::Skipped.artifact_id(), None);
    }
}
