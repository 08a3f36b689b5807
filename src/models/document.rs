use serde::{Deserialize, Serialize};

use super::sop::SopDocument;
use super::workflow::WorkflowDocument;

/// Either document shape, tagged by `document_type` when serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum Document {
    Sop(SopDocument),
    Workflow(WorkflowDocument),
}

impl Document {
    /// Identifier of the wrapped document
    pub fn id(&self) -> &str {
        match self {
            Self::Sop(sop) => &sop.sop_id,
            Self::Workflow(workflow) => &workflow.workflow_id,
        }
    }

    pub fn document_type(&self) -> &'static str {
        match self {
            Self::Sop(_) => "sop",
            Self::Workflow(_) => "workflow",
        }
    }

    pub fn step_count(&self) -> usize {
        match self {
            Self::Sop(sop) => sop.step_count(),
            Self::Workflow(workflow) => workflow.step_count(),
        }
    }

    pub fn as_sop(&self) -> Option<&SopDocument> {
        match self {
            Self::Sop(sop) => Some(sop),
            Self::Workflow(_) => None,
        }
    }

    pub fn as_workflow(&self) -> Option<&WorkflowDocument> {
        match self {
            Self::Workflow(workflow) => Some(workflow),
            Self::Sop(_) => None,
        }
    }
}

impl From<SopDocument> for Document {
    fn from(sop: SopDocument) -> Self {
        Self::Sop(sop)
    }
}

impl From<WorkflowDocument> for Document {
    fn from(workflow: WorkflowDocument) -> Self {
        Self::Workflow(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SopOrigin;

    #[test]
    fn test_document_is_tagged() {
        let sop = SopDocument::draft(
            "Deploy",
            None,
            vec!["Build".to_string()],
            SopOrigin::Import { reference: None },
        );
        let value = serde_json::to_value(Document::from(sop.clone())).unwrap();
        assert_eq!(value["document_type"], "sop");
        assert_eq!(value["sop_id"], sop.sop_id.as_str());

        let parsed: Document = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.as_sop(), Some(&sop));
    }
}
