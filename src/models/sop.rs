use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::identifiers::new_sop_id;
use super::workflow::ConversionType;

/// Lifecycle status of a SOP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SopStatus {
    #[default]
    Draft,
    Final,
}

impl Default for SopOrigin {
    fn default() -> Self {
        Self::Import { reference: None }
    }
}

impl fmt::Display for SopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// How a SOP came into existence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SopOrigin {
    /// Authored through a wizard session
    Wizard { session_token: String },
    /// Produced by converting a workflow
    Conversion { workflow_id: String },
    /// Lifted from plain text content
    Import { reference: Option<String> },
}

/// Standard Operating Procedure: a titled, ordered list of free-text steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SopDocument {
    pub sop_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Step order is significant and preserved through every transform
    pub steps: Vec<String>,
    #[serde(default)]
    pub status: SopStatus,
    #[serde(default)]
    pub origin: SopOrigin,
    #[serde(default)]
    pub conversion_type: Option<ConversionType>,
    #[serde(default)]
    pub source_document_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SopDocument {
    /// Create a draft SOP with a freshly generated id
    pub fn draft(
        title: impl Into<String>,
        description: Option<String>,
        steps: Vec<String>,
        origin: SopOrigin,
    ) -> Self {
        Self {
            sop_id: new_sop_id(),
            title: title.into(),
            description,
            steps,
            status: SopStatus::Draft,
            origin,
            conversion_type: None,
            source_document_id: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_final(&self) -> bool {
        self.status == SopStatus::Final
    }
}
