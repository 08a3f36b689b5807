pub mod artifact;
pub mod blueprint;
pub mod document;
pub mod identifiers;
pub mod session;
pub mod sop;
pub mod workflow;

// Re-export core models for easy access
pub use artifact::{ArtifactRecord, ArtifactRecordStatus, ArtifactStatus, OperationType};
pub use blueprint::{AutomationOpportunity, CoexistenceBlueprint};
pub use document::Document;
pub use session::{WizardProgress, WizardSession};
pub use sop::{SopDocument, SopOrigin, SopStatus};
pub use workflow::{ConversionType, WorkflowDocument, WorkflowStep};
