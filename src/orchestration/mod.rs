//! # Orchestration
//!
//! Composition of the operations core behind one entry point.
//!
//! - **OperationsOrchestrator**: resolves references, delegates to the wizard,
//!   converter and analyzer, and requests one artifact per terminal output
//! - **DocumentRepository** / **ArtifactRepository**: the external collaborators
//!   it consults, with in-memory implementations

pub mod orchestrator;
pub mod repositories;

pub use orchestrator::{OperationOutcome, OperationsOrchestrator, WizardStepResult};
pub use repositories::{
    ArtifactRepository, DocumentRepository, InMemoryArtifactRepository, InMemoryDocumentRepository,
};
