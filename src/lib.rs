#![allow(clippy::doc_markdown)] // Allow technical terms like SOP, JSON in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Operations Core
//!
//! Authoring, conversion and comparison of Standard Operating Procedures (SOPs)
//! and Workflows.
//!
//! ## Overview
//!
//! A SOP is a titled, ordered list of free-text steps meant for people. A
//! workflow is the same process as machine-executable steps linked by
//! dependencies. This crate provides three capabilities over those two shapes:
//!
//! - **SOP authoring**: a conversational wizard that collects a title, a
//!   description and steps one input at a time, then finalizes the SOP
//! - **Structural conversion**: SOP to linear workflow and back, plus analysis
//!   of raw structured or plain-text content
//! - **Coexistence analysis**: a blueprint of matched steps, gaps, automation
//!   opportunities and an alignment score for a SOP/workflow pair
//!
//! ## Module Organization
//!
//! - [`models`] - SOP, workflow, blueprint and artifact data types
//! - [`state_machine`] - Wizard session states and transitions
//! - [`services`] - Wizard session manager, converter and analyzer
//! - [`orchestration`] - Single entry point plus external collaborator traits
//! - [`config`] - Layered YAML and environment configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging bootstrap and helpers
//! - [`validation`] - Input size and shape guards
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use operations_core::config::ConfigManager;
//! use operations_core::orchestration::{
//!     InMemoryArtifactRepository, InMemoryDocumentRepository, OperationsOrchestrator,
//! };
//! use operations_core::services::InMemorySessionStore;
//!
//! # async fn example() -> operations_core::OperationsResult<()> {
//! let orchestrator = OperationsOrchestrator::new(
//!     ConfigManager::load()?,
//!     Arc::new(InMemoryDocumentRepository::new()),
//!     Arc::new(InMemoryArtifactRepository::new()),
//!     Arc::new(InMemorySessionStore::new()),
//! )?;
//!
//! let start = orchestrator.start_wizard().await?;
//! for input in ["Deploy Service", "Routine deployment", "Build", "Test", "done"] {
//!     orchestrator.run_wizard_step(&start.session_token, input).await?;
//! }
//! let completed = orchestrator.complete_wizard(&start.session_token).await?;
//! println!("SOP {} has {} steps", completed.output.sop_id, completed.output.steps.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod services;
pub mod state_machine;
pub mod validation;

pub use config::{ConfigManager, OperationsConfig};
pub use error::{OperationsError, OperationsResult};
pub use models::{
    ArtifactRecord, ArtifactStatus, CoexistenceBlueprint, ConversionType, Document, OperationType,
    SopDocument, SopStatus, WizardSession, WorkflowDocument, WorkflowStep,
};
pub use orchestration::{OperationOutcome, OperationsOrchestrator, WizardStepResult};
pub use services::{
    CoexistenceAnalyzer, StructuralConverter, WizardSessionManager, WizardStart, WizardStepOutcome,
};
pub use state_machine::{WizardEvent, WizardState, WizardStateMachine};
