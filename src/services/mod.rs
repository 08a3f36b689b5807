pub mod coexistence_analyzer;
pub mod content;
pub mod session_store;
pub mod structural_converter;
pub mod wizard_session_manager;

pub use coexistence_analyzer::{compare_steps, CoexistenceAnalyzer, CoexistenceReport};
pub use content::{sniff_content, ContentShape};
pub use session_store::{InMemorySessionStore, SessionHandle, SessionStore};
pub use structural_converter::{linear_chain, ordered_actions, StructuralConverter};
pub use wizard_session_manager::{WizardSessionManager, WizardStart, WizardStepOutcome};
