use serde::{Deserialize, Serialize};
use std::fmt;

/// Wizard session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    /// Session created, not yet prompting
    #[default]
    Init,
    /// Waiting for the SOP title
    CollectingTitle,
    /// Waiting for the SOP description (may be empty)
    CollectingDescription,
    /// Accepting steps until a finishing command arrives
    CollectingSteps,
    /// Steps collected, waiting for confirmation
    Review,
    /// SOP finalized
    Complete,
    /// Session cancelled
    Aborted,
}

impl WizardState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Aborted)
    }

    /// Check if the session is still gathering content
    pub fn is_collecting(&self) -> bool {
        matches!(
            self,
            Self::CollectingTitle | Self::CollectingDescription | Self::CollectingSteps
        )
    }

    /// Prompt shown to the user when the session enters this state
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Init => "Starting wizard session.",
            Self::CollectingTitle => "What is the title of this SOP?",
            Self::CollectingDescription => "What is the description of this SOP?",
            Self::CollectingSteps => {
                "Provide the next step of the SOP, or type 'done' to proceed to review."
            }
            Self::Review => {
                "Review your SOP. Type 'confirm' to finish, 'restart steps' to add more steps, or 'cancel'."
            }
            Self::Complete => "Wizard complete. The SOP has been finalized.",
            Self::Aborted => "Wizard cancelled.",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::CollectingTitle => write!(f, "collecting_title"),
            Self::CollectingDescription => write!(f, "collecting_description"),
            Self::CollectingSteps => write!(f, "collecting_steps"),
            Self::Review => write!(f, "review"),
            Self::Complete => write!(f, "complete"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

impl std::str::FromStr for WizardState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Self::Init),
            "collecting_title" => Ok(Self::CollectingTitle),
            "collecting_description" => Ok(Self::CollectingDescription),
            "collecting_steps" => Ok(Self::CollectingSteps),
            "review" => Ok(Self::Review),
            "complete" => Ok(Self::Complete),
            "aborted" => Ok(Self::Aborted),
            _ => Err(format!("Invalid wizard state: {s}")),
        }
    }
}
