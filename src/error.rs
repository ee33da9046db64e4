use thiserror::Error;

/// The profile operation a failure belongs to, used to pick the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Delete,
}

impl Action {
    /// Shown when the request never produced a usable response.
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Load => "Failed to load profiles",
            Action::Create => "Network error creating profile",
            Action::Delete => "Network error deleting profile",
        }
    }

    /// Shown when the server answered `success: false` without an error text.
    /// The list endpoint has no success flag, so loads share the failure text.
    pub fn rejection_message(self) -> &'static str {
        match self {
            Action::Load => self.failure_message(),
            Action::Create => "Error creating profile",
            Action::Delete => "Error deleting profile",
        }
    }
}

/// Every variant displays as the message the status line shows.
/// `detail` is only written to the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .action.failure_message())]
    Network { action: Action, detail: String },

    #[error("{}", .action.failure_message())]
    Parse { action: Action, detail: String },

    #[error("{0}")]
    Application(String),
}

impl ProfileError {
    pub fn network(action: Action, detail: impl Into<String>) -> Self {
        ProfileError::Network {
            action,
            detail: detail.into(),
        }
    }

    pub fn parse(action: Action, detail: impl Into<String>) -> Self {
        ProfileError::Parse {
            action,
            detail: detail.into(),
        }
    }

    /// Server-side rejection; falls back to the generic text when the server gave none.
    pub fn rejected(action: Action, error: Option<String>) -> Self {
        match error.filter(|e| !e.is_empty()) {
            Some(message) => ProfileError::Application(message),
            None => ProfileError::Application(action.rejection_message().to_string()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ProfileError::Validation(_))
    }

    /// Extra context for the log line, when there is any beyond the display text.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ProfileError::Network { detail, .. } | ProfileError::Parse { detail, .. } => {
                Some(detail)
            }
            _ => None,
        }
    }
}
