//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add workspace-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unable to parse grid for window '{window}' in session '{session}': {source}")]
    Window {
        session: String,
        window: String,
        #[source]
        source: DomainError,
    },

    #[error("invalid workspace: {message}")]
    InvalidWorkspace { message: String },

    #[error("window '{window}' in session '{session}': no pane '{pane}' in grid")]
    UnknownPane {
        session: String,
        window: String,
        pane: String,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidWorkspace {
            message: message.into(),
        }
    }

    /// True for grid/layout problems (as opposed to workspace or I/O problems).
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::Window { .. })
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
