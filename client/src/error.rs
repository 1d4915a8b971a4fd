//! Error types for the upload client.
//!
//! Errors fall into two families:
//!
//! - **Input validation** ([`ClientError::NoFileSelected`],
//!   [`ClientError::InvalidFileType`], [`ClientError::UploadInProgress`]) -
//!   raised before any network call.
//! - **Remote call** ([`ClientError::Server`], [`ClientError::Transport`],
//!   [`ClientError::InvalidResponse`]) - raised by the upload request.
//!
//! Every error ends up on screen as a single string, see
//! [`ClientError::user_message`].

use thiserror::Error;

use crate::media::MediaKind;

/// Errors raised by the upload client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Submit was pressed with nothing selected.
    #[error("Please select a file!")]
    NoFileSelected,

    /// The selected file is not of the active media class.
    #[error("Invalid file type: expected {}, got {actual}", .expected.accept())]
    InvalidFileType { expected: MediaKind, actual: String },

    /// An upload for the current selection is still running.
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// The backend answered with an error status or an error body.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The backend answered 2xx with something that is not a report.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Failed to read a local file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the error was caught before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::NoFileSelected
                | ClientError::InvalidFileType { .. }
                | ClientError::UploadInProgress
        )
    }

    /// The most specific message available for display.
    ///
    /// Priority: the server's own `error` field, then the transport
    /// message (a bare error status counts as one), then the mode's
    /// fallback string.
    pub fn user_message(&self, kind: MediaKind) -> String {
        match self {
            ClientError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Server { status, .. } if *status != 0 => {
                format!("Request failed with status code {}", status)
            }
            ClientError::Server { .. } => kind.fallback_error().to_string(),
            ClientError::Transport(message) if !message.trim().is_empty() => message.clone(),
            ClientError::Transport(_) => kind.fallback_error().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
