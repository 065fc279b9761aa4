use thiserror::Error;

/// Failure of a call to a remote collaborator.
///
/// The `Display` output is the human-readable error text that ends up in
/// feedback messages, so variants carry the backend's own wording where one
/// was returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// No session is available to authorize the call.
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl RemoteError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
            || matches!(self.status_code(), Some(401 | 403))
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_is_the_backend_message() {
        let err = RemoteError::status(400, "new row violates policy");
        assert_eq!(err.to_string(), "new row violates policy");
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn unauthorized_covers_missing_session_and_auth_statuses() {
        assert!(RemoteError::NotAuthenticated.is_unauthorized());
        assert!(RemoteError::status(401, "JWT expired").is_unauthorized());
        assert!(!RemoteError::Transport("timed out".into()).is_unauthorized());
    }
}
