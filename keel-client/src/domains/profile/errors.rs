//! Failures surfaced on the account screen.
//!
//! The `Display` text of each variant is exactly what the user sees in the
//! relevant feedback region.

use keel_contracts::RemoteError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Reading the profile row failed. The remote error is logged, not shown.
    #[error("Failed to load user profile. Please try again.")]
    LoadFailed(#[source] RemoteError),

    #[error("Error updating profile: {0}")]
    SaveFailed(RemoteError),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },

    #[error("Error changing password: {0}")]
    PasswordUpdateFailed(RemoteError),
}
