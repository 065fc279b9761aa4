//! Profile domain messages
//!
//! User intents (edits, submits, logout), session changes, and the results of
//! remote calls all arrive here.

use keel_contracts::RemoteError;
use keel_model::{
    PasswordField, ProfileField, ProfileRecord, SecureCredential, UserId,
};

#[derive(Debug, Clone)]
pub enum ProfileMessage {
    // Session
    /// The session's identity was observed (initially, or after a change)
    IdentityChanged(Option<UserId>),
    /// Result of reading the profile row for `identity`
    ProfileLoaded {
        identity: UserId,
        result: Result<ProfileRecord, RemoteError>,
    },

    // Personal information
    /// Overwrite one name field locally
    UpdateField(ProfileField, String),
    /// Write all three name fields to the store
    SubmitProfile,
    /// Result of the profile write
    ProfileSaved(Result<(), RemoteError>),

    // Password
    /// Overwrite one password input locally
    UpdatePasswordField(PasswordField, SecureCredential),
    /// Validate and send the new password
    SubmitPasswordChange,
    /// Result of the password update
    PasswordChanged(Result<(), RemoteError>),

    // Session actions
    /// Sign out and leave the screen
    Logout,
    /// Sign-out call finished; its result is only logged
    LogoutCompleted(Result<(), RemoteError>),
}

impl ProfileMessage {
    /// Get a static name for logging/debugging
    pub fn name(&self) -> &'static str {
        match self {
            Self::IdentityChanged(_) => "Profile::IdentityChanged",
            Self::ProfileLoaded { .. } => "Profile::ProfileLoaded",
            Self::UpdateField(..) => "Profile::UpdateField",
            Self::SubmitProfile => "Profile::SubmitProfile",
            Self::ProfileSaved(_) => "Profile::ProfileSaved",
            Self::UpdatePasswordField(..) => "Profile::UpdatePasswordField",
            Self::SubmitPasswordChange => "Profile::SubmitPasswordChange",
            Self::PasswordChanged(_) => "Profile::PasswordChanged",
            Self::Logout => "Profile::Logout",
            Self::LogoutCompleted(_) => "Profile::LogoutCompleted",
        }
    }
}
