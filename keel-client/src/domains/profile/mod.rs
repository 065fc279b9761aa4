//! Account profile domain
//!
//! Owns the account-settings screen's logic:
//! - Personal information: first, middle and last name, loaded once per
//!   observed identity and saved on request
//! - Password: new/confirm inputs validated locally, then sent to the auth
//!   backend
//! - Session: log out and leave the screen
//!
//! Handlers are synchronous; remote calls are returned as [`Task`]s whose
//! results come back as [`ProfileMessage`]s.
//!
//! [`Task`]: crate::common::Task

pub mod errors;
pub mod messages;
pub mod services;
pub mod state;
pub mod update;

pub use errors::ProfileError;
pub use messages::ProfileMessage;
pub use services::ProfileServices;
pub use state::{
    Feedback, FeedbackKind, LoadState, MIN_PASSWORD_LENGTH,
    PasswordChangeFields, ProfileState,
};

use crate::common::messages::DomainUpdateResult;

/// Update profile state
pub fn update(
    state: &mut ProfileState,
    services: &ProfileServices,
    message: ProfileMessage,
) -> DomainUpdateResult {
    update::handle_message(state, services, message)
}
