//! Profile update handlers
//!
//! Handles all ProfileMessage variants and updates state accordingly. Remote
//! failures are converted to feedback here and never propagate further.

use keel_contracts::RemoteError;
use keel_model::{
    PasswordField, ProfileField, ProfileRecord, Route, SecureCredential,
    UserId,
};

use super::errors::ProfileError;
use super::messages::ProfileMessage;
use super::services::ProfileServices;
use super::state::{
    Feedback, LoadState, PASSWORD_CHANGED_TEXT, PROFILE_SAVED_TEXT,
    ProfileState,
};
use crate::common::messages::{CrossDomainEvent, DomainUpdateResult};
use crate::common::task::Task;

/// Main message handler for the profile domain
pub fn handle_message(
    state: &mut ProfileState,
    services: &ProfileServices,
    message: ProfileMessage,
) -> DomainUpdateResult {
    log::trace!("[Profile] handling {}", message.name());

    match message {
        ProfileMessage::IdentityChanged(identity) => {
            handle_identity_changed(state, services, identity)
        }
        ProfileMessage::ProfileLoaded { identity, result } => {
            handle_profile_loaded(state, identity, result)
        }
        ProfileMessage::UpdateField(field, value) => {
            handle_update_field(state, field, value)
        }
        ProfileMessage::SubmitProfile => handle_submit_profile(state, services),
        ProfileMessage::ProfileSaved(result) => {
            handle_profile_saved(state, result)
        }
        ProfileMessage::UpdatePasswordField(field, value) => {
            handle_update_password_field(state, field, value)
        }
        ProfileMessage::SubmitPasswordChange => {
            handle_submit_password_change(state, services)
        }
        ProfileMessage::PasswordChanged(result) => {
            handle_password_changed(state, result)
        }
        ProfileMessage::Logout => handle_logout(services),
        ProfileMessage::LogoutCompleted(result) => {
            handle_logout_completed(state, result)
        }
    }
}

fn redirect_to_login() -> DomainUpdateResult {
    DomainUpdateResult::with_events(
        Task::none(),
        vec![CrossDomainEvent::NavigateTo(Route::Login)],
    )
}

/// Load once per distinct identity; leave for login when there is none.
fn handle_identity_changed(
    state: &mut ProfileState,
    services: &ProfileServices,
    identity: Option<UserId>,
) -> DomainUpdateResult {
    if state.activated && state.identity == identity {
        return DomainUpdateResult::none();
    }
    state.activated = true;
    state.identity = identity;
    state.reset();

    let Some(identity) = identity else {
        log::info!("[Profile] No authenticated user, redirecting to login");
        return redirect_to_login();
    };

    log::debug!("[Profile] Loading profile for user {}", identity);
    let store = services.profile_store.clone();
    DomainUpdateResult::task(Task::perform(
        async move { store.read_profile(identity).await },
        move |result| ProfileMessage::ProfileLoaded { identity, result },
    ))
}

fn handle_profile_loaded(
    state: &mut ProfileState,
    identity: UserId,
    result: Result<ProfileRecord, RemoteError>,
) -> DomainUpdateResult {
    if state.identity != Some(identity) {
        log::debug!(
            "[Profile] Discarding profile for {} (current identity changed)",
            identity
        );
        return DomainUpdateResult::none();
    }

    match result {
        Ok(record) => {
            state.fields = record.into();
        }
        Err(error) => {
            log::error!("Error fetching user profile: {}", error);
            state.profile_feedback =
                Some(Feedback::from(&ProfileError::LoadFailed(error)));
        }
    }
    state.load_state = LoadState::Ready;
    DomainUpdateResult::none()
}

fn handle_update_field(
    state: &mut ProfileState,
    field: ProfileField,
    value: String,
) -> DomainUpdateResult {
    state.fields.set(field, value);
    DomainUpdateResult::none()
}

fn handle_submit_profile(
    state: &mut ProfileState,
    services: &ProfileServices,
) -> DomainUpdateResult {
    state.clear_feedback();

    let Some(identity) = state.identity else {
        log::warn!("[Profile] Save requested without an authenticated user");
        state.profile_feedback = Some(Feedback::from(
            &ProfileError::SaveFailed(RemoteError::NotAuthenticated),
        ));
        return DomainUpdateResult::none();
    };

    let fields = state.fields.clone();
    let store = services.profile_store.clone();
    DomainUpdateResult::task(Task::perform(
        async move { store.write_profile(identity, &fields).await },
        ProfileMessage::ProfileSaved,
    ))
}

fn handle_profile_saved(
    state: &mut ProfileState,
    result: Result<(), RemoteError>,
) -> DomainUpdateResult {
    match result {
        Ok(()) => {
            log::info!("Profile updated successfully");
            state.profile_feedback = Some(Feedback::success(PROFILE_SAVED_TEXT));
        }
        Err(error) => {
            log::error!("Error updating profile: {}", error);
            state.profile_feedback =
                Some(Feedback::from(&ProfileError::SaveFailed(error)));
        }
    }
    DomainUpdateResult::none()
}

fn handle_update_password_field(
    state: &mut ProfileState,
    field: PasswordField,
    value: SecureCredential,
) -> DomainUpdateResult {
    state.password.set(field, value);
    DomainUpdateResult::none()
}

fn handle_submit_password_change(
    state: &mut ProfileState,
    services: &ProfileServices,
) -> DomainUpdateResult {
    state.clear_feedback();

    if let Err(error) = state.password.validate() {
        state.password_feedback = Some(Feedback::from(&error));
        return DomainUpdateResult::none();
    }

    let new_password = state.password.new_password.clone();
    let auth = services.auth.clone();
    DomainUpdateResult::task(Task::perform(
        async move { auth.update_password(&new_password).await },
        ProfileMessage::PasswordChanged,
    ))
}

fn handle_password_changed(
    state: &mut ProfileState,
    result: Result<(), RemoteError>,
) -> DomainUpdateResult {
    match result {
        Ok(()) => {
            log::info!("Password changed successfully");
            state.password_feedback =
                Some(Feedback::success(PASSWORD_CHANGED_TEXT));
            state.password.clear();
        }
        Err(error) => {
            log::error!("Error changing password: {}", error);
            state.password_feedback =
                Some(Feedback::from(&ProfileError::PasswordUpdateFailed(error)));
        }
    }
    DomainUpdateResult::none()
}

fn handle_logout(services: &ProfileServices) -> DomainUpdateResult {
    let auth = services.auth.clone();
    DomainUpdateResult::task(Task::perform(
        async move { auth.sign_out().await },
        ProfileMessage::LogoutCompleted,
    ))
}

// The sign-out result does not change what the user sees.
fn handle_logout_completed(
    state: &mut ProfileState,
    result: Result<(), RemoteError>,
) -> DomainUpdateResult {
    if let Err(error) = result {
        log::warn!("[Profile] Sign-out failed: {}", error);
    }

    // The session may already have reported the identity loss, which
    // redirected on its own.
    if state.activated && state.identity.is_none() {
        return DomainUpdateResult::none();
    }
    state.activated = true;
    state.identity = None;
    state.reset();
    redirect_to_login()
}
