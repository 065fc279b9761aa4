//! Profile domain state
//!
//! Everything the account screen shows lives here. Remote calls never touch
//! it directly; only update handlers do, when a result message arrives.

use keel_model::{PasswordField, ProfileFields, SecureCredential, UserId};

use super::errors::ProfileError;

/// Shortest accepted new password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const PROFILE_SAVED_TEXT: &str = "Profile updated successfully!";
pub const PASSWORD_CHANGED_TEXT: &str = "Password changed successfully!";

/// Whether the editable form or a placeholder is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Failure,
}

/// Outcome text shown under one of the two forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Failure,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

impl From<&ProfileError> for Feedback {
    fn from(error: &ProfileError) -> Self {
        Self::failure(error.to_string())
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// New-password inputs. Wiped after a successful change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeFields {
    pub new_password: SecureCredential,
    pub confirm_new_password: SecureCredential,
}

impl PasswordChangeFields {
    pub fn set(&mut self, field: PasswordField, value: SecureCredential) {
        match field {
            PasswordField::NewPassword => self.new_password = value,
            PasswordField::ConfirmNewPassword => {
                self.confirm_new_password = value
            }
        }
    }

    /// Validate inputs, stopping at the first failure: confirmation must
    /// match, then the length threshold must be met.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.new_password != self.confirm_new_password {
            return Err(ProfileError::PasswordMismatch);
        }
        // Counted in chars, not UTF-16 units: one emoji is one character.
        if self.new_password.char_count() < MIN_PASSWORD_LENGTH {
            return Err(ProfileError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.new_password.clear();
        self.confirm_new_password.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.new_password.is_empty() && self.confirm_new_password.is_empty()
    }
}

/// Account screen state
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    /// Identity the current contents belong to
    pub identity: Option<UserId>,
    /// Set once the first identity observation has been handled
    pub activated: bool,

    pub load_state: LoadState,

    // Personal information
    pub fields: ProfileFields,
    pub profile_feedback: Option<Feedback>,

    // Password
    pub password: PasswordChangeFields,
    pub password_feedback: Option<Feedback>,
}

impl ProfileState {
    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn clear_feedback(&mut self) {
        self.profile_feedback = None;
        self.password_feedback = None;
    }

    /// Drop everything tied to the previous identity and go back to the
    /// loading placeholder.
    pub fn reset(&mut self) {
        self.load_state = LoadState::Loading;
        self.fields.clear();
        self.password.clear();
        self.clear_feedback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passwords(new: &str, confirm: &str) -> PasswordChangeFields {
        PasswordChangeFields {
            new_password: new.into(),
            confirm_new_password: confirm.into(),
        }
    }

    #[test]
    fn mismatch_is_reported_before_length() {
        assert_eq!(
            passwords("abc", "abd").validate(),
            Err(ProfileError::PasswordMismatch)
        );
    }

    #[test]
    fn short_matching_passwords_are_rejected() {
        assert_eq!(
            passwords("abcd", "abcd").validate(),
            Err(ProfileError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            passwords("", "").validate(),
            Err(ProfileError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn six_characters_is_enough() {
        assert_eq!(passwords("abc123", "abc123").validate(), Ok(()));
        // Multibyte characters count once each.
        assert_eq!(passwords("ääääää", "ääääää").validate(), Ok(()));
    }

    #[test]
    fn astral_characters_count_once_each() {
        // Six UTF-16 units, but only three characters.
        assert_eq!(
            passwords("😀😀😀", "😀😀😀").validate(),
            Err(ProfileError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            passwords("😀😀😀😀😀😀", "😀😀😀😀😀😀").validate(),
            Ok(())
        );
    }

    #[test]
    fn reset_returns_to_loading_and_empties_forms() {
        let mut state = ProfileState {
            load_state: LoadState::Ready,
            fields: ProfileFields::new("A", "B", "C"),
            password: passwords("abc123", "abc123"),
            profile_feedback: Some(Feedback::success(PROFILE_SAVED_TEXT)),
            ..Default::default()
        };
        state.reset();

        assert!(state.is_loading());
        assert_eq!(state.fields, ProfileFields::default());
        assert!(state.password.is_empty());
        assert_eq!(state.profile_feedback, None);
    }
}
