use keel_contracts::{AuthClient, ProfileStore};
use std::sync::Arc;

/// Remote collaborators the profile handlers issue calls against.
#[derive(Clone)]
pub struct ProfileServices {
    pub profile_store: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthClient>,
}

impl ProfileServices {
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        auth: Arc<dyn AuthClient>,
    ) -> Self {
        Self {
            profile_store,
            auth,
        }
    }
}

impl std::fmt::Debug for ProfileServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileServices")
            .field("profile_store", &"<dyn ProfileStore>")
            .field("auth", &"<dyn AuthClient>")
            .finish()
    }
}
