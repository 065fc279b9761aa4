use keel_model::UserId;
use tokio::sync::watch;

/// Receiving half of the current-identity channel.
pub type IdentityReceiver = watch::Receiver<Option<UserId>>;

/// Supplies the authenticated user's identity, or its absence.
///
/// The identity is reactive: consumers hold an [`IdentityReceiver`] and
/// re-evaluate whenever it changes (login, logout, account switch).
pub trait SessionAccessor: Send + Sync {
    fn current_identity(&self) -> Option<UserId> {
        *self.subscribe().borrow()
    }

    fn subscribe(&self) -> IdentityReceiver;
}
