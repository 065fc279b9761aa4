//! Session-driven inputs to the profile domain

use keel_contracts::IdentityReceiver;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domains::profile::ProfileMessage;

/// Forward every later identity change as [`ProfileMessage::IdentityChanged`].
///
/// Only changes after the receiver was last marked seen are forwarded;
/// callers dispatch the current value themselves so the first load starts
/// synchronously. The forwarder stops when the session's sender is dropped
/// or the receiving side of `sink` goes away.
pub fn identity_changes(
    mut identity: IdentityReceiver,
    sink: mpsc::UnboundedSender<ProfileMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while identity.changed().await.is_ok() {
            let current = *identity.borrow_and_update();
            log::debug!(
                "[Subscriptions] Identity changed: {}",
                current.map_or_else(|| "none".to_string(), |id| id.to_string())
            );
            if sink.send(ProfileMessage::IdentityChanged(current)).is_err() {
                break;
            }
        }
    })
}
