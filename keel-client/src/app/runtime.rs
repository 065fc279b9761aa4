//! Single-consumer update loop for the account screen.
//!
//! Messages are applied one at a time against [`ProfileState`]. Tasks
//! returned by handlers are spawned on the tokio runtime and their results
//! re-enter the loop as ordinary messages, so state only changes when an
//! awaited call resolves. Nothing is de-duplicated or cancelled: two saves in
//! a row race against the backend.

use keel_contracts::{Router, SessionAccessor};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::common::messages::{CrossDomainEvent, DomainUpdateResult};
use crate::domains::profile::{
    self, ProfileMessage, ProfileServices, ProfileState,
};
use crate::subscriptions;

enum Envelope {
    /// A spawned task finished; `None` when it panicked or was cancelled
    Completed(Option<ProfileMessage>),
    /// Sent from outside (user input, subscriptions)
    External(ProfileMessage),
}

/// Cloneable handle for feeding messages into a running [`ProfileRuntime`].
#[derive(Debug, Clone)]
pub struct ProfileSender {
    inner: mpsc::UnboundedSender<ProfileMessage>,
}

impl ProfileSender {
    /// Returns false once the runtime is gone.
    pub fn send(&self, message: ProfileMessage) -> bool {
        self.inner.send(message).is_ok()
    }
}

pub struct ProfileRuntime {
    state: ProfileState,
    services: ProfileServices,
    router: Arc<dyn Router>,
    completions_tx: mpsc::UnboundedSender<Option<ProfileMessage>>,
    completions_rx: mpsc::UnboundedReceiver<Option<ProfileMessage>>,
    external_tx: mpsc::UnboundedSender<ProfileMessage>,
    external_rx: mpsc::UnboundedReceiver<ProfileMessage>,
    in_flight: usize,
    subscription: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ProfileRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRuntime")
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}

impl ProfileRuntime {
    pub fn new(services: ProfileServices, router: Arc<dyn Router>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (external_tx, external_rx) = mpsc::unbounded_channel();
        Self {
            state: ProfileState::default(),
            services,
            router,
            completions_tx,
            completions_rx,
            external_tx,
            external_rx,
            in_flight: 0,
            subscription: None,
        }
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    /// Number of spawned tasks whose result has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn sender(&self) -> ProfileSender {
        ProfileSender {
            inner: self.external_tx.clone(),
        }
    }

    /// Start reacting to the session's identity.
    ///
    /// The current identity is dispatched immediately; later changes arrive
    /// through the external queue. Replaces any previous subscription.
    pub fn subscribe_identity(&mut self, session: &dyn SessionAccessor) {
        if let Some(previous) = self.subscription.take() {
            previous.abort();
        }
        let mut receiver = session.subscribe();
        let current = *receiver.borrow_and_update();
        self.subscription = Some(subscriptions::identity_changes(
            receiver,
            self.external_tx.clone(),
        ));
        self.dispatch(ProfileMessage::IdentityChanged(current));
    }

    /// Apply `message` now and start whatever work it asks for.
    pub fn dispatch(&mut self, message: ProfileMessage) {
        let DomainUpdateResult { task, events } =
            profile::update(&mut self.state, &self.services, message);

        for event in events {
            match event {
                CrossDomainEvent::NavigateTo(route) => {
                    log::debug!("[Runtime] Navigating to {}", route);
                    self.router.redirect_to(route);
                }
            }
        }

        for future in task.into_futures() {
            self.in_flight += 1;
            let tx = self.completions_tx.clone();
            let work = tokio::spawn(future);
            tokio::spawn(async move {
                // Every spawned task reports back exactly once, even when it
                // panics, so `in_flight` always returns to zero.
                let message = match work.await {
                    Ok(message) => Some(message),
                    Err(e) => {
                        log::error!("[Runtime] Task did not complete: {}", e);
                        None
                    }
                };
                // A send error only means the runtime was dropped mid-flight.
                let _ = tx.send(message);
            });
        }
    }

    /// Wait for the next message from either queue and apply it.
    pub async fn next(&mut self) {
        let envelope = tokio::select! {
            Some(message) = self.completions_rx.recv() => {
                Envelope::Completed(message)
            }
            Some(message) = self.external_rx.recv() => {
                Envelope::External(message)
            }
        };
        self.apply(envelope);
    }

    /// Apply queued input and wait for every in-flight task to report back,
    /// including tasks spawned by those results.
    pub async fn run_until_idle(&mut self) {
        loop {
            while let Ok(message) = self.external_rx.try_recv() {
                self.apply(Envelope::External(message));
            }
            if self.in_flight == 0 {
                break;
            }
            match self.completions_rx.recv().await {
                Some(message) => self.apply(Envelope::Completed(message)),
                None => break,
            }
        }
    }

    fn apply(&mut self, envelope: Envelope) {
        let message = match envelope {
            Envelope::Completed(message) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                message
            }
            Envelope::External(message) => Some(message),
        };
        if let Some(message) = message {
            self.dispatch(message);
        }
    }
}

impl Drop for ProfileRuntime {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
    }
}
