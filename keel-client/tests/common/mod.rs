#![allow(dead_code)]

use async_trait::async_trait;
use keel_client::common::messages::CrossDomainEvent;
use keel_client::domains::profile::{
    self, ProfileMessage, ProfileServices, ProfileState,
};
use keel_contracts::{
    AuthClient, IdentityReceiver, ProfileStore, RemoteError, RemoteResult,
    Router, SessionAccessor,
};
use keel_model::{
    ProfileFields, ProfileRecord, Route, SecureCredential, UserId,
};
use mockall::mock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, watch};
use uuid::Uuid;

mock! {
    pub Auth {}

    #[async_trait]
    impl AuthClient for Auth {
        async fn update_password(
            &self,
            new_password: &SecureCredential,
        ) -> RemoteResult<()>;

        async fn sign_out(&self) -> RemoteResult<()>;
    }
}

/// Auth mock that fails the test on any call.
pub fn silent_auth() -> MockAuth {
    let mut auth = MockAuth::new();
    auth.expect_update_password().never();
    auth.expect_sign_out().never();
    auth
}

pub fn user(n: u128) -> UserId {
    UserId(Uuid::from_u128(n))
}

pub fn record(
    first: Option<&str>,
    middle: Option<&str>,
    last: Option<&str>,
) -> ProfileRecord {
    ProfileRecord {
        first_name: first.map(str::to_string),
        middle_name: middle.map(str::to_string),
        last_name: last.map(str::to_string),
    }
}

/// In-memory profile store with scripted results and call recording.
pub struct FakeStore {
    read_result: Mutex<RemoteResult<ProfileRecord>>,
    write_result: Mutex<RemoteResult<()>>,
    reads: Mutex<Vec<UserId>>,
    writes: Mutex<Vec<(UserId, ProfileFields)>>,
    /// When set, reads wait for a notification before answering
    read_gate: Option<Arc<Notify>>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            read_result: Mutex::new(Ok(ProfileRecord::default())),
            write_result: Mutex::new(Ok(())),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            read_gate: None,
        }
    }
}

impl FakeStore {
    pub fn reading(result: RemoteResult<ProfileRecord>) -> Self {
        Self {
            read_result: Mutex::new(result),
            ..Self::default()
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.read_gate = Some(gate);
        self
    }

    pub fn set_read_result(&self, result: RemoteResult<ProfileRecord>) {
        *self.read_result.lock().unwrap() = result;
    }

    pub fn set_write_result(&self, result: RemoteResult<()>) {
        *self.write_result.lock().unwrap() = result;
    }

    pub fn reads(&self) -> Vec<UserId> {
        self.reads.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(UserId, ProfileFields)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for FakeStore {
    async fn read_profile(
        &self,
        identity: UserId,
    ) -> RemoteResult<ProfileRecord> {
        self.reads.lock().unwrap().push(identity);
        if let Some(gate) = &self.read_gate {
            gate.notified().await;
        }
        self.read_result.lock().unwrap().clone()
    }

    async fn write_profile(
        &self,
        identity: UserId,
        fields: &ProfileFields,
    ) -> RemoteResult<()> {
        self.writes.lock().unwrap().push((identity, fields.clone()));
        self.write_result.lock().unwrap().clone()
    }
}

/// Session whose identity tests flip by hand.
pub struct FakeSession {
    identity: watch::Sender<Option<UserId>>,
}

impl FakeSession {
    pub fn new(identity: Option<UserId>) -> Self {
        let (tx, _) = watch::channel(identity);
        Self { identity: tx }
    }

    pub fn set(&self, identity: Option<UserId>) {
        self.identity.send_replace(identity);
    }
}

impl SessionAccessor for FakeSession {
    fn subscribe(&self) -> IdentityReceiver {
        self.identity.subscribe()
    }
}

#[derive(Default)]
pub struct RecordingRouter {
    routes: Mutex<Vec<Route>>,
    calls: AtomicUsize,
}

impl RecordingRouter {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Router for RecordingRouter {
    fn redirect_to(&self, route: Route) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.routes.lock().unwrap().push(route);
    }
}

pub fn services(
    store: Arc<FakeStore>,
    auth: MockAuth,
) -> ProfileServices {
    ProfileServices::new(store, Arc::new(auth))
}

/// Apply `message` and every message its tasks produce, depth first by
/// arrival, returning all emitted events.
pub async fn drive(
    state: &mut ProfileState,
    services: &ProfileServices,
    message: ProfileMessage,
) -> Vec<CrossDomainEvent> {
    let mut queue = VecDeque::from([message]);
    let mut events = Vec::new();
    while let Some(message) = queue.pop_front() {
        let result = profile::update(state, services, message);
        events.extend(result.events);
        queue.extend(result.task.collect().await);
    }
    events
}

/// State already showing `fields` for `identity`.
pub async fn loaded_state(
    identity: UserId,
    fields: ProfileFields,
) -> ProfileState {
    let store = Arc::new(FakeStore::reading(Ok(ProfileRecord {
        first_name: Some(fields.first_name.clone()),
        middle_name: Some(fields.middle_name.clone()),
        last_name: Some(fields.last_name.clone()),
    })));
    let services = services(store, silent_auth());
    let mut state = ProfileState::default();
    drive(
        &mut state,
        &services,
        ProfileMessage::IdentityChanged(Some(identity)),
    )
    .await;
    state
}

pub fn remote_failure(message: &str) -> RemoteError {
    RemoteError::status(400, message)
}
