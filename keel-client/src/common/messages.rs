use keel_model::Route;

use crate::common::task::Task;
use crate::domains::profile::ProfileMessage;

/// Events a domain emits for collaborators outside itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossDomainEvent {
    /// Leave the current screen for `Route`.
    NavigateTo(Route),
}

/// Result of a domain update that includes both a task and events to emit
#[derive(Debug)]
pub struct DomainUpdateResult {
    /// The task to execute (may produce more messages)
    pub task: Task<ProfileMessage>,
    /// Events to broadcast immediately
    pub events: Vec<CrossDomainEvent>,
}

impl DomainUpdateResult {
    /// Nothing to run, nothing to broadcast
    pub fn none() -> Self {
        Self::task(Task::none())
    }

    /// Create a result with just a task
    pub fn task(task: Task<ProfileMessage>) -> Self {
        Self {
            task,
            events: Vec::new(),
        }
    }

    /// Create a result with task and events
    pub fn with_events(
        task: Task<ProfileMessage>,
        events: Vec<CrossDomainEvent>,
    ) -> Self {
        Self { task, events }
    }

    pub fn is_idle(&self) -> bool {
        self.task.is_none() && self.events.is_empty()
    }
}
