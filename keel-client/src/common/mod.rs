pub mod messages;
pub mod task;

pub use messages::{CrossDomainEvent, DomainUpdateResult};
pub use task::Task;
