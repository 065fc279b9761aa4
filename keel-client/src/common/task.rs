//! Deferred work returned from update handlers.
//!
//! A [`Task`] wraps zero or more futures that each resolve to a message. The
//! runtime spawns them and feeds the resulting messages back through the
//! update loop, so handlers stay synchronous and never hold state across an
//! `.await`.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M: Send + 'static> Task<M> {
    /// A task that does nothing.
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and turn its output into a message with `f`.
    pub fn perform<T, Fut, F>(future: Fut, f: F) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        F: FnOnce(T) -> M + Send + 'static,
    {
        Self {
            futures: vec![future.map(f).boxed()],
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_none()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, M>> {
        self.futures
    }

    /// Drive every future to completion and return the messages in order.
    pub async fn collect(self) -> Vec<M> {
        future::join_all(self.futures).await
    }
}

impl<M: Send + 'static> Default for Task<M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<M> fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.futures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn perform_maps_output_into_message() {
        let task = Task::perform(async { 20 + 1 }, |n| n * 2);
        assert_eq!(task.collect().await, vec![42]);
    }

    #[tokio::test]
    async fn perform_yields_exactly_one_message() {
        let task = Task::perform(async { "saved" }, str::to_string);
        assert_eq!(task.len(), 1);
        assert!(!task.is_empty());
        assert_eq!(task.collect().await, vec!["saved".to_string()]);
    }

    #[test]
    fn none_is_empty() {
        assert!(Task::<()>::none().is_none());
    }
}
