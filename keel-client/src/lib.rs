//! Keel account client library
//!
//! Contains the account-settings view-model and the pieces needed to run it:
//! the message/task runtime, HTTP adapters for the backend, and configuration.
//! The `keel-account` binary in `src/main.rs` is a thin driver over these.
//!
//! Notes
//! - The view-model never talks to the network directly; every remote call
//!   goes through the traits in `keel-contracts`.
//! - Public items are exposed mainly so integration tests can drive them.

pub mod app;
pub mod common;
pub mod domains;
pub mod infra;
pub mod subscriptions;
