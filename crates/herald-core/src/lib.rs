//! herald-core
//!
//! Core building blocks for the herald notification job: read pending
//! order-notification records from the document store, push each one to its
//! device, flip the record's idempotency flag.
//!
//! # Module layout
//! - **domain**: record and message types (ids, record, message)
//! - **ports**: abstraction layer (NotificationStore, PushSender)
//! - **app**: the dispatch loop and its per-run summary
//! - **impls**: in-memory store (tests and local development)
//! - **firebase**: production implementations (credentials, token, rtdb, fcm)
//! - **config** / **error**: environment settings and the error type

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod firebase;
pub mod impls;
pub mod ports;

pub use app::{DispatchSummary, NotificationDispatcher};
pub use config::JobConfig;
pub use error::HeraldError;
