//! Impls - in-memory store for tests and local development.
//!
//! Production implementations (Realtime Database, FCM) live in
//! [`crate::firebase`].

pub mod memory;

pub use memory::InMemoryStore;
