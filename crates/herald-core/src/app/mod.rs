//! App - the dispatch loop wired on top of the ports.

pub mod dispatcher;
pub mod summary;

pub use dispatcher::NotificationDispatcher;
pub use summary::DispatchSummary;
