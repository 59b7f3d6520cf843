use thiserror::Error;

/// Error type for the notification job.
///
/// Startup errors (`Credentials`, `Config`) are fatal: the binary exits
/// non-zero before any query or send. Everything else surfaces through the
/// dispatcher, which isolates it per record or fails the run as a whole.
#[derive(Debug, Error)]
pub enum HeraldError {
    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("token exchange failed: {0}")]
    Token(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("push delivery failed: {0}")]
    Push(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
