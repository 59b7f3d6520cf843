//! Job configuration from the environment.

use std::path::PathBuf;

/// Runtime settings for one job invocation.
///
/// Everything has a working default; the job runs unconfigured against the
/// project's default Realtime Database instance. There are no CLI flags and
/// no config file.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Realtime Database base URL. Defaults to the project's default
    /// instance, derived from the service-account project id.
    pub database_url: Option<String>,

    /// Collection (top-level path) holding the notification records.
    pub collection: String,

    /// Path of the local service-account key file, tried before the
    /// environment variable.
    pub credentials_file: PathBuf,
}

impl JobConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("HERALD_DATABASE_URL"),
            collection: lookup("HERALD_COLLECTION")
                .unwrap_or_else(|| "notifications".to_string()),
            credentials_file: lookup("HERALD_CREDENTIALS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("serviceAccount.json")),
        }
    }

    /// The database URL to use, falling back to the project default.
    pub fn database_url_for(&self, project_id: &str) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("https://{project_id}-default-rtdb.firebaseio.com"))
    }
}
