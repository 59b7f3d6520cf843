use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use herald_core::config::JobConfig;
use herald_core::firebase::{AccessTokenProvider, FcmSender, RtdbStore, ServiceAccount};
use herald_core::NotificationDispatcher;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = JobConfig::from_env();

    // Missing credentials are the one fatal startup condition: exit non-zero
    // before any query or send. Everything after this point exits 0 so the
    // external scheduler never sees the job "fail".
    let account = match ServiceAccount::resolve(&config.credentials_file) {
        Ok(account) => account,
        Err(err) => {
            error!(error = %err, "firebase credentials not found");
            std::process::exit(1);
        }
    };

    info!(project_id = %account.project_id, "starting notification job");

    let http = reqwest::Client::new();
    let tokens = Arc::new(AccessTokenProvider::new(account.clone(), http.clone()));

    let store = RtdbStore::new(
        http.clone(),
        config.database_url_for(&account.project_id),
        config.collection.clone(),
        tokens.clone(),
    );
    let sender = FcmSender::new(http, &account.project_id, tokens);

    let dispatcher = NotificationDispatcher::new(Arc::new(store), Arc::new(sender));

    match dispatcher.run().await {
        Ok(summary) => {
            info!(
                fetched = summary.fetched,
                sent = summary.sent,
                skipped_no_token = summary.skipped_no_token,
                already_marked = summary.already_marked,
                failed = summary.failed,
                "notification job completed"
            );
        }
        Err(err) => {
            error!(error = %err, "notification job failed");
        }
    }
}
