mod config;
mod handlers;
mod response;
mod router;
mod state;
mod storage;

use lambda_http::{run, service_fn, Error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userdir=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing configuration is fatal: refuse to start instead of
    // answering every request with an error.
    let config = Config::from_env()?;

    // One client and state for the process lifetime, shared by every
    // invocation.
    let state = AppState::from_config(&config).await;

    tracing::info!(table = %config.table_name, "serving users API");

    run(service_fn(|event| {
        let state = state.clone();
        async move { router::handle(event, state).await }
    }))
    .await
}
