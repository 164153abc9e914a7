use std::sync::Arc;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod flash;
mod forms;
#[cfg(test)]
mod memory;
mod recipes;
mod state;
mod templates;
#[cfg(test)]
mod test_support;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "recipebook=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let pool = db::connect(&config.database_url).await?;

    if let Err(e) = db::migrate(&pool).await {
        tracing::warn!(error = %e, "migrations failed; continuing");
    }

    let addr = config.bind_addr()?;
    let app = app::build_app(AppState::from_pool(pool, config));
    app::serve(app, addr).await
}
