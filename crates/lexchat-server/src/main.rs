mod routes;

use std::sync::Arc;
use std::time::Instant;

use lexchat_agent::OpenRouterBackend;
use lexchat_core::{agent::CompletionBackend, config::Config, session::SessionStore};
use tracing::info;

const SESSION_SWEEP_S: u64 = 300;

// ── AppState ──────────────────────────────────────────────────────────────

pub struct AppState {
    pub sessions: SessionStore,
    pub backend: Arc<dyn CompletionBackend>,
    pub start_time: Instant,
}

// ── main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lexchat_server=info,lexchat_core=info,lexchat_agent=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    let backend: Arc<dyn CompletionBackend> = Arc::new(OpenRouterBackend::from_config(&config));
    info!(
        model = %config.openrouter_model,
        base_url = %config.openrouter_base_url,
        party_format = ?config.party_format,
        "completion backend ready"
    );

    let sessions = SessionStore::new(config.party_format)
        .with_max_age(chrono::Duration::hours(config.session_max_age_hours));

    // Session eviction loop
    {
        let sessions = sessions.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tokio::time::Duration::from_secs(SESSION_SWEEP_S)).await;
                sessions.evict_expired().await;
            }
        });
    }

    let state = Arc::new(AppState {
        sessions,
        backend,
        start_time: Instant::now(),
    });

    let app = routes::router(state);

    let addr = config.bind_addr();
    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
