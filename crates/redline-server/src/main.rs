use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use redline_core::{config::Config, segmenter::SegmenterConfig, session::SessionStore};
use redline_services::{
    analysis::AnalysisClient, extraction::ExtractionClient, playbooks::PersistenceClient,
    storage::StorageClient,
};
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod logging;
mod routes;

// ── AppState ──────────────────────────────────────────────────────────────

pub struct AppState {
    pub config: Config,
    pub segmenter: SegmenterConfig,
    pub sessions: SessionStore,
    pub extraction: ExtractionClient,
    pub analysis: AnalysisClient,
    /// Clause-generation backend for playbook creation; same client
    /// type as `analysis`, separately addressable.
    pub genai: AnalysisClient,
    pub persistence: PersistenceClient,
    pub storage: StorageClient,
    pub start_time: Instant,
    pub chat_event_tx: broadcast::Sender<String>,
    pub log_tx: broadcast::Sender<String>,
    pub log_ring: Arc<std::sync::Mutex<VecDeque<String>>>,
}

// ── main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (log_tx, _log_rx) = broadcast::channel::<String>(256);
    let log_ring = Arc::new(std::sync::Mutex::new(VecDeque::new()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "redline_server=info,redline_services=info,redline_core=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(logging::BroadcastLayer {
            tx: log_tx.clone(),
            ring: Arc::clone(&log_ring),
        })
        .init();

    let config = Config::from_env()?;
    let timeout = config.request_timeout_s;

    let (chat_event_tx, _chat_rx) = broadcast::channel::<String>(256);

    let state = Arc::new(AppState {
        segmenter: SegmenterConfig::default(),
        sessions: SessionStore::new(config.session_max_age_hours),
        extraction: ExtractionClient::new(&config.extraction_url, timeout),
        analysis: AnalysisClient::new(&config.analysis_url, timeout),
        genai: AnalysisClient::new(&config.genai_url, timeout),
        persistence: PersistenceClient::new(&config.persistence_url, timeout),
        storage: StorageClient::new(
            &config.storage_url,
            &config.storage_bucket,
            &config.storage_token,
            timeout,
        ),
        start_time: Instant::now(),
        chat_event_tx,
        log_tx,
        log_ring,
        config,
    });

    // Session expiry sweep
    {
        let state = Arc::clone(&state);
        let interval = state.config.session_sweep_interval_s;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(interval)).await;
                state.sessions.sweep_expired().await;
            }
        });
    }

    let dist_dir = state.config.frontend_dist_dir.clone();
    let serve_dir = ServeDir::new(&dist_dir).fallback(tower_http::services::ServeFile::new(
        format!("{dist_dir}/index.html"),
    ));

    let max_body = state.config.max_upload_mb * 1024 * 1024;

    let app = Router::new()
        // Health
        .route("/api/health", get(routes::health))
        .route("/api/status", get(routes::get_status))
        // Extraction + segmentation
        .route("/api/extract", post(routes::extract))
        // Review
        .route("/api/review-contract", post(routes::review_contract))
        .route(
            "/api/review-contract-with-llm",
            post(routes::review_contract_with_llm),
        )
        // Playbooks
        .route(
            "/api/process-and-store-pdf",
            post(routes::process_and_store_pdf),
        )
        .route("/api/playbooks", post(routes::create_playbook))
        .route("/api/clauses-by-ids", post(routes::clauses_by_ids))
        // Upload
        .route("/api/upload", post(routes::upload))
        // Chat
        .route("/api/chat", post(routes::post_chat))
        .route("/api/chat/events", get(routes::sse_chat_events))
        .route(
            "/api/chat/sessions/:id/messages",
            get(routes::get_chat_messages),
        )
        .route("/api/chat/sessions/:id", delete(routes::delete_chat_session))
        // Negotiation simulator
        .route(
            "/api/negotiation/respond",
            post(routes::negotiation_respond),
        )
        .route(
            "/api/negotiation/highlights",
            post(routes::negotiation_highlights),
        )
        // SSE logs
        .route("/api/logs", get(routes::sse_logs))
        // Static front-end
        .fallback_service(serve_dir)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CorsLayer::permissive())
        .with_state(Arc::clone(&state));

    let bind = state.config.web_bind.clone();
    let port = state.config.web_port;
    let addr = format!("{bind}:{port}");

    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
