use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::Utc;
use redline_core::{
    negotiation, segmenter,
    types::{ChatRole, NegotiationStyle, RiskLevel, StoredClause, VoiceGender},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{BroadcastStream, UnboundedReceiverStream};
use tokio_stream::StreamExt;

use crate::AppState;

// ── Error helper ──────────────────────────────────────────────────────────

fn bad_gateway(e: impl std::fmt::Display) -> StatusCode {
    tracing::error!("backend error: {e}");
    StatusCode::BAD_GATEWAY
}

// ── Request body types ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PdfUrlBody {
    pub pdf_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcessAndStoreBody {
    pub pdf_url: String,
    pub playbook_name: String,
}

#[derive(Deserialize)]
pub(crate) struct PlaybookBody {
    pub name: String,
    pub clauses: Vec<StoredClause>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClausesByIdsBody {
    pub clause_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatBody {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NegotiationBody {
    pub message: String,
    pub style: NegotiationStyle,
    pub gender: VoiceGender,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct HighlightsBody {
    pub conversation: String,
    #[serde(default)]
    pub context: String,
}

// ── Serializable wrappers ─────────────────────────────────────────────────

/// A segmented clause decorated with its heuristic risk tag.
#[derive(Serialize)]
pub(crate) struct TaggedClauseJson {
    pub clause_type: String,
    pub clause_text: String,
    pub risk_level: RiskLevel,
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn get_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let uptime_s = state.start_time.elapsed().as_secs();
    let active_sessions = state.sessions.active_count().await;
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_s": uptime_s,
        "assistant_name": state.config.assistant_name,
        "analysis_url": state.config.analysis_url,
        "genai_url": state.config.genai_url,
        "persistence_url": state.config.persistence_url,
        "storage_url": state.config.storage_url,
        "active_sessions": active_sessions,
    }))
}

// Extraction + segmentation

pub(crate) async fn extract(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PdfUrlBody>,
) -> Result<Json<Value>, StatusCode> {
    if body.pdf_url.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let text = state
        .extraction
        .extract_text(&body.pdf_url)
        .await
        .map_err(bad_gateway)?;

    let clauses: Vec<TaggedClauseJson> = segmenter::segment(&text, &state.segmenter)
        .into_iter()
        .map(|c| {
            let risk_level = segmenter::assess_risk(&c);
            TaggedClauseJson {
                clause_type: c.clause_type,
                clause_text: c.clause_text,
                risk_level,
            }
        })
        .collect();

    tracing::info!("segmented {} clause(s) from {}", clauses.len(), body.pdf_url);
    Ok(Json(json!({ "clauses": clauses })))
}

// Review

pub(crate) async fn review_contract(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PdfUrlBody>,
) -> Result<Json<Value>, StatusCode> {
    if body.pdf_url.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let report = state
        .analysis
        .analyze_contract(&body.pdf_url)
        .await
        .map_err(bad_gateway)?;
    Ok(Json(report))
}

pub(crate) async fn review_contract_with_llm(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PdfUrlBody>,
) -> Result<Json<Value>, StatusCode> {
    if body.pdf_url.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let suggestions = state
        .analysis
        .review_suggestions(&body.pdf_url)
        .await
        .map_err(bad_gateway)?;
    Ok(Json(json!(suggestions)))
}

// Playbooks

pub(crate) async fn process_and_store_pdf(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessAndStoreBody>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if body.pdf_url.is_empty() || body.playbook_name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let clauses = state
        .genai
        .generate_clauses(&body.pdf_url)
        .await
        .map_err(bad_gateway)?;
    let playbook = state
        .persistence
        .save_playbook(&body.playbook_name, clauses)
        .await
        .map_err(bad_gateway)?;
    Ok((StatusCode::CREATED, Json(json!(playbook))))
}

pub(crate) async fn create_playbook(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlaybookBody>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if body.name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let playbook = state
        .persistence
        .save_playbook(&body.name, body.clauses)
        .await
        .map_err(bad_gateway)?;
    Ok((StatusCode::CREATED, Json(json!(playbook))))
}

pub(crate) async fn clauses_by_ids(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClausesByIdsBody>,
) -> Result<Json<Value>, StatusCode> {
    let ids: Vec<String> = body
        .clause_ids
        .into_iter()
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let clauses = state
        .persistence
        .clauses_by_ids(ids)
        .await
        .map_err(bad_gateway)?;
    Ok(Json(json!(clauses)))
}

// Upload

pub(crate) async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    let max_bytes = state.config.max_upload_mb * 1024 * 1024;
    let mut public_urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("files") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("contract.pdf").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/pdf")
            .to_string();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        if bytes.len() > max_bytes {
            tracing::warn!("upload {} rejected: {} bytes over cap", file_name, bytes.len());
            return Err(StatusCode::PAYLOAD_TOO_LARGE);
        }
        let url = state
            .storage
            .upload(&file_name, &content_type, bytes.to_vec())
            .await
            .map_err(bad_gateway)?;
        public_urls.push(url);
    }

    if public_urls.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({ "publicUrls": public_urls })))
}

// Chat

fn publish_chat_event(state: &AppState, session_id: &str, role: &str, text: &str) {
    let event = json!({
        "role": role,
        "text": text,
        "ts": Utc::now().timestamp(),
        "session": session_id,
    })
    .to_string();
    let _ = state.chat_event_tx.send(event);
}

pub(crate) async fn post_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> Result<Json<Value>, StatusCode> {
    if body.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let session_id = state.sessions.ensure(body.session_id.as_deref()).await;
    state
        .sessions
        .append(&session_id, ChatRole::User, &body.message)
        .await;
    publish_chat_event(&state, &session_id, "user", &body.message);

    let response = match state.analysis.chat(&body.message, &session_id).await {
        Ok(reply) => reply.response,
        Err(e) => {
            tracing::warn!("chat backend unavailable, serving fallback: {e}");
            negotiation::fallback_chat_reply(&body.message).to_string()
        },
    };

    state
        .sessions
        .append(&session_id, ChatRole::Assistant, &response)
        .await;
    publish_chat_event(&state, &session_id, "assistant", &response);

    Ok(Json(json!({ "response": response, "sessionId": session_id })))
}

pub(crate) async fn get_chat_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    match state.sessions.history(&id).await {
        None => Err(StatusCode::NOT_FOUND),
        Some(turns) => Ok(Json(json!({ "messages": turns }))),
    }
}

pub(crate) async fn delete_chat_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    if state.sessions.reset(&id).await {
        Ok(StatusCode::OK)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

pub(crate) async fn sse_chat_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let rx = state.chat_event_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(data) => Some(Ok(Event::default().data(data))),
        _ => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}

// Negotiation simulator

pub(crate) async fn negotiation_respond(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NegotiationBody>,
) -> Result<Json<Value>, StatusCode> {
    if body.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    tracing::debug!(style = ?body.style, voice = ?body.gender, "negotiation turn");

    let session_id = state.sessions.ensure(body.session_id.as_deref()).await;
    state
        .sessions
        .append(&session_id, ChatRole::User, &body.message)
        .await;

    let response = negotiation::counterpart_reply(body.style, &body.context);
    state
        .sessions
        .append(&session_id, ChatRole::Assistant, &response)
        .await;

    Ok(Json(json!({ "response": response, "sessionId": session_id })))
}

pub(crate) async fn negotiation_highlights(Json(body): Json<HighlightsBody>) -> Json<Value> {
    let highlights = negotiation::conversation_highlights(&body.conversation, &body.context);
    Json(json!({ "highlights": highlights }))
}

// SSE logs — replays ring buffer history then streams live events

pub(crate) async fn sse_logs(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    // Subscribe before snapshotting ring to avoid race
    let live_rx = state.log_tx.subscribe();
    let history: Vec<String> = state
        .log_ring
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .cloned()
        .collect();
    tokio::spawn(async move {
        for line in history {
            if tx.send(line).is_err() {
                return;
            }
        }
        let mut live_rx = live_rx;
        loop {
            match live_rx.recv().await {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                },
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    });
    let stream = UnboundedReceiverStream::new(rx)
        .map(|data| Ok::<_, std::convert::Infallible>(Event::default().data(data)));
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}
