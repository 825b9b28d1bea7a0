use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use lexchat_core::{
    agent::answer_question,
    catalog::DocumentType,
    dialogue::{DraftingSession, Turn},
    ChatEntry, Stage,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::AppState;

// ── Request body types ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct MessageBody {
    pub text: String,
}

#[derive(Deserialize)]
pub(crate) struct ClarifyBody {
    pub question: String,
}

// ── Serializable wrappers ─────────────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct SessionJson {
    pub id: String,
    pub created_at: String,
    pub stage: Stage,
    pub doc_type: Option<DocumentType>,
    pub history: Vec<ChatEntry>,
    pub draft_ready: bool,
    pub draft_file_name: Option<String>,
}

impl From<DraftingSession> for SessionJson {
    fn from(s: DraftingSession) -> Self {
        Self {
            draft_ready: s.final_draft.is_some(),
            draft_file_name: s.draft_file_name(),
            id: s.id,
            created_at: s.created_at.to_rfc3339(),
            stage: s.stage,
            doc_type: s.doc_type,
            history: s.history,
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(health))
        // Drafting sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/messages", post(post_message))
        .route("/api/sessions/:id/draft", get(download_draft))
        // Clarification
        .route("/api/clarify", post(clarify))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_s": state.start_time.elapsed().as_secs(),
        "sessions": state.sessions.len().await,
    }))
}

pub(crate) async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionJson>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session.into()))
}

pub(crate) async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionJson>, StatusCode> {
    let session = state.sessions.get(&id).await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.into()))
}

pub(crate) async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.sessions.remove(&id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub(crate) async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<MessageBody>,
) -> Result<Json<Turn>, StatusCode> {
    let turn = state
        .sessions
        .handle_message(&id, &body.text)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(turn))
}

pub(crate) async fn download_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let (file_name, draft) = state.sessions.draft(&id).await.ok_or(StatusCode::NOT_FOUND)?;
    info!(session_id = %id, file_name = %file_name, "draft downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        draft,
    ))
}

pub(crate) async fn clarify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClarifyBody>,
) -> Result<Json<Value>, StatusCode> {
    let answer = answer_question(state.backend.as_ref(), &body.question)
        .await
        .ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(json!({ "answer": answer })))
}

// ── Tests ──────────────────────────────────────────────────────────────────
