//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agent_core::{ModelInfo, SessionId};
use chat_assistant::{AgentKind, ResetAck, ResponseEnvelope, WELCOME_MESSAGE};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub provider_connected: bool,
    pub sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: AgentKind,
    pub name: String,
    pub description: String,
}

impl From<AgentKind> for AgentInfo {
    fn from(kind: AgentKind) -> Self {
        Self {
            id: kind,
            name: kind.display_name().into(),
            description: kind.description().into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub welcome: &'static str,
    pub agents: Vec<AgentInfo>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn session_not_found(id: &SessionId) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "SESSION_NOT_FOUND",
        format!("Session {id} not found"),
    )
}

fn all_agents() -> Vec<AgentInfo> {
    AgentKind::ALL.into_iter().map(AgentInfo::from).collect()
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
        provider_connected,
        sessions: state.sessions.len().await,
    })
}

/// Models offered by the configured provider
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelInfo>>, ApiError> {
    state.provider.list_models().await.map(Json).map_err(|e| {
        tracing::error!("Model listing failed: {}", e);
        api_error(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.user_message())
    })
}

pub async fn list_agents() -> Json<Vec<AgentInfo>> {
    Json(all_agents())
}

/// Start a new conversation
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session = state.sessions.create(state.new_chatbot()).await;
    tracing::info!(session = %session.id, "Session created");

    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id.clone(),
            created_at: session.created_at,
            welcome: WELCOME_MESSAGE,
            agents: all_agents(),
        }),
    )
}

/// Send one message to a conversation
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MessageRequest>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let id = SessionId::from_string(id);
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| session_not_found(&id))?;

    if payload.message.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "EMPTY_MESSAGE",
            "Message must not be empty",
        ));
    }

    let mut chatbot = session.lock().await;
    let envelope = chatbot.handle(&payload.message).await;
    tracing::debug!(session = %id, agent = %envelope.agent_used, "Message handled");

    Ok(Json(envelope))
}

/// Clear a conversation's memory and state
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResetAck>, ApiError> {
    let id = SessionId::from_string(id);
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| session_not_found(&id))?;

    let ack = session.lock().await.reset();
    Ok(Json(ack))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::from_string(id);

    if state.sessions.remove(&id).await {
        tracing::info!(session = %id, "Session closed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(&id))
    }
}
