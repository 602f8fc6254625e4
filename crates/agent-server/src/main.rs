//! Chat Assistant HTTP Server
//!
//! Axum-based server exposing the multi-agent chat assistant as a REST API
//! with one chatbot per session.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{delete, get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_runtime::{build_provider, ProviderKind};
use chat_assistant::{AssistantConfig, DisabledSearch, SearchClient, TavilyClient};

use crate::handlers::{
    create_session, delete_session, health_check, list_agents, list_models,
    reset_session, send_message,
};
use crate::state::AppState;

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/agents", get(list_agents))

        // Conversations
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", delete(delete_session))
        .route("/api/sessions/{id}/messages", post(send_message))
        .route("/api/sessions/{id}/reset", post(reset_session))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn search_from_env() -> Arc<dyn SearchClient> {
    match TavilyClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Tavily web search configured");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!("⚠ Web search disabled: {}", e);
            tracing::warn!("  Set TAVILY_API_KEY in .env");
            Arc::new(DisabledSearch)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize LLM provider
    let provider = build_provider(ProviderKind::from_env())?;

    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to {}", provider.name());
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::debug!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} not reachable - requests will fail", provider.name());
        }
    }

    let config = AssistantConfig::from_env(provider.default_model());
    tracing::info!(model = %config.model, memory_token_limit = config.memory_token_limit, "Assistant configured");

    let state = AppState::new(provider, search_from_env(), config);
    let app = build_router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 chat assistant running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health                     - Health check");
    tracing::info!("  GET    /api/models                 - List available models");
    tracing::info!("  GET    /api/agents                 - List agents");
    tracing::info!("  POST   /api/sessions               - Start a conversation");
    tracing::info!("  POST   /api/sessions/{{id}}/messages - Send message");
    tracing::info!("  POST   /api/sessions/{{id}}/reset    - Reset conversation");
    tracing::info!("  DELETE /api/sessions/{{id}}          - End conversation");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::MockProvider;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chat_assistant::MockSearchClient;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = AppState::new(
            Arc::new(MockProvider::new()),
            Arc::new(MockSearchClient::new()),
            AssistantConfig::default(),
        );
        (build_router(state.clone()), state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_and_agents() {
        let (app, _) = app();

        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "Mock");
        assert_eq!(body["provider_connected"], true);
        assert_eq!(body["sessions"], 0);

        let (_, agents) = call(&app, "GET", "/api/agents", None).await;
        assert_eq!(agents.as_array().unwrap().len(), 4);
        assert_eq!(agents[3]["id"], "creative");
        assert_eq!(agents[0]["name"], "Main Assistant");

        let (status, models) = call(&app, "GET", "/api/models", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(models[0]["id"], "mock");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let (app, state) = app();

        let (status, created) = call(&app, "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["agents"].as_array().unwrap().len(), 4);
        assert_eq!(state.sessions.len().await, 1);

        let (status, envelope) = call(
            &app,
            "POST",
            &format!("/api/sessions/{id}/messages"),
            Some(json!({"message": "Hello there"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["message"], "Mock response to: Hello there");
        assert_eq!(envelope["agent_used"], "main");
        assert_eq!(envelope["used_internet_search"], false);

        let (status, ack) = call(&app, "POST", &format!("/api/sessions/{id}/reset"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["message"], "Chatbot reset successfully");

        let (status, _) = call(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, error) = call(
            &app,
            "POST",
            &format!("/api/sessions/{id}/messages"),
            Some(json!({"message": "Still there?"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let (app, state) = app();

        let (_, first) = call(&app, "POST", "/api/sessions", None).await;
        let (_, second) = call(&app, "POST", "/api/sessions", None).await;
        let first = first["session_id"].as_str().unwrap().to_string();
        let second = second["session_id"].as_str().unwrap().to_string();

        call(
            &app,
            "POST",
            &format!("/api/sessions/{first}/messages"),
            Some(json!({"message": "Remember the number 42"})),
        )
        .await;

        let session = state
            .sessions
            .get(&agent_core::SessionId::from_string(second))
            .await
            .unwrap();
        assert!(session.lock().await.chatbot().memory().is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (app, _) = app();
        let (_, created) = call(&app, "POST", "/api/sessions", None).await;
        let id = created["session_id"].as_str().unwrap();

        let (status, error) = call(
            &app,
            "POST",
            &format!("/api/sessions/{id}/messages"),
            Some(json!({"message": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "EMPTY_MESSAGE");
    }
}
