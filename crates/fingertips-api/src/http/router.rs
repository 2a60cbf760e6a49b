//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin) and per-request tracing spans tagged with a
//! request id.

use axum::Router;
use axum::extract::Request;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fingertips_core::history::repository::HistoryRepository;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<H: HistoryRepository + 'static>(state: AppState<H>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %uuid::Uuid::now_v7(),
        )
    });

    Router::new()
        .route("/chat", post(handlers::chat::chat::<H>))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// GET /health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use fingertips_core::chat::handler::ConversationTurnHandler;
    use fingertips_core::history::memory::InMemoryHistoryRepository;
    use fingertips_core::llm::box_provider::BoxLlmProvider;
    use fingertips_types::config::CompletionSettings;
    use fingertips_types::turn::Turn;

    use crate::turn::test_support::{DownProvider, EchoProvider};

    fn state(
        history: InMemoryHistoryRepository,
        provider: Option<BoxLlmProvider>,
    ) -> AppState<InMemoryHistoryRepository> {
        AppState::new(ConversationTurnHandler::new(
            history,
            provider,
            CompletionSettings::default(),
        ))
    }

    fn post_chat(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(state(InMemoryHistoryRepository::new(), None));
        let response = app
            .oneshot(axum::http::Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_returns_reply_and_history() {
        let history = InMemoryHistoryRepository::with_history(
            "alice",
            [Turn::user("hi"), Turn::bot("hello")],
        );
        let state = state(history, Some(BoxLlmProvider::new(EchoProvider)));
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_chat(r#"{"user_id": "alice", "message": "how are you"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["bot_response"], "seen 3 messages");

        let history = body["chat_history"].as_array().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[2]["role"], "user");
        assert_eq!(history[2]["user_message"], "how are you");
        assert_eq!(history[3]["role"], "bot");
        assert_eq!(history[3]["bot_message"], "seen 3 messages");
        assert_eq!(state.handler.history().turn_count("alice"), 4);
    }

    #[tokio::test]
    async fn test_chat_without_credential_is_500() {
        let state = state(InMemoryHistoryRepository::new(), None);
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_chat(r#"{"user_id": "alice", "message": "hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["detail"], "GROQ API key is missing.");
        assert_eq!(state.handler.history().turn_count("alice"), 0);
    }

    #[tokio::test]
    async fn test_chat_provider_failure_is_500_and_stores_nothing() {
        let state = state(
            InMemoryHistoryRepository::new(),
            Some(BoxLlmProvider::new(DownProvider)),
        );
        let app = build_router(state.clone());

        let response = app
            .oneshot(post_chat(r#"{"user_id": "alice", "message": "hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Error generating response: "));
        assert!(detail.contains("service unavailable"));
        assert_eq!(state.handler.history().turn_count("alice"), 0);
    }

    #[tokio::test]
    async fn test_chat_missing_field_is_422() {
        let app = build_router(state(
            InMemoryHistoryRepository::new(),
            Some(BoxLlmProvider::new(EchoProvider)),
        ));

        let response = app.oneshot(post_chat(r#"{"user_id": "alice"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_chat_blank_user_is_400() {
        let app = build_router(state(
            InMemoryHistoryRepository::new(),
            Some(BoxLlmProvider::new(EchoProvider)),
        ));

        let response = app
            .oneshot(post_chat(r#"{"user_id": "", "message": "hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
