#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use composition_service::config::{CompositionConfig, OpenAiConfig};
use composition_service::services::providers::TextProvider;
use composition_service::services::CredentialSource;
use composition_service::startup::{AppState, Application};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "sk-test-123";

/// Config bound to a random localhost port.
pub fn test_config(base_url: &str) -> CompositionConfig {
    CompositionConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        openai: OpenAiConfig {
            base_url: base_url.to_string(),
            ..OpenAiConfig::default()
        },
    }
}

pub fn state_with(provider: Arc<dyn TextProvider>, key: Option<&str>) -> AppState {
    AppState {
        config: Arc::new(test_config("http://127.0.0.1:9")),
        credentials: CredentialSource::fixed(key),
        text_provider: provider,
    }
}

/// Spawn the application and return its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let app = Application::build_with_state(state)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    format!("http://127.0.0.1:{}", port)
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A request seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
}

async fn chat_completions(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.calls.lock().unwrap().push(UpstreamCall {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (stub.status, Json(stub.reply.clone()))
}

/// Local stand-in for the chat completions API.
pub struct StubUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
}

impl StubUpstream {
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(StubState {
                status,
                reply,
                calls: calls.clone(),
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/v1", port),
            calls,
        }
    }

    pub async fn replying_with_text(text: &str) -> Self {
        Self::start(
            StatusCode::OK,
            serde_json::json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": text },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 31, "completion_tokens": 12, "total_tokens": 43 }
            }),
        )
        .await
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }
}
