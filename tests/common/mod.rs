use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use noanalyst::Config;

/// What the mock language-model endpoint answers with.
#[derive(Clone)]
pub enum ChatReply {
    Markdown(String),
    Raw(StatusCode, String),
}

#[derive(Clone)]
pub enum SearchReply {
    Results(Value),
    Raw(StatusCode, String),
}

#[derive(Clone)]
struct MockState {
    search: SearchReply,
    chat: ChatReply,
    search_requests: Arc<Mutex<Vec<Value>>>,
    chat_requests: Arc<Mutex<Vec<Value>>>,
}

pub struct MockProviders {
    pub config: Config,
    pub search_requests: Arc<Mutex<Vec<Value>>>,
    pub chat_requests: Arc<Mutex<Vec<Value>>>,
    pub logs: TempDir,
}

impl MockProviders {
    pub async fn start(search: SearchReply, chat: ChatReply) -> Self {
        let state = MockState {
            search,
            chat,
            search_requests: Arc::new(Mutex::new(Vec::new())),
            chat_requests: Arc::new(Mutex::new(Vec::new())),
        };
        let search_requests = state.search_requests.clone();
        let chat_requests = state.chat_requests.clone();

        let app = Router::new()
            .route("/search", post(search_handler))
            .route("/chat/completions", post(chat_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        let logs = TempDir::new().expect("create temp dir");
        let mut config = Config::with_keys("tvly-test", "sk-test");
        config.search_url = format!("http://{}/search", addr);
        config.llm_base_url = format!("http://{}/chat/completions", addr);
        config.request_timeout_secs = 10;
        config.logs_dir = logs.path().join("logs").to_string_lossy().into_owned();

        Self {
            config,
            search_requests,
            chat_requests,
            logs,
        }
    }

    pub fn log_lines(&self) -> Vec<String> {
        let path = self.logs.path().join("logs").join("reports.jsonl");
        std::fs::read_to_string(path)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

async fn search_handler(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.search_requests.lock().unwrap().push(body);
    match state.search {
        SearchReply::Results(results) => Json(serde_json::json!({ "results": results })).into_response(),
        SearchReply::Raw(status, body) => (status, body).into_response(),
    }
}

async fn chat_handler(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.chat_requests.lock().unwrap().push(body);
    match state.chat {
        ChatReply::Markdown(text) => Json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }],
            "usage": { "prompt_tokens": 321, "completion_tokens": 123 }
        }))
        .into_response(),
        ChatReply::Raw(status, body) => (status, body).into_response(),
    }
}
