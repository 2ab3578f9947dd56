use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{
        get,
        post,
    },
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::{
    cors::{
        Any,
        CorsLayer,
    },
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    anki::Dispatcher,
    core::{
        diagnostics,
        http::http_client,
        Config,
        ConnectError,
    },
    renshuu::{
        Connector,
        RenshuuConnector,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { dispatcher: Dispatcher::new(connector) }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConnectError> {
        let client = http_client(config.request_timeout())?;
        let connector = RenshuuConnector::new(client, config.normalized_base_url());
        Ok(Self::new(Arc::new(connector)))
    }
}

pub fn create_router(state: AppState) -> Router {
    // Browser extensions call in from arbitrary origins.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", post(handle_action))
        .route("/log", get(show_log))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The raw body is taken so that malformed JSON still answers 200 with an
/// envelope instead of an extractor rejection.
async fn handle_action(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    Json(state.dispatcher.dispatch(&body).await)
}

async fn show_log() -> String {
    diagnostics::global()
        .snapshot()
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn serve(config: &Config) -> Result<(), ConnectError> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ConnectError::Custom(format!("Failed to bind to {addr}: {e}")))?;

    info!("Listening on http://{}", addr);
    info!("Forwarding to {}", config.normalized_base_url());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ConnectError::Custom(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
