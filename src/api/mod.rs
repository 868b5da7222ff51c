pub mod cors;
pub mod generate_report;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::clients::{AiClient, OpenAiClient};
use crate::config::Config;
use crate::{AppError, Result};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no completion credential is configured.
    pub ai_client: Option<Arc<dyn AiClient>>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let ai_client = match &config.openai_api_key {
            Some(key) => {
                let client = OpenAiClient::new(key.clone(), &config.openai_base_url)?;
                Some(Arc::new(client) as Arc<dyn AiClient>)
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set; report requests will fail");
                None
            }
        };

        Ok(Self {
            config: Arc::new(config),
            ai_client,
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/generate-report",
            post(generate_report::handler).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(state.clone(), cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn health_check() -> &'static str {
    "OK"
}
