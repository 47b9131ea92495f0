use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::chat::ChatResponder;
use crate::llm::ModelInvoker;
use crate::search::NewsSearcher;

pub mod handlers;
pub mod models;

/// Shared handler state: the pipeline, the chat responder, and the invoker
/// the rate-query endpoint calls directly.
pub struct AppState {
    pub searcher: NewsSearcher,
    pub chat: ChatResponder,
    pub invoker: Arc<dyn ModelInvoker>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search-news", post(handlers::search_news))
        .route("/rate-query", get(handlers::rate_query))
        .route("/chat-response", get(handlers::chat_response))
        .route("/ping", get(handlers::ping))
        .with_state(state)
        .layer(cors)
}
