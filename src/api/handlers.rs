use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::CONFIG;
use crate::models::SearchOutcome;
use crate::rating::{Rating, parse_rating};

use super::AppState;
use super::models::{ChatPrompt, ChatResponse, NewsQuery, PingResponse, RatePrompt, RateResponse};

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "API is live 🚀".to_string(),
    })
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewsQuery>,
) -> Result<Json<SearchOutcome>, (StatusCode, String)> {
    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }
    if request.num == 0 {
        return Err((StatusCode::BAD_REQUEST, "num must be positive".to_string()));
    }

    let outcome = state
        .searcher
        .search(
            &request.query,
            request.num,
            &request.location,
            &request.time_filter,
        )
        .await;

    Ok(Json(outcome))
}

pub async fn rate_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RatePrompt>,
) -> Json<RateResponse> {
    let judge_prompt = format!(
        "Please rate the quality of this user query for data science use.\n\
         Give a number 1-5 based on clarity, specificity, and usefulness:\n\n\
         Query: {}\n\nOnly return a number.",
        params.prompt
    );

    let rating = match state
        .invoker
        .invoke(
            &judge_prompt,
            Duration::from_secs(CONFIG.query_rating_timeout_secs),
            CONFIG.model_max_attempts,
        )
        .await
    {
        Ok(raw) => parse_rating(&raw),
        Err(e) => {
            warn!(%e, "query rating failed");
            Rating::Unrated
        }
    };

    Json(RateResponse {
        prompt: params.prompt,
        stars: rating.to_stars(),
        rating,
    })
}

pub async fn chat_response(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChatPrompt>,
) -> Json<ChatResponse> {
    let response = state
        .chat
        .respond_in_session(params.session.as_deref(), &params.prompt)
        .await;
    Json(ChatResponse { response })
}
