use serde::{Deserialize, Serialize};

use crate::rating::Rating;

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub query: String,
    #[serde(default = "default_num")]
    pub num: usize,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_time_filter")]
    pub time_filter: String,
}

fn default_num() -> usize {
    5
}

fn default_location() -> String {
    "us-en".to_string()
}

fn default_time_filter() -> String {
    "d".to_string()
}

#[derive(Debug, Deserialize)]
pub struct RatePrompt {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatPrompt {
    pub prompt: String,
    /// Names a persistent conversation; absent means a fresh one-shot
    /// session for just this request.
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub prompt: String,
    pub rating: Rating,
    pub stars: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}
