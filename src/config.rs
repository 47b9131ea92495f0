use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        bind_addr: get_env_or_default("NEWSHOUND_BIND", "0.0.0.0:8000"),
        model_command: get_env_or_default("NEWSHOUND_MODEL_COMMAND", "ollama"),
        model_name: get_env_or_default("NEWSHOUND_MODEL", "llama3.2:latest"),
        chat_timeout_secs: get_env_parsed("NEWSHOUND_CHAT_TIMEOUT_SECS", 60),
        article_rating_timeout_secs: get_env_parsed("NEWSHOUND_ARTICLE_TIMEOUT_SECS", 12),
        query_rating_timeout_secs: get_env_parsed("NEWSHOUND_QUERY_TIMEOUT_SECS", 10),
        model_max_attempts: get_env_parsed("NEWSHOUND_MODEL_ATTEMPTS", 3),
        search_base_url: get_env_or_default("NEWSHOUND_SEARCH_BASE_URL", "https://duckduckgo.com/html/"),
        fetch_timeout_secs: get_env_parsed_opt("NEWSHOUND_FETCH_TIMEOUT_SECS"),
        rating_concurrency: get_env_parsed("NEWSHOUND_RATING_CONCURRENCY", 1),
        chat_history_budget: get_env_parsed("NEWSHOUND_CHAT_HISTORY_BUDGET", 16_000),
    }
});

pub struct Config {
    pub bind_addr: String,
    /// Executable that runs the local model, fed the prompt on stdin.
    pub model_command: String,
    pub model_name: String,
    pub chat_timeout_secs: u64,
    pub article_rating_timeout_secs: u64,
    pub query_rating_timeout_secs: u64,
    pub model_max_attempts: u32,
    pub search_base_url: String,
    /// No enforced bound when unset; the fetch inherits whatever the HTTP
    /// stack does.
    pub fetch_timeout_secs: Option<u64>,
    /// 1 keeps per-result rating strictly sequential.
    pub rating_concurrency: usize,
    /// Character budget for replayed chat context.
    pub chat_history_budget: usize,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_env_parsed_opt<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
