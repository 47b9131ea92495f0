use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::CONFIG;
use crate::llm::ModelInvoker;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Linear conversation history, replayed verbatim as context on every model
/// call. Replayed context is capped by a character budget: once the
/// transcript outgrows it, the oldest non-system turns are evicted. The
/// system turn and the newest turn always survive.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    budget: usize,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatHistory {
    pub fn new() -> ChatHistory {
        Self::with_budget(CONFIG.chat_history_budget)
    }

    pub fn with_budget(budget: usize) -> ChatHistory {
        ChatHistory {
            messages: vec![ChatMessage {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            }],
            budget,
        }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
        self.evict_to_budget();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Flatten every turn, in order, into the `role: content` transcript the
    /// model sees.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn transcript_len(&self) -> usize {
        self.transcript().chars().count()
    }

    fn evict_to_budget(&mut self) {
        // index 0 is the system turn; never evict it or the newest turn
        while self.transcript_len() > self.budget && self.messages.len() > 2 {
            let evicted = self.messages.remove(1);
            info!(role = %evicted.role, "evicted oldest chat turn over history budget");
        }
    }
}

/// Produces conversational replies on top of the shared model invoker.
/// Named sessions keep their history across requests; anonymous requests get
/// a fresh one-shot history.
pub struct ChatResponder {
    invoker: Arc<dyn ModelInvoker>,
    sessions: DashMap<String, ChatHistory>,
}

impl ChatResponder {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> ChatResponder {
        ChatResponder {
            invoker,
            sessions: DashMap::new(),
        }
    }

    /// Appends the user turn, replays the history through the model, appends
    /// the assistant turn, and returns the reply. Model failures come back
    /// as inline placeholder text and are recorded in the history the same
    /// way a real reply would be.
    pub async fn respond(&self, history: &mut ChatHistory, prompt: &str) -> String {
        history.push(Role::User, prompt);
        let transcript = history.transcript();

        let reply = match self
            .invoker
            .invoke(
                &transcript,
                Duration::from_secs(CONFIG.chat_timeout_secs),
                CONFIG.model_max_attempts,
            )
            .await
        {
            Ok(text) => text,
            Err(e) => e.user_message(),
        };

        history.push(Role::Assistant, reply.as_str());
        reply
    }

    /// Session-addressed variant. Concurrent requests against the same
    /// session resolve last-writer-wins; nothing blocks across the model
    /// call.
    pub async fn respond_in_session(&self, session_id: Option<&str>, prompt: &str) -> String {
        match session_id {
            Some(id) => {
                let mut history = self
                    .sessions
                    .get(id)
                    .map(|entry| entry.value().clone())
                    .unwrap_or_default();
                let reply = self.respond(&mut history, prompt).await;
                self.sessions.insert(id.to_string(), history);
                reply
            }
            None => {
                let mut history = ChatHistory::new();
                self.respond(&mut history, prompt).await
            }
        }
    }
}
