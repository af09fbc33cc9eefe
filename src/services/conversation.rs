// src/services/conversation.rs
use std::time::Duration;

use rand::Rng;

use super::{
    chatbot::{AssistantReply, ShoppingAssistant},
    metrics_manager::MetricsManager,
    session_manager::{ChatMessage, SessionManager},
};
use crate::error::AppError;

/// How long the assistant pretends to think before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    pub min: Duration,
    pub max: Duration,
}

impl ThinkingDelay {
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn fixed(delay: Duration) -> Self {
        Self { min: delay, max: delay }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let span = (self.max - self.min).as_millis() as u64;
        self.min + Duration::from_millis(rng.random_range(0..=span))
    }
}

/// One committed user/assistant pair.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
    pub reply: AssistantReply,
    pub history_len: usize,
}

/// Drives a chat turn: pending user message, thinking delay, reply, commit.
#[derive(Debug, Clone)]
pub struct Conversation {
    sessions: SessionManager,
    assistant: ShoppingAssistant,
    metrics: MetricsManager,
    delay: ThinkingDelay,
}

impl Conversation {
    pub fn new(
        sessions: SessionManager,
        assistant: ShoppingAssistant,
        metrics: MetricsManager,
        delay: ThinkingDelay,
    ) -> Self {
        Self { sessions, assistant, metrics, delay }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Answer `text` in `session_id`. A later call for the same session cancels
    /// this one, which then returns [`AppError::Superseded`] without committing.
    pub async fn send(&self, session_id: &str, text: &str) -> Result<Exchange, AppError> {
        let pending = self
            .sessions
            .begin_exchange(session_id, ChatMessage::user(text))
            .await;
        let mut abandon = AbandonOnDrop {
            sessions: self.sessions.clone(),
            session_id: session_id.to_string(),
            generation: pending.generation,
            armed: true,
        };

        let wait = self.delay.sample(&mut rand::rng());
        tokio::select! {
            _ = pending.cancelled => {
                abandon.armed = false;
                tracing::debug!(session_id, generation = pending.generation, "exchange cancelled");
                return Err(AppError::Superseded);
            }
            _ = tokio::time::sleep(wait) => {}
        }

        let reply = self.assistant.reply(text);
        let assistant = ChatMessage::assistant(
            reply.text.clone(),
            reply.deals.clone(),
            reply.suggestions.clone(),
        );

        let committed = self
            .sessions
            .commit_exchange(session_id, pending.generation, pending.user_message.clone(), assistant.clone())
            .await;
        abandon.armed = false;
        let history_len = committed.ok_or(AppError::Superseded)?;

        self.metrics.record_reply(&reply).await;

        Ok(Exchange {
            user: pending.user_message,
            assistant,
            reply,
            history_len,
        })
    }
}

/// Clears the session's pending exchange when `send` is dropped before it
/// commits, e.g. because the HTTP client went away.
struct AbandonOnDrop {
    sessions: SessionManager,
    session_id: String,
    generation: u64,
    armed: bool,
}

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let sessions = self.sessions.clone();
        let session_id = std::mem::take(&mut self.session_id);
        let generation = self.generation;
        handle.spawn(async move {
            sessions.abandon_exchange(&session_id, generation).await;
        });
    }
}
