// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{RwLock, oneshot};
use uuid::Uuid;

use super::catalog::DealRecommendation;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attached_items: Vec<DealRecommendation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into(), Vec::new(), Vec::new())
    }

    pub fn assistant(
        content: impl Into<String>,
        attached_items: Vec<DealRecommendation>,
        suggestions: Vec<String>,
    ) -> Self {
        Self::new(MessageRole::Assistant, content.into(), attached_items, suggestions)
    }

    fn new(
        role: MessageRole,
        content: String,
        attached_items: Vec<DealRecommendation>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now(),
            attached_items,
            suggestions,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// The exchange currently waiting for an answer.
#[derive(Debug)]
struct InFlight {
    generation: u64,
    pending: ChatMessage,
    cancel: oneshot::Sender<()>,
}

#[derive(Debug)]
pub struct Session {
    pub id: String,
    messages: Vec<ChatMessage>,
    pub last_active: Instant,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            last_active: Instant::now(),
            generation: 0,
            in_flight: None,
        }
    }
}

/// Handle for an exchange started with [`SessionManager::begin_exchange`].
#[derive(Debug)]
pub struct PendingExchange {
    pub generation: u64,
    pub user_message: ChatMessage,
    /// Resolves when a newer exchange replaces this one or the session goes away.
    pub cancelled: oneshot::Receiver<()>,
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        tracing::info!(session_id = %id, "session created");
        id
    }

    /// Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| Session::new(id.to_string()));
        id.to_string()
    }

    /// Register `user_message` as the session's pending exchange, cancelling any
    /// exchange that is still waiting for its answer.
    pub async fn begin_exchange(&self, session_id: &str, user_message: ChatMessage) -> PendingExchange {
        let (cancel, cancelled) = oneshot::channel();

        let mut guard = self.inner.write().await;
        let session = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id.to_string()));

        if let Some(previous) = session.in_flight.take() {
            tracing::debug!(session_id, generation = previous.generation, "superseding in-flight exchange");
            let _ = previous.cancel.send(());
        }

        session.generation += 1;
        session.last_active = Instant::now();
        session.in_flight = Some(InFlight {
            generation: session.generation,
            pending: user_message.clone(),
            cancel,
        });

        PendingExchange {
            generation: session.generation,
            user_message,
            cancelled,
        }
    }

    /// Append the user message and its answer together. Returns the new history
    /// length, or `None` when the exchange was superseded or the session removed.
    pub async fn commit_exchange(
        &self,
        session_id: &str,
        generation: u64,
        user_message: ChatMessage,
        reply: ChatMessage,
    ) -> Option<usize> {
        let mut guard = self.inner.write().await;
        let session = guard.get_mut(session_id)?;

        match &session.in_flight {
            Some(in_flight) if in_flight.generation == generation => {}
            _ => return None,
        }

        session.in_flight = None;
        session.messages.push(user_message);
        session.messages.push(reply);
        session.last_active = Instant::now();
        Some(session.messages.len())
    }

    /// Drop the pending exchange if it is still the current one. Returns whether
    /// anything was cleared.
    pub async fn abandon_exchange(&self, session_id: &str, generation: u64) -> bool {
        let mut guard = self.inner.write().await;
        let Some(session) = guard.get_mut(session_id) else {
            return false;
        };

        let current = session
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation);
        if !current {
            return false;
        }

        session.in_flight = None;
        tracing::debug!(session_id, generation, "abandoned in-flight exchange");
        true
    }

    /// Whether an answer is still being prepared for this session.
    pub async fn is_busy(&self, session_id: &str) -> bool {
        let guard = self.inner.read().await;
        guard
            .get(session_id)
            .is_some_and(|s| s.in_flight.is_some())
    }

    /// The user message waiting for an answer, if any.
    pub async fn pending_message(&self, session_id: &str) -> Option<ChatMessage> {
        let guard = self.inner.read().await;
        guard
            .get(session_id)
            .and_then(|s| s.in_flight.as_ref())
            .map(|f| f.pending.clone())
    }

    /// Get a copy of the committed session history.
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.messages.clone())
    }

    /// Remove a session by id. Any in-flight exchange is cancelled with it.
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        let removed = before - guard.len();
        if removed > 0 {
            tracing::info!(removed, "purged idle sessions");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list_session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}
