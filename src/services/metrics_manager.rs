use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::chatbot::AssistantReply;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub intent_usage: HashMap<String, u64>,
    pub category_usage: HashMap<String, u64>,
    pub replies_with_deals: u64,
    pub replies_without_deals: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_reply(&self, reply: &AssistantReply) {
        let mut data = self.inner.write().await;
        *data.intent_usage.entry(reply.intent.to_string()).or_insert(0) += 1;
        if let Some(category) = reply.entities.category {
            *data.category_usage.entry(category.to_string()).or_insert(0) += 1;
        }
        if reply.deals.is_empty() {
            data.replies_without_deals += 1;
        } else {
            data.replies_with_deals += 1;
        }
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
