// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{
    ab_testing::{AbAssignments, Experiment, default_experiments},
    aggregation_client::AggregationClient,
    catalog::Catalog,
    chatbot::ShoppingAssistant,
    conversation::{Conversation, ThinkingDelay},
    kv_store::KvStore,
    metrics_manager::MetricsManager,
    price_alerts::PriceAlerts,
    session_manager::SessionManager,
};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub conversation: Conversation,
    pub catalog: Catalog,
    pub metrics: MetricsManager,
    pub alerts: PriceAlerts,
    pub assignments: AbAssignments,
    pub experiments: Vec<Experiment>,
    pub aggregation: Option<AggregationClient>,
    pub admin_key: String,
}

impl AppState {
    pub fn new(config: &AppConfig, catalog: Catalog) -> Self {
        let metrics = MetricsManager::new();
        let store = KvStore::new(config.data_dir.clone());
        let conversation = Conversation::new(
            SessionManager::new(config.session_ttl),
            ShoppingAssistant::new(catalog.clone()),
            metrics.clone(),
            ThinkingDelay {
                min: config.thinking_min,
                max: config.thinking_max,
            },
        );

        Self {
            conversation,
            catalog,
            metrics,
            alerts: PriceAlerts::new(store.clone()),
            assignments: AbAssignments::new(store),
            experiments: default_experiments(),
            aggregation: config.aggregation_url.as_deref().map(AggregationClient::new),
            admin_key: config.admin_key.clone(),
        }
    }

    pub fn experiment(&self, name: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.name == name)
    }
}
