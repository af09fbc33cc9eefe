pub mod ab_testing;
pub mod aggregation_client;
pub mod catalog;
pub mod chatbot;
pub mod conversation;
pub mod entities;
pub mod intent;
pub mod kv_store;
pub mod metrics_manager;
pub mod price_alerts;
pub mod price_history;
pub mod session_manager;
