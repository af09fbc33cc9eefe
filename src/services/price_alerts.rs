// src/services/price_alerts.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kv_store::KvStore;
use crate::error::AppError;

const ALERTS_KEY: &str = "price_alerts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub id: String,
    pub product_id: String,
    pub target_price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PriceAlerts {
    store: KvStore,
}

impl PriceAlerts {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<PriceAlert> {
        self.store.load(ALERTS_KEY).await
    }

    pub async fn create(&self, product_id: &str, target_price: f64) -> Result<PriceAlert, AppError> {
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(AppError::BadRequest("target price must be positive".to_string()));
        }

        let alert = PriceAlert {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            target_price,
            created_at: Utc::now(),
        };
        let mut alerts = self.list().await;
        alerts.push(alert.clone());
        self.store.save(ALERTS_KEY, &alerts).await?;
        Ok(alert)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut alerts = self.list().await;
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        if alerts.len() == before {
            return Ok(false);
        }
        self.store.save(ALERTS_KEY, &alerts).await?;
        Ok(true)
    }
}
