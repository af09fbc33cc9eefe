// src/services/ab_testing.rs
use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kv_store::KvStore;
use crate::error::AppError;

const ASSIGNMENTS_KEY: &str = "ab_assignments";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl Experiment {
    /// Every variant gets the same share.
    pub fn uniform(name: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            name: name.into(),
            variants: variants
                .iter()
                .map(|v| Variant { name: v.to_string(), weight: 1 })
                .collect(),
        }
    }

    fn has_variant(&self, name: &str) -> bool {
        self.variants.iter().any(|v| v.name == name && v.weight > 0)
    }
}

/// Experiments the service knows about out of the box.
pub fn default_experiments() -> Vec<Experiment> {
    vec![
        Experiment::uniform("deal_card_layout", &["control", "compact", "expanded"]),
        Experiment {
            name: "assistant_greeting".to_string(),
            variants: vec![
                Variant { name: "control".to_string(), weight: 3 },
                Variant { name: "proactive".to_string(), weight: 1 },
            ],
        },
    ]
}

/// Index chosen with probability proportional to its weight.
pub fn pick_weighted(weights: &[u32], rng: &mut impl Rng) -> Option<usize> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_range(0..total);
    for (idx, &weight) in weights.iter().enumerate() {
        let weight = u64::from(weight);
        if roll < weight {
            return Some(idx);
        }
        roll -= weight;
    }
    None
}

/// client id -> experiment -> variant
type AssignmentTable = HashMap<String, HashMap<String, String>>;

/// Sticky variant assignments persisted in the key/value store.
#[derive(Debug, Clone)]
pub struct AbAssignments {
    store: KvStore,
}

impl AbAssignments {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Stored variant if it is still part of the experiment, otherwise a fresh
    /// weighted pick that is saved for next time.
    pub async fn assign(
        &self,
        client_id: &str,
        experiment: &Experiment,
        rng: &mut (impl Rng + Send),
    ) -> Result<String, AppError> {
        let mut table: AssignmentTable = self.store.load(ASSIGNMENTS_KEY).await;

        if let Some(existing) = table
            .get(client_id)
            .and_then(|by_experiment| by_experiment.get(&experiment.name))
            .filter(|name| experiment.has_variant(name))
        {
            return Ok(existing.clone());
        }

        let weights: Vec<u32> = experiment.variants.iter().map(|v| v.weight).collect();
        let idx = pick_weighted(&weights, rng).ok_or_else(|| {
            AppError::BadRequest(format!("experiment {} has no active variants", experiment.name))
        })?;
        let variant = experiment.variants[idx].name.clone();

        table
            .entry(client_id.to_string())
            .or_default()
            .insert(experiment.name.clone(), variant.clone());
        self.store.save(ASSIGNMENTS_KEY, &table).await?;

        tracing::debug!(client_id, experiment = %experiment.name, %variant, "assigned variant");
        Ok(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn zero_weights_pick_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_weighted(&[], &mut rng), None);
        assert_eq!(pick_weighted(&[0, 0], &mut rng), None);
    }

    #[test]
    fn zero_weight_variant_is_never_picked() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1_000 {
            assert_ne!(pick_weighted(&[1, 0, 1], &mut rng), Some(1));
        }
    }
}
