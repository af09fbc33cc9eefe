// src/services/entities.rs
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::{
    catalog::Category,
    intent::{Intent, match_category},
};

pub const DEFAULT_MAX_PRICE: u32 = 1000;

static UNDER_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"under \$?(\d+)").expect("static regex")
});

/// Structured values pulled out of a single user message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
}

impl Entities {
    /// String view keyed by the names the chat widgets used (`category`, `maxPrice`).
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "category" => self.category.map(|c| c.label().to_string()),
            "maxPrice" => self.max_price.map(|p| p.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionWarning {
    #[error("no price ceiling found, defaulting to ${}", DEFAULT_MAX_PRICE)]
    BudgetDefaulted { fallback: Entities },
}

impl ExtractionWarning {
    pub fn into_fallback(self) -> Entities {
        match self {
            ExtractionWarning::BudgetDefaulted { fallback } => fallback,
        }
    }
}

/// Price ceiling from "under $N" / "under N"; `None` when absent or out of range.
pub fn extract_max_price(lower: &str) -> Option<u32> {
    UNDER_PRICE
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_entities(text: &str, intent: Intent) -> Result<Entities, ExtractionWarning> {
    let lower = text.to_lowercase();

    match intent {
        Intent::Search => Ok(Entities {
            category: match_category(&lower),
            max_price: extract_max_price(&lower),
        }),
        Intent::Budget => match extract_max_price(&lower) {
            Some(max_price) => Ok(Entities { max_price: Some(max_price), ..Default::default() }),
            None => Err(ExtractionWarning::BudgetDefaulted {
                fallback: Entities { max_price: Some(DEFAULT_MAX_PRICE), ..Default::default() },
            }),
        },
        Intent::Analyze | Intent::Compare | Intent::Timing | Intent::Alert | Intent::General => {
            Ok(Entities::default())
        }
    }
}
