// src/services/intent.rs
use std::fmt;

use serde::Serialize;

use super::catalog::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Search,
    Analyze,
    Compare,
    Timing,
    Alert,
    Budget,
    General,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Search => "search",
            Intent::Analyze => "analyze",
            Intent::Compare => "compare",
            Intent::Timing => "timing",
            Intent::Alert => "alert",
            Intent::Budget => "budget",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category keywords, most specific category first so "gaming laptop" lands in Gaming
/// and "headphone" is not read as "phone".
pub const CATEGORY_KEYWORDS: &[(&[&str], Category)] = &[
    (&["gaming", "ps5", "playstation", "xbox", "nintendo"], Category::Gaming),
    (&["laptop", "computer", "macbook"], Category::Laptops),
    (&["headphone", "airpods", "audio", "earbuds", "speaker"], Category::Audio),
    (&["phone", "iphone", "galaxy", "pixel"], Category::Phones),
];

const COMPARE_KEYWORDS: &[&str] = &["compare", " vs ", " vs.", "versus"];
const TIMING_KEYWORDS: &[&str] = &["when should", "best time", "wait for", "black friday", "prime day"];
const ALERT_KEYWORDS: &[&str] = &["alert", "notify", "track price", "track this", "track the price", "price drop"];
const ANALYZE_KEYWORDS: &[&str] = &["analyze", "analyse", "worth it", "good deal", "is this"];
const BUDGET_KEYWORDS: &[&str] = &["under ", "below ", "budget", "cheap"];

/// Rules are checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], Intent)] = &[
    (COMPARE_KEYWORDS, Intent::Compare),
    (TIMING_KEYWORDS, Intent::Timing),
    (ALERT_KEYWORDS, Intent::Alert),
    (ANALYZE_KEYWORDS, Intent::Analyze),
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// First category whose keywords appear in already lower-cased text.
pub fn match_category(lower: &str) -> Option<Category> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keywords, _)| contains_any(lower, keywords))
        .map(|(_, category)| *category)
}

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    if let Some((_, intent)) = RULES.iter().find(|(keywords, _)| contains_any(&msg_lower, keywords)) {
        *intent
    } else if match_category(&msg_lower).is_some() {
        Intent::Search
    } else if contains_any(&msg_lower, BUDGET_KEYWORDS) {
        Intent::Budget
    } else {
        Intent::General
    }
}
