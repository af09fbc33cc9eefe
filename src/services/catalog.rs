// src/services/catalog.rs
use std::{fmt, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Laptops,
    Phones,
    Gaming,
    Audio,
    Home,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Laptops => "Laptops",
            Category::Phones => "Phones",
            Category::Gaming => "Gaming",
            Category::Audio => "Audio",
            Category::Home => "Home",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    GreatDeal,
    GoodDeal,
    FairPrice,
}

impl Verdict {
    pub fn from_discount(discount_percent: u8) -> Self {
        if discount_percent >= 20 {
            Verdict::GreatDeal
        } else if discount_percent >= 10 {
            Verdict::GoodDeal
        } else {
            Verdict::FairPrice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::GreatDeal => "Great Deal",
            Verdict::GoodDeal => "Good Deal",
            Verdict::FairPrice => "Fair Price",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    pub current_price: f64,
    pub original_price: f64,
    pub discount_percent: u8,
    #[serde(default)]
    pub is_hot: bool,
    pub store: String,
    /// Oldest first.
    #[serde(default)]
    pub price_history: Vec<f64>,
}

impl CatalogProduct {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_discount(self.discount_percent)
    }

    pub fn savings(&self) -> f64 {
        (self.original_price - self.current_price).max(0.0)
    }
}

/// What the chat shows inline for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecommendation {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub current_price: f64,
    pub discount_percent: u8,
    pub reason: String,
}

impl DealRecommendation {
    pub fn from_product(product: &CatalogProduct, reason: impl Into<String>) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            image_url: product.image_url.clone(),
            current_price: product.current_price.max(0.0),
            discount_percent: product.discount_percent.min(100),
            reason: reason.into(),
        }
    }
}

/// Read-only product list shared by everything that needs deals.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[CatalogProduct]>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products: products.into() }
    }

    /// Load a JSON array of products.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<CatalogProduct> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), count = products.len(), "catalog loaded");
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Other products from the same category, biggest discount first.
    pub fn similar_to(&self, id: &str, limit: usize) -> Option<Vec<&CatalogProduct>> {
        let target = self.get(id)?;
        let mut similar: Vec<&CatalogProduct> = self
            .products
            .iter()
            .filter(|p| p.category == target.category && p.id != target.id)
            .collect();
        similar.sort_by(|a, b| b.discount_percent.cmp(&a.discount_percent));
        similar.truncate(limit);
        Some(similar)
    }

    pub fn demo() -> Self {
        let item = |id: &str,
                    title: &str,
                    category: Category,
                    current: f64,
                    original: f64,
                    is_hot: bool,
                    store: &str,
                    history: &[f64]| CatalogProduct {
            id: id.to_string(),
            title: title.to_string(),
            category,
            image_url: Some(format!("/images/deals/{id}.jpg")),
            current_price: current,
            original_price: original,
            discount_percent: (((original - current) / original) * 100.0).round() as u8,
            is_hot,
            store: store.to_string(),
            price_history: history.to_vec(),
        };

        Self::new(vec![
            item("deal-001", "MacBook Air M3 13\"", Category::Laptops, 899.0, 1099.0, true, "Amazon", &[1099.0, 1049.0, 999.0, 949.0, 899.0]),
            item("deal-002", "Dell XPS 15", Category::Laptops, 1299.0, 1499.0, false, "Best Buy", &[1499.0, 1449.0, 1399.0, 1299.0]),
            item("deal-003", "ASUS ROG Strix G16 Gaming Laptop", Category::Gaming, 1249.0, 1599.0, true, "Newegg", &[1599.0, 1499.0, 1399.0, 1249.0]),
            item("deal-004", "PlayStation 5 Slim", Category::Gaming, 449.0, 499.0, false, "Walmart", &[499.0, 499.0, 479.0, 449.0]),
            item("deal-005", "Xbox Series X", Category::Gaming, 429.0, 499.0, false, "Target", &[499.0, 469.0, 449.0, 429.0]),
            item("deal-006", "iPhone 15 Pro 128GB", Category::Phones, 899.0, 999.0, false, "Apple", &[999.0, 999.0, 949.0, 899.0]),
            item("deal-007", "Samsung Galaxy S24", Category::Phones, 649.0, 799.0, true, "Samsung", &[799.0, 749.0, 699.0, 649.0]),
            item("deal-008", "Sony WH-1000XM5 Headphones", Category::Audio, 279.0, 399.0, true, "Amazon", &[399.0, 349.0, 329.0, 279.0]),
            item("deal-009", "AirPods Pro (2nd gen)", Category::Audio, 189.0, 249.0, false, "Best Buy", &[249.0, 229.0, 199.0, 189.0]),
            item("deal-010", "Dyson V15 Detect", Category::Home, 549.0, 749.0, false, "Dyson", &[749.0, 699.0, 649.0, 549.0]),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::from_discount(35), Verdict::GreatDeal);
        assert_eq!(Verdict::from_discount(20), Verdict::GreatDeal);
        assert_eq!(Verdict::from_discount(19), Verdict::GoodDeal);
        assert_eq!(Verdict::from_discount(3), Verdict::FairPrice);
    }

    #[test]
    fn similar_deals_stay_in_category() {
        let catalog = Catalog::demo();
        let similar = catalog.similar_to("deal-004", 5).unwrap();
        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|p| p.category == Category::Gaming && p.id != "deal-004"));
        assert!(similar[0].discount_percent >= similar[1].discount_percent);
        assert!(catalog.similar_to("missing", 3).is_none());
    }
}
