//! Price book record types

use serde::{Deserialize, Serialize};

/// Fixed document version written into every price book
pub const PRICEBOOK_VERSION: &str = "1.0";

/// A single sellable service line item, normalized from one CRM row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub price: f64,
    pub labor_hours: f64,
    pub description: String,
    pub category: String,
    /// Good/Better/Best tier, assigned later in the admin dashboard
    pub tier: Option<String>,
    /// Related upsell package ids, assigned later in the admin dashboard
    pub upsell_to: Vec<String>,
}

/// Packages sharing a category, cheapest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub name: String,
    pub starting_at: f64,
    pub packages: Vec<PackageRecord>,
    pub icon: String,
}

/// Top-level output document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBook {
    pub version: String,
    /// Stamped by the admin dashboard on publish
    pub last_updated: Option<String>,
    pub categories: Vec<CategoryGroup>,
}

impl PriceBook {
    pub fn new(categories: Vec<CategoryGroup>) -> Self {
        Self {
            version: PRICEBOOK_VERSION.to_string(),
            last_updated: None,
            categories,
        }
    }

    /// Total packages across all categories
    pub fn package_count(&self) -> usize {
        self.categories.iter().map(|c| c.packages.len()).sum()
    }
}
