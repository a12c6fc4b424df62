//! Aggregator service for grouping packages into categories

use crate::types::{CategoryGroup, PackageRecord};
use std::collections::BTreeMap;

/// Icon used for categories missing from the icon table
pub const DEFAULT_ICON: &str = "package";

/// Symbolic icon id for a category name
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Panel Upgrades" => "zap",
        "Surge Protection" => "shield",
        "EV Charging" => "battery-charging",
        "Hot Tub Circuits" => "droplet",
        "Heavy Duty Circuits" => "plug",
        "Exterior Outlets" => "sun",
        "Exterior Lighting" => "sun",
        "Recessed Lighting" => "circle",
        "LED Tape Lighting" => "minus",
        "Outlets & Switches" => "toggle-right",
        "Interior Lighting" => "lamp",
        "Ceiling Fans" => "wind",
        "Bathrooms" => "droplet",
        "Home Generators" => "power",
        "Portable Generator" => "battery",
        "HVAC Circuits" => "thermometer",
        "Safety Devices" => "alert-circle",
        "GFCI Protection" => "shield",
        "Breakers" => "square",
        _ => DEFAULT_ICON,
    }
}

/// Aggregator for building category groups
pub struct Aggregator;

impl Aggregator {
    /// Group packages by category (sorted by category name ascending).
    ///
    /// Packages inside a group are ordered by price, keeping input order
    /// for equal prices.
    pub fn by_category(packages: Vec<PackageRecord>) -> Vec<CategoryGroup> {
        let mut grouped: BTreeMap<String, Vec<PackageRecord>> = BTreeMap::new();
        for package in packages {
            grouped
                .entry(package.category.clone())
                .or_default()
                .push(package);
        }

        grouped
            .into_iter()
            .map(|(name, mut packages)| {
                packages.sort_by(|a, b| a.price.total_cmp(&b.price));
                let starting_at = packages.first().map(|p| p.price).unwrap_or_default();
                let icon = category_icon(&name).to_string();
                CategoryGroup {
                    name,
                    starting_at,
                    packages,
                    icon,
                }
            })
            .collect()
    }
}
