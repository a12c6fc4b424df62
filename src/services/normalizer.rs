//! Record normalization service
//!
//! Turns raw export rows into package records: resolves each field through
//! the header map, cleans numeric cells, and drops rows that should not be
//! published.

use crate::services::categorizer::categorize;
use crate::services::header::{Field, HeaderMap};
use crate::types::{PackageRecord, Row};

/// Vendor prefixes stripped from display names
const VENDOR_PREFIXES: [&str; 2] = ["AMSFL_", "GENFL_"];

/// Visibility assumed when the flag cell is missing
const DEFAULT_SHOW_ON_MOBILE: &str = "Yes";

/// Why a data row produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Row is narrower than the widest column named in the header
    ShortRow,
    /// Name cell is empty or whitespace
    MissingName,
    /// "Show on Mobile" flag says no
    HiddenOnMobile,
    /// Price is missing, unparsable, or not above zero
    NoPrice,
}

/// Per-reason counts of dropped rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipStats {
    pub short_row: usize,
    pub missing_name: usize,
    pub hidden_on_mobile: usize,
    pub no_price: usize,
}

impl SkipStats {
    fn record(&mut self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::ShortRow => &mut self.short_row,
            SkipReason::MissingName => &mut self.missing_name,
            SkipReason::HiddenOnMobile => &mut self.hidden_on_mobile,
            SkipReason::NoPrice => &mut self.no_price,
        };
        *counter += 1;
    }

    pub fn total(&self) -> usize {
        self.short_row + self.missing_name + self.hidden_on_mobile + self.no_price
    }
}

/// Records produced from one export, plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub packages: Vec<PackageRecord>,
    pub skipped: SkipStats,
}

/// Normalize every data row. Row 0 is the header.
pub fn normalize_rows(rows: &[Row]) -> Normalized {
    let Some((header, data)) = rows.split_first() else {
        return Normalized::default();
    };

    let columns = HeaderMap::from_header(header);
    let mut result = Normalized {
        packages: Vec::with_capacity(data.len()),
        skipped: SkipStats::default(),
    };

    for (offset, row) in data.iter().enumerate() {
        match normalize_row(&columns, row) {
            Ok(package) => result.packages.push(package),
            Err(reason) => {
                tracing::debug!(row = offset + 1, ?reason, "skipping row");
                result.skipped.record(reason);
            }
        }
    }

    result
}

/// Normalize a single data row against the resolved header
pub fn normalize_row(columns: &HeaderMap, row: &[String]) -> Result<PackageRecord, SkipReason> {
    if row.len() < columns.required_width() {
        return Err(SkipReason::ShortRow);
    }

    let name = columns.resolve(Field::Name, row).unwrap_or_default();
    if name.trim().is_empty() {
        return Err(SkipReason::MissingName);
    }

    let show_on_mobile = columns
        .resolve(Field::ShowOnMobile, row)
        .unwrap_or(DEFAULT_SHOW_ON_MOBILE);
    if show_on_mobile.to_lowercase().contains("no") {
        return Err(SkipReason::HiddenOnMobile);
    }

    let price = clean_price(columns.resolve(Field::Price, row).unwrap_or_default());
    if price <= 0.0 {
        return Err(SkipReason::NoPrice);
    }

    let text = |field: Field| columns.resolve(field, row).unwrap_or_default().to_string();

    Ok(PackageRecord {
        id: text(Field::Id),
        name: name.to_string(),
        display_name: display_name(name),
        price,
        labor_hours: clean_hours(columns.resolve(Field::LaborHours, row).unwrap_or_default()),
        description: text(Field::Description),
        category: categorize(name).to_string(),
        tier: None,
        upsell_to: Vec::new(),
    })
}

/// Parse a price cell, ignoring `$` and thousands separators.
///
/// Anything unparsable becomes 0.
///
/// # Examples
/// ```
/// use pricebook::services::normalizer::clean_price;
///
/// assert_eq!(clean_price("$1,200"), 1200.0);
/// assert_eq!(clean_price("TBD"), 0.0);
/// ```
pub fn clean_price(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    parse_number(&cleaned)
}

/// Parse a labor hours cell. Anything unparsable or negative becomes 0.
pub fn clean_hours(raw: &str) -> f64 {
    parse_number(raw).max(0.0)
}

fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Customer-facing name: vendor prefix and "INSTALL " removed.
///
/// # Examples
/// ```
/// use pricebook::services::normalizer::display_name;
///
/// assert_eq!(display_name("AMSFL_INSTALL CEILING FAN"), "CEILING FAN");
/// ```
pub fn display_name(name: &str) -> String {
    let unprefixed = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);
    unprefixed.replace("INSTALL ", "").trim().to_string()
}
