//! Price book document assembly and output

use crate::types::{CategoryGroup, PriceBook, Result};
use std::fs;
use std::path::Path;

/// Wrap category groups into the versioned output document
pub fn build(categories: Vec<CategoryGroup>) -> PriceBook {
    PriceBook::new(categories)
}

/// Serialize with two-space indentation
pub fn to_json(book: &PriceBook) -> Result<String> {
    Ok(serde_json::to_string_pretty(book)?)
}

/// Write the document, creating the parent directory if needed.
///
/// The JSON text is fully rendered before the destination is opened, so a
/// serialization failure never leaves a truncated file behind.
pub fn write(book: &PriceBook, path: &Path) -> Result<()> {
    let json = to_json(book)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
