//! End-to-end conversion from an export file to a price book
//!
//! Row source → header → normalizer (categorizer per record) → aggregator →
//! document. Nothing here touches the output path; the caller decides where
//! the finished document goes.

use std::path::Path;

use crate::services::document;
use crate::services::normalizer::{normalize_rows, SkipStats};
use crate::services::Aggregator;
use crate::sources::{self, RowSource};
use crate::types::{PriceBook, Result, Row};

/// Result of converting one export
#[derive(Debug)]
pub struct Conversion {
    /// Format the input was read as
    pub source: RowSource,
    /// Data rows seen, excluding the header
    pub data_rows: usize,
    /// Rows dropped during normalization
    pub skipped: SkipStats,
    pub book: PriceBook,
}

impl Conversion {
    pub fn package_count(&self) -> usize {
        self.book.package_count()
    }
}

/// Read and convert an export file
pub fn convert_file(path: &Path) -> Result<Conversion> {
    let loaded = sources::read_rows(path)?;
    let data_rows = loaded.data_row_count();
    tracing::info!("Found {} rows (excluding header)", data_rows);

    let (book, skipped) = convert_rows(&loaded.rows);
    Ok(Conversion {
        source: loaded.source,
        data_rows,
        skipped,
        book,
    })
}

/// Convert already-extracted rows. Row 0 is the header.
pub fn convert_rows(rows: &[Row]) -> (PriceBook, SkipStats) {
    let normalized = normalize_rows(rows);
    tracing::info!(
        skipped = normalized.skipped.total(),
        "Processed {} valid packages",
        normalized.packages.len()
    );

    let categories = Aggregator::by_category(normalized.packages);
    tracing::info!("Organized into {} categories", categories.len());

    (document::build(categories), normalized.skipped)
}
