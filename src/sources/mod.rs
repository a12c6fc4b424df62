//! Row sources for CRM exports
//!
//! Both supported export formats are reduced to the same shape: an ordered
//! list of rows, each an ordered list of text cells, with row 0 holding the
//! column headers.

mod delimited;
mod spreadsheet;

use crate::types::{Result, Row};
use std::fmt;
use std::fs;
use std::path::Path;

/// Number of leading bytes inspected when sniffing the format
pub const SNIFF_WINDOW: usize = 100;

const XML_MARKERS: [&[u8]; 2] = [b"<?xml", b"<Workbook"];

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    /// Excel 2003 XML (SpreadsheetML), usually saved with an `.xls` extension
    SpreadsheetXml,
    /// Comma-delimited text, UTF-8 with optional BOM
    Delimited,
}

impl RowSource {
    /// Pick a format from the leading bytes of a document.
    ///
    /// Anything without an XML declaration or a `<Workbook` tag in the first
    /// [`SNIFF_WINDOW`] bytes is treated as delimited text.
    pub fn detect(content: &[u8]) -> Self {
        let head = &content[..content.len().min(SNIFF_WINDOW)];
        if XML_MARKERS.iter().any(|marker| contains(head, marker)) {
            Self::SpreadsheetXml
        } else {
            Self::Delimited
        }
    }

    /// Parse an in-memory document into rows
    pub fn parse(&self, content: &[u8]) -> Result<Vec<Row>> {
        match self {
            Self::SpreadsheetXml => spreadsheet::parse_rows(content),
            Self::Delimited => delimited::parse_rows(content),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SpreadsheetXml => "XML SpreadsheetML",
            Self::Delimited => "CSV",
        }
    }
}

impl fmt::Display for RowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows read from a file together with the format they were read as
#[derive(Debug)]
pub struct LoadedRows {
    pub source: RowSource,
    pub rows: Vec<Row>,
}

impl LoadedRows {
    /// Number of data rows, excluding the header
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Read a whole export file and split it into rows
pub fn read_rows(path: &Path) -> Result<LoadedRows> {
    let content = fs::read(path)?;
    let source = RowSource::detect(&content);
    tracing::info!("Detected: {} format", source);

    let rows = source.parse(&content)?;
    Ok(LoadedRows { source, rows })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
