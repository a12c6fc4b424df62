use thiserror::Error;

/// pricebook error types
#[derive(Error, Debug)]
pub enum PriceBookError {
    /// No usable input path
    #[error("usage error: {0}")]
    Usage(String),

    /// Input document has an unusable structure
    #[error("format error: {0}")]
    Format(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text decoding failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet markup is not well-formed XML
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Output serialization failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PriceBookError {
    /// Whether the failure came from the input document itself
    /// rather than the environment.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Csv(_) | Self::Xml(_))
    }
}

/// Result type alias for pricebook
pub type Result<T> = std::result::Result<T, PriceBookError>;
