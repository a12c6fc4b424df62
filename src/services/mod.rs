//! Services for normalizing and categorizing CRM packages

pub mod aggregator;
pub mod categorizer;
pub mod document;
pub mod header;
pub mod normalizer;
pub mod pipeline;

pub use aggregator::Aggregator;
pub use categorizer::categorize;
pub use header::{Field, HeaderMap};
pub use normalizer::{clean_hours, clean_price, display_name, normalize_rows};
pub use pipeline::{convert_file, convert_rows, Conversion};
