//! Type definitions for pricebook

mod error;
mod package;

pub use error::*;
pub use package::*;

/// A raw row of text cells, in source column order
pub type Row = Vec<String>;
