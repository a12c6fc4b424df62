//! Convert CRM service package exports into a categorized JSON price book.

pub mod cli;
pub mod logging;
pub mod services;
pub mod sources;
pub mod types;
