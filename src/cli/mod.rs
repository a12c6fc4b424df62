use std::path::{Path, PathBuf};

use clap::Parser;

use crate::services::{convert_file, document, Conversion};
use crate::types::{PriceBookError, Result};

/// Export names probed when no input path is given, in order
pub const DEFAULT_INPUTS: [&str; 4] = [
    "../AMSItemGroupCatalogwPriceResults547.xls",
    "../crm_export.csv",
    "AMSItemGroupCatalogwPriceResults547.xls",
    "crm_export.csv",
];

/// Where the price book is written unless overridden
pub const DEFAULT_OUTPUT: &str = "data/pricebook.json";

const SUPPORTED_FORMATS: &str = "Supports: .xls (XML SpreadsheetML) or .csv files";

const USAGE: &str = "Usage: pricebook <path-to-crm-export>\n\
Supports: .xls (XML SpreadsheetML) or .csv files";

/// Convert a CRM package export into a categorized JSON price book
#[derive(Parser, Debug)]
#[command(name = "pricebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CRM export (.xls SpreadsheetML or .csv); probes default names if omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Destination for the generated price book
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

/// Resolved run settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Cli {
    /// Resolve the input path against the default candidates
    pub fn config(&self) -> Result<Config> {
        let candidates: Vec<PathBuf> = DEFAULT_INPUTS.iter().map(PathBuf::from).collect();
        Ok(Config {
            input: resolve_input(self.input.as_deref(), &candidates)?,
            output: self.output.clone(),
        })
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.config()?;

        println!("Reading: {}", config.input.display());
        let conversion = convert_file(&config.input).inspect_err(|err| {
            if let Some(hint) = failure_hint(err) {
                eprintln!("{}", hint);
            }
        })?;
        document::write(&conversion.book, &config.output)?;

        print_summary(&conversion, &config.output);
        Ok(())
    }
}

/// Pick the input file: the explicit path if it exists, else the first
/// existing candidate.
pub fn resolve_input(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => candidates
            .iter()
            .find(|p| p.exists())
            .cloned()
            .ok_or_else(|| PriceBookError::Usage(USAGE.into()))?,
    };

    if !path.exists() {
        return Err(PriceBookError::Usage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    Ok(path)
}

/// Extra guidance printed when the export itself could not be read
fn failure_hint(err: &PriceBookError) -> Option<&'static str> {
    err.is_format().then_some(SUPPORTED_FORMATS)
}

fn print_summary(conversion: &Conversion, output: &Path) {
    println!(
        "Converted {} of {} rows from {} into {} categories",
        conversion.package_count(),
        conversion.data_rows,
        conversion.source,
        conversion.book.categories.len()
    );

    println!("\nGenerated: {}", output.display());
    println!("\nCategory Summary:");
    for category in &conversion.book.categories {
        println!(
            "  {}: {} packages (starting at ${})",
            category.name,
            category.packages.len(),
            format_dollars(category.starting_at)
        );
    }

    println!("\nNext steps:");
    println!("1. Open admin.html to review and assign Good/Better/Best tiers");
    println!("2. Configure upsell relationships");
    println!("3. Push to GitHub to deploy");
}

/// Whole-dollar amount with thousands separators (e.g. 12,500)
fn format_dollars(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, digit) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0.0 && grouped != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
