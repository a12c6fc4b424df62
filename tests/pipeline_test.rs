//! End-to-end conversion of the fixture exports

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use pricebook::cli::Cli;
use pricebook::services::convert_file;
use pricebook::sources::RowSource;
use pricebook::types::PriceBook;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn category_names(book: &PriceBook) -> Vec<&str> {
    book.categories.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_csv_export() {
    let conversion = convert_file(&fixture("crm_export.csv")).unwrap();

    assert_eq!(conversion.source, RowSource::Delimited);
    assert_eq!(conversion.data_rows, 14);
    assert_eq!(conversion.package_count(), 10);
    assert_eq!(conversion.skipped.hidden_on_mobile, 1);
    assert_eq!(conversion.skipped.no_price, 1);
    assert_eq!(conversion.skipped.missing_name, 1);
    assert_eq!(conversion.skipped.short_row, 1);

    assert_eq!(
        category_names(&conversion.book),
        vec![
            "Ceiling Fans",
            "EV Charging",
            "Exterior Outlets",
            "Home Generators",
            "Other Services",
            "Outlets & Switches",
            "Panel Upgrades",
            "Surge Protection",
        ]
    );
}

#[test]
fn test_spreadsheet_export() {
    let conversion = convert_file(&fixture("AMSItemGroupCatalog.xls")).unwrap();

    assert_eq!(conversion.source, RowSource::SpreadsheetXml);
    assert_eq!(conversion.data_rows, 14);
    assert_eq!(conversion.package_count(), 10);
}

#[test]
fn test_both_formats_agree() {
    let csv = convert_file(&fixture("crm_export.csv")).unwrap();
    let xml = convert_file(&fixture("AMSItemGroupCatalog.xls")).unwrap();
    assert_eq!(csv.book, xml.book);
}

#[test]
fn test_panel_record() {
    let conversion = convert_file(&fixture("crm_export.csv")).unwrap();
    let panel = conversion
        .book
        .categories
        .iter()
        .find(|c| c.name == "Panel Upgrades")
        .unwrap();

    assert_eq!(panel.icon, "zap");
    assert_eq!(panel.starting_at, 1500.0);
    let record = &panel.packages[0];
    assert_eq!(record.id, "101");
    assert_eq!(record.display_name, "PANEL UPGRADE 200A");
    assert_eq!(record.labor_hours, 6.0);
    assert_eq!(record.description, "Upgrade to 200A");
}

#[test]
fn test_group_ordering_and_starting_price() {
    let conversion = convert_file(&fixture("crm_export.csv")).unwrap();

    for group in &conversion.book.categories {
        let prices: Vec<f64> = group.packages.iter().map(|p| p.price).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]), "{}", group.name);
        assert_eq!(group.starting_at, prices[0]);
        assert!(group.packages.iter().all(|p| p.category == group.name));
    }

    let outlets = conversion
        .book
        .categories
        .iter()
        .find(|c| c.name == "Outlets & Switches")
        .unwrap();
    assert_eq!(outlets.starting_at, 125.0);

    // Equal prices keep export order
    let surge = conversion
        .book
        .categories
        .iter()
        .find(|c| c.name == "Surge Protection")
        .unwrap();
    let ids: Vec<&str> = surge.packages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["102", "111"]);
}

#[test]
fn test_cli_writes_identical_output_on_rerun() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("data").join("pricebook.json");
    let input = fixture("AMSItemGroupCatalog.xls");

    let args = [
        "pricebook",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ];

    Cli::try_parse_from(args).unwrap().run().unwrap();
    let first = fs::read(&output).unwrap();
    Cli::try_parse_from(args).unwrap().run().unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);

    let book: PriceBook = serde_json::from_slice(&first).unwrap();
    assert_eq!(book.version, "1.0");
    assert!(book.last_updated.is_none());
    assert_eq!(book.package_count(), 10);
}

#[test]
fn test_cli_missing_input_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("pricebook.json");
    let input = tmp.path().join("missing.csv");

    let cli = Cli::try_parse_from([
        "pricebook",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    assert!(cli.run().is_err());
    assert!(!output.exists());
}

#[test]
fn test_cli_bad_spreadsheet_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("broken.xls");
    let output = tmp.path().join("pricebook.json");
    fs::write(&input, r#"<?xml version="1.0"?><Workbook><Worksheet/></Workbook>"#).unwrap();

    let cli = Cli::try_parse_from([
        "pricebook",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let err = cli.run().unwrap_err();
    assert!(err.to_string().contains("Table"));
    assert!(!output.exists());
}
