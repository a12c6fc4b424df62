//! Comma-delimited text exports

use crate::types::{Result, Row};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Split CSV content into rows. Rows keep their own width; no trimming.
///
/// Blank lines come back as empty rows so row numbering matches the file.
pub(super) fn parse_rows(content: &[u8]) -> Result<Vec<Row>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut after_record = false;
    loop {
        let start = reader.position().byte() as usize;
        let more = reader.read_record(&mut record)?;
        let end = reader.position().byte() as usize;

        let blanks = skipped_blank_lines(content, start, end, after_record);
        rows.extend(std::iter::repeat_with(Row::new).take(blanks));

        if !more {
            break;
        }
        rows.push(record.iter().map(str::to_string).collect());
        after_record = true;
    }

    Ok(rows)
}

/// Blank lines the reader passed over in `content[start..end]` before the
/// next record (or end of input).
///
/// The reader consumes a record's terminator lazily (`\r` now, `\n` on the
/// next read), so the break run is measured from the end of the previous
/// record's text and its own terminator is discounted.
fn skipped_blank_lines(content: &[u8], start: usize, end: usize, after_record: bool) -> usize {
    let is_break = |b: &&u8| matches!(**b, b'\r' | b'\n');

    let run_start = if after_record {
        start - content[..start].iter().rev().take_while(is_break).count()
    } else {
        start
    };
    let run_end = start + content[start..end].iter().take_while(is_break).count();

    let breaks = line_breaks(&content[run_start..run_end]);
    if after_record {
        breaks.saturating_sub(1)
    } else {
        breaks
    }
}

/// Line breaks in a run of `\r`/`\n` bytes; `\r\n` counts once
fn line_breaks(run: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < run.len() {
        i += if run[i] == b'\r' && run.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBookError;

    #[test]
    fn test_parse_simple() {
        let rows = parse_rows(b"a,b,c\n1,2,3\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_strips_bom() {
        let rows = parse_rows(b"\xEF\xBB\xBFInternal ID,Name\n1,X\n").unwrap();
        assert_eq!(rows[0][0], "Internal ID");
    }

    #[test]
    fn test_quoted_fields() {
        let content = b"Name,Sales Price,Description\n\"OUTLET, GFCI\",\"$1,200\",\"Says \"\"hi\"\"\nacross lines\"\n";
        let rows = parse_rows(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "OUTLET, GFCI");
        assert_eq!(rows[1][1], "$1,200");
        assert_eq!(rows[1][2], "Says \"hi\"\nacross lines");
    }

    #[test]
    fn test_ragged_rows_kept() {
        let rows = parse_rows(b"a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_whitespace_preserved() {
        let rows = parse_rows(b" a , b \n").unwrap();
        assert_eq!(rows[0], vec![" a ", " b "]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse_rows(b"a,b\r\n1,2\r\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_blank_lines_become_empty_rows() {
        let rows = parse_rows(b"a,b\n\n1,2\n\n\n").unwrap();
        let widths: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(widths, vec![2, 0, 2, 0, 0]);
        assert_eq!(rows[2], vec!["1", "2"]);
    }

    #[test]
    fn test_leading_blank_line_is_header_row() {
        let rows = parse_rows(b"\nName,Sales Price\nBREAKER,90\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["Name", "Sales Price"]);
    }

    #[test]
    fn test_blank_lines_with_crlf() {
        let rows = parse_rows(b"\r\na,b\r\n\r\n1,2\r\n").unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["a", "b"]);
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], vec!["1", "2"]);
    }

    #[test]
    fn test_blank_line_after_bom() {
        let rows = parse_rows(b"\xEF\xBB\xBF\nName\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["Name"]);
    }

    #[test]
    fn test_newlines_inside_quotes_are_not_blank_lines() {
        let rows = parse_rows(b"a\n\"x\n\ny\"\nb").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["x\n\ny"]);
        assert_eq!(rows[2], vec!["b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_rows(b"").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let result = parse_rows(b"Name\n\xFF\xFE\n");
        assert!(matches!(result, Err(PriceBookError::Csv(_))));
    }
}
