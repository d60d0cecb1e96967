//! CSV encoding of result tables.
//!
//! Method texts carry embedded newlines, so both the writer and the parser
//! are quote-aware: fields containing commas, quotes, or line breaks are
//! quoted on output, and quoted line breaks do not terminate a record on
//! input.

use std::path::Path;

use anyhow::{Context, Result};

use studytrack_core::tabular::TabularData;

/// Quote a field for CSV output when it needs it.
fn escape_field(field: &str) -> String {
    if field.contains(&['"', ',', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_record(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| escape_field(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a table as CSV text, header row first.
pub fn render_csv(table: &TabularData) -> String {
    let mut out = String::new();
    out.push_str(&render_record(&table.columns));
    out.push('\n');
    for row in &table.rows {
        out.push_str(&render_record(row));
        out.push('\n');
    }
    out
}

/// Write a table as a CSV file, creating parent directories as needed.
pub fn write_csv_report(table: &TabularData, path: &Path) -> Result<()> {
    let csv = render_csv(table);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)?;
    Ok(())
}

/// Parse CSV text into a table. The first record becomes the column list.
pub fn parse_csv(input: &str, title: &str) -> Result<TabularData> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                // CR only appears as part of a CRLF line ending here.
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        anyhow::bail!("malformed CSV: unterminated quoted field");
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    let mut records = records.into_iter();
    let Some(columns) = records.next() else {
        anyhow::bail!("empty CSV: no header row");
    };

    Ok(TabularData {
        title: title.to_string(),
        columns,
        rows: records.collect(),
    })
}

/// Read a CSV file into a table.
pub fn read_csv_report(path: &Path, title: &str) -> Result<TabularData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_csv(&content, title)
}
