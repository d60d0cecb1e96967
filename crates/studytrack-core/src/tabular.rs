//! The logical tabular schema shared by export and import.
//!
//! The engine deals only in this shape; the concrete file encoding (CSV in
//! the report crate) is a separate concern. Compatibility with previously
//! exported files depends on the column names here, nothing else.

use serde::{Deserialize, Serialize};

use crate::classify::Group;
use crate::model::ResultRecord;

pub const COL_PROBLEM_NUMBER: &str = "problem_number";
pub const COL_GROUP: &str = "group";
pub const COL_METHOD_TEXT: &str = "method_text";
pub const COL_COMMENT: &str = "comment";
pub const COL_SUBJECT: &str = "subject";

/// Export column order.
pub const EXPORT_COLUMNS: [&str; 5] = [
    COL_PROBLEM_NUMBER,
    COL_GROUP,
    COL_METHOD_TEXT,
    COL_COMMENT,
    COL_SUBJECT,
];

/// Columns an import table must carry to be usable at all.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_PROBLEM_NUMBER, COL_GROUP, COL_METHOD_TEXT];

/// A format-agnostic table of result rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularData {
    /// Table title; the subject name, or a combined-table label.
    pub title: String,
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Data rows; each row is positionally aligned with `columns`.
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    /// An empty table with the standard export columns.
    pub fn for_export(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether the table carries every column import requires.
    pub fn has_required_columns(&self) -> bool {
        REQUIRED_COLUMNS
            .iter()
            .all(|c| self.column_index(c).is_some())
    }

    /// Append a record as a row in export column order.
    pub fn push_record(&mut self, record: &ResultRecord) {
        self.rows.push(record_to_row(record));
    }
}

/// Render a record as a row in [`EXPORT_COLUMNS`] order.
pub fn record_to_row(record: &ResultRecord) -> Vec<String> {
    vec![
        record.problem_number.to_string(),
        record.group.id().to_string(),
        record.method_text.clone(),
        record.comment.clone(),
        record.subject.clone(),
    ]
}

/// Parse one row of `table` into a record.
///
/// Returns `None` for rows that cannot be parsed (missing cells,
/// non-numeric problem number, group id outside 1..=11, no resolvable
/// subject), after logging the reason. Callers skip such rows rather than
/// aborting the import.
pub fn row_to_record(
    table: &TabularData,
    row: &[String],
    fallback_subject: Option<&str>,
) -> Option<ResultRecord> {
    let cell = |name: &str| -> Option<&str> {
        table
            .column_index(name)
            .and_then(|i| row.get(i))
            .map(String::as_str)
    };

    let raw_number = cell(COL_PROBLEM_NUMBER)?;
    let problem_number = match raw_number.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!("skipping row in {}: bad problem number {:?}", table.title, raw_number);
            return None;
        }
    };

    let raw_group = cell(COL_GROUP)?;
    let group = match raw_group.trim().parse::<u8>().ok().and_then(Group::new) {
        Some(g) => g,
        None => {
            tracing::warn!("skipping row in {}: bad group id {:?}", table.title, raw_group);
            return None;
        }
    };

    let method_text = cell(COL_METHOD_TEXT)?.to_string();
    let comment = cell(COL_COMMENT).unwrap_or_default().to_string();

    let subject = match cell(COL_SUBJECT).filter(|s| !s.trim().is_empty()) {
        Some(s) => s.to_string(),
        None => match fallback_subject {
            Some(s) => s.to_string(),
            None => {
                tracing::warn!(
                    "skipping row in {}: no subject column and no current subject",
                    table.title
                );
                return None;
            }
        },
    };

    Some(ResultRecord {
        problem_number,
        group,
        method_text,
        comment,
        subject,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(problem_number: u32, group: u8, subject: &str) -> ResultRecord {
        let group = Group::new(group).unwrap();
        ResultRecord {
            problem_number,
            group,
            method_text: group.method_text().to_string(),
            comment: "note".into(),
            subject: subject.into(),
        }
    }

    #[test]
    fn export_table_roundtrips_records() {
        let mut table = TabularData::for_export("math");
        table.push_record(&record(12, 3, "math"));

        assert!(table.has_required_columns());
        let back = row_to_record(&table, &table.rows[0], None).unwrap();
        assert_eq!(back, record(12, 3, "math"));
    }

    #[test]
    fn missing_required_column_detected() {
        let table = TabularData {
            title: "broken".into(),
            columns: vec![COL_PROBLEM_NUMBER.into(), COL_METHOD_TEXT.into()],
            rows: vec![],
        };
        assert!(!table.has_required_columns());
    }

    #[test]
    fn bad_rows_are_rejected() {
        let table = TabularData::for_export("math");

        let bad_number = vec![
            "x".into(),
            "3".into(),
            "text".into(),
            String::new(),
            "math".into(),
        ];
        assert!(row_to_record(&table, &bad_number, None).is_none());

        let zero_number = vec![
            "0".into(),
            "3".into(),
            "text".into(),
            String::new(),
            "math".into(),
        ];
        assert!(row_to_record(&table, &zero_number, None).is_none());

        let bad_group = vec![
            "1".into(),
            "12".into(),
            "text".into(),
            String::new(),
            "math".into(),
        ];
        assert!(row_to_record(&table, &bad_group, None).is_none());

        let short_row = vec!["1".into(), "3".into()];
        assert!(row_to_record(&table, &short_row, None).is_none());
    }

    #[test]
    fn subject_falls_back_to_current() {
        let table = TabularData {
            title: "import".into(),
            columns: vec![
                COL_PROBLEM_NUMBER.into(),
                COL_GROUP.into(),
                COL_METHOD_TEXT.into(),
            ],
            rows: vec![],
        };
        let row = vec!["4".into(), "6".into(), "text".into()];

        let rec = row_to_record(&table, &row, Some("chemistry")).unwrap();
        assert_eq!(rec.subject, "chemistry");
        assert_eq!(rec.comment, "");

        assert!(row_to_record(&table, &row, None).is_none());
    }
}
