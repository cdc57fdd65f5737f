// src/table.rs

use std::path::Path;

use serde_json::Value;

use crate::error::Error;

/// Tabular records as the statistics API returns them: one header per JSON
/// key, one row of stringified cells per object. Column order follows the
/// first object's key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table from the `data` array of an API response. The schema is
    /// whatever the first object claims; later objects are projected onto it
    /// (missing keys become empty cells, extra keys are dropped).
    pub fn from_json_rows(rows: &[Value]) -> Self {
        let headers: Vec<String> = rows
            .first()
            .and_then(Value::as_object)
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();

        let rows = rows
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| {
                headers
                    .iter()
                    .map(|h| obj.get(h).map(render_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        DataTable { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (`row`, `column`), if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Keep only rows whose `column` equals `value` exactly. Case-sensitive,
    /// no normalization; an empty result is a valid table, not an error.
    pub fn filter_eq(&self, column: &str, value: &str) -> DataTable {
        let rows = match self.column_index(column) {
            Some(idx) => self
                .rows
                .iter()
                .filter(|r| r.get(idx).map(String::as_str) == Some(value))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        DataTable {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Append a column holding the same `value` in every row. On an empty
    /// table this still records the header, so a later `append` of stamped
    /// rows stays aligned.
    pub fn stamp_column(&mut self, name: &str, value: &str) {
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    /// Append `other`'s rows to this accumulator. An empty accumulator
    /// adopts `other`'s schema wholesale; otherwise incoming cells are
    /// matched up by header name and missing columns become empty cells.
    pub fn append(&mut self, other: DataTable) {
        if self.headers.is_empty() {
            *self = other;
            return;
        }
        let mapping: Vec<Option<usize>> = self
            .headers
            .iter()
            .map(|h| other.headers.iter().position(|o| o == h))
            .collect();
        for row in other.rows {
            self.rows.push(
                mapping
                    .iter()
                    .map(|m| m.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                    .collect(),
            );
        }
    }

    /// Serialize headers + rows to `path`, overwriting any existing file.
    /// A table that never accumulated rows is refused outright; no empty or
    /// partial file is emitted.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if self.rows.is_empty() {
            return Err(Error::EmptyResult {
                path: path.display().to_string(),
            });
        }
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DataTable {
        let body = json!([
            {"University": "Example University", "Enrollment": 120, "IPEDS Race": "Total"},
            {"University": "All Universities", "Enrollment": 9000, "IPEDS Race": "Total"},
            {"University": "Example University", "Enrollment": null, "IPEDS Race": "Asian"},
        ]);
        DataTable::from_json_rows(body.as_array().unwrap())
    }

    #[test]
    fn from_json_keeps_key_order_and_stringifies() {
        let table = sample();
        assert_eq!(table.headers, vec!["University", "Enrollment", "IPEDS Race"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "Enrollment"), Some("120"));
        // null renders as an empty cell
        assert_eq!(table.get(2, "Enrollment"), Some(""));
    }

    #[test]
    fn from_json_on_empty_array_is_empty() {
        let table = DataTable::from_json_rows(&[]);
        assert!(table.is_empty());
        assert!(table.headers.is_empty());
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let table = sample();
        let filtered = table.filter_eq("University", "Example University");
        assert_eq!(filtered.len(), 2);
        for row in 0..filtered.len() {
            assert_eq!(filtered.get(row, "University"), Some("Example University"));
        }
        // no normalization: case must match exactly
        assert!(table.filter_eq("University", "example university").is_empty());
        // unknown column filters everything, not an error
        assert!(table.filter_eq("No Such Column", "x").is_empty());
    }

    #[test]
    fn stamp_adds_constant_column() {
        let mut table = sample();
        table.stamp_column("Location", "IL");
        assert_eq!(table.headers.last().map(String::as_str), Some("Location"));
        for row in 0..table.len() {
            assert_eq!(table.get(row, "Location"), Some("IL"));
        }
    }

    #[test]
    fn stamp_on_empty_table_records_header() {
        let mut empty = DataTable::default();
        empty.stamp_column("Location", "IL");
        assert_eq!(empty.headers, vec!["Location"]);
        assert!(empty.is_empty());
    }

    #[test]
    fn append_adopts_then_aligns() {
        let mut combined = DataTable::default();
        combined.append(sample());
        assert_eq!(combined.len(), 3);

        // second batch arrives with columns in a different order
        let body = json!([
            {"IPEDS Race": "Total", "University": "Other College", "Enrollment": 55},
        ]);
        combined.append(DataTable::from_json_rows(body.as_array().unwrap()));
        assert_eq!(combined.len(), 4);
        assert_eq!(combined.get(3, "University"), Some("Other College"));
        assert_eq!(combined.get(3, "Enrollment"), Some("55"));
    }

    #[test]
    fn write_csv_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = sample();
        table.stamp_column("Location", "IL");
        table.write_csv(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("University,Enrollment,IPEDS Race,Location")
        );
        assert_eq!(lines.clone().count(), 3);
        assert!(lines.all(|l| l.ends_with(",IL")));
    }

    #[test]
    fn write_csv_refuses_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let err = DataTable::default().write_csv(&path).unwrap_err();
        assert!(matches!(err, Error::EmptyResult { .. }));
        assert!(!path.exists());
    }
}
