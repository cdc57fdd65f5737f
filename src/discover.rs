// src/discover.rs

use std::collections::BTreeSet;

use reqwest::Client;
use tracing::warn;

use crate::error::Error;
use crate::fetch::{self, urls};
use crate::table::DataTable;
use crate::UniversityId;

/// Column holding the numeric university key in API responses.
pub const ID_COLUMN: &str = "ID University";

/// Fetch the completions aggregate and collect the distinct university ids
/// present. The feed repeats each university once per sector, so the result
/// is materialized as a set; the ordered set also fixes iteration order for
/// the rest of the run.
pub async fn discover_university_ids(http: &Client) -> Result<BTreeSet<UniversityId>, Error> {
    let table = fetch::fetch_records(http, &urls::completions_query()).await?;
    Ok(university_ids(&table))
}

/// Distinct ids in `table`. Rows without a parseable id field are skipped.
pub fn university_ids(table: &DataTable) -> BTreeSet<UniversityId> {
    let mut ids = BTreeSet::new();
    for row in 0..table.len() {
        let raw = table.get(row, ID_COLUMN).unwrap_or("");
        match raw.parse::<UniversityId>() {
            Ok(id) => {
                ids.insert(id);
            }
            Err(_) => warn!(row, raw, "skipping row without a numeric university id"),
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeated_ids_collapse_to_one() {
        let body = json!([
            {"ID University": "221768", "University": "Example University", "Sector": "Public"},
            {"ID University": "221768", "University": "Example University", "Sector": "Private"},
            {"ID University": "211440", "University": "Other College", "Sector": "Public"},
            {"ID University": "221768", "University": "Example University", "Sector": "For-profit"},
        ]);
        let table = DataTable::from_json_rows(body.as_array().unwrap());
        let ids = university_ids(&table);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&221768) && ids.contains(&211440));
    }

    #[test]
    fn numeric_json_ids_parse_too() {
        let body = json!([
            {"ID University": 228778, "Sector": "Public"},
            {"ID University": null, "Sector": "Public"},
            {"Sector": "Public"},
        ]);
        let table = DataTable::from_json_rows(body.as_array().unwrap());
        let ids = university_ids(&table);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![228778]);
    }
}
