// src/fetch/records.rs

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::table::DataTable;

/// GET `url` and convert the JSON body's `data` array into a table. The
/// caller supplies a fully formed query URL and assumes the schema; nothing
/// is validated beyond the presence of `data`. No retries, so a transient
/// network error propagates immediately.
pub async fn fetch_records(http: &Client, url: &str) -> Result<DataTable, Error> {
    let body: Value = http
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?
        .json()
        .await
        .map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

    let table = table_from_body(url, &body)?;
    debug!(url, rows = table.len(), "fetched records");
    Ok(table)
}

/// The response must be an object carrying a `data` array; anything else is
/// a shape failure attributed to `url`.
pub fn table_from_body(url: &str, body: &Value) -> Result<DataTable, Error> {
    let rows = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MissingData {
            url: url.to_string(),
        })?;
    Ok(DataTable::from_json_rows(rows))
}
