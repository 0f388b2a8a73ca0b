//! Row-by-row decoding of JSON array feeds.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Decodes each row on its own so one bad record only costs itself.
///
/// Rows that fail to deserialize are logged and skipped; order is kept.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, feed: &str) -> Vec<T> {
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping {} row {}: {}", feed, index, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!("{}: decoded {} of {} rows", feed, decoded.len(), total);
    }
    decoded
}
