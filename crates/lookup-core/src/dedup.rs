//! Result-row de-duplication for display.

use serde_json::Value;

/// Drop rows structurally equal to an earlier row, keeping first-seen order.
pub fn dedup_rows(rows: Vec<Value>) -> Vec<Value> {
    let mut kept: Vec<Value> = Vec::with_capacity(rows.len());
    for row in rows {
        if !kept.contains(&row) {
            kept.push(row);
        }
    }
    kept
}
