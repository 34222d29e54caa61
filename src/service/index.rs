//! Lookup index builder.
//!
//! Converts a fetched collection into an id-keyed map so every foreign-key
//! reference during assembly is an O(1) lookup instead of a repeated fetch.

use std::collections::HashMap;

use crate::models::Keyed;

/// Pure, O(n). Duplicate ids resolve last-write-wins, which is deterministic
/// as long as the upstream returns the collection in a stable order.
pub fn build_index<T: Keyed>(records: Vec<T>) -> HashMap<String, T> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.insert(record.id().to_string(), record);
    }
    index
}
