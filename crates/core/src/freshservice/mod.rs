//! Freshservice tool transformations.
//!
//! One module per resource family. Each module holds the output models
//! returned to tool callers and pure functions that turn a fetch result
//! (`Result<_, ApiError>`) into an [`Envelope`](crate::envelope::Envelope).
//! None of them perform I/O.
pub mod departments;
pub mod requesters;
pub mod service_items;
pub mod solutions;

use serde_json::Value;

/// String value of `key`, or `"Unknown"` when absent or not a string.
pub(crate) fn name_or_unknown(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string()
}
