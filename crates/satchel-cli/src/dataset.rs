//! Loading JSON datasets

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

/// Read a JSON file as a list of records. A top-level array yields its
/// elements, `null` yields nothing and any other document is a single record.
pub async fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: Value =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;

    let records = match document {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    debug!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}
