//! Loading the client configuration and input records from disk.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use catena_protocol::ClientConfig;

/// Reads a JSON [`ClientConfig`]. Missing fields take their defaults; no
/// path at all yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Reads any JSON document.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// A single record, or every element of a top-level array.
pub fn records(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        single => vec![single],
    }
}
