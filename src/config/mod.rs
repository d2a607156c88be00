//! JSON configuration for the demo binaries.

pub mod extract;
pub mod rig;

use std::fs;
use std::path::Path;

use serde::Serialize;

/// Serializes `value` as pretty JSON into `path`.
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<(), String> {
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize {}: {e}", path.display()))?;
    fs::write(path, data).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
