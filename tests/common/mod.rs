//! Shared fixtures for integration tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Build an injected environment from key/value pairs.
pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Write `<root>/configs/app.yaml`.
pub fn write_config(root: &Path, yaml: &str) {
    let dir = root.join("configs");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("app.yaml"), yaml).unwrap();
}
