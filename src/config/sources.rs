//! Raw configuration sources.
//!
//! Each source is read independently and reports a [`SourceOutcome`]. Only a
//! `Loaded` outcome contributes to the merge; `Absent` and `Malformed` are
//! logged by the resolver and otherwise ignored.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

/// Extensions tried, in order, for the structured configuration file.
pub const CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Result of reading one optional source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    /// The source was read and parsed.
    Loaded(T),
    /// The source does not exist.
    Absent,
    /// The source exists but could not be read or parsed.
    Malformed(String),
}

impl<T> SourceOutcome<T> {
    /// Data contributed to the merge; nothing unless loaded.
    pub fn into_loaded(self) -> Option<T> {
        match self {
            SourceOutcome::Loaded(data) => Some(data),
            SourceOutcome::Absent | SourceOutcome::Malformed(_) => None,
        }
    }
}

/// Read a dotenv-style `KEY=VALUE` file without touching the process environment.
///
/// Later duplicates of a key win.
pub fn load_env_file(path: &Path) -> SourceOutcome<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            return SourceOutcome::Absent;
        }
        Err(e) => return SourceOutcome::Malformed(e.to_string()),
    };

    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => return SourceOutcome::Malformed(e.to_string()),
        }
    }

    SourceOutcome::Loaded(vars)
}

/// Locate `<dir>/<name>.yaml` (or `.yml`).
pub fn find_config_file(dir: &Path, name: &str) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// Read and parse the structured configuration file.
///
/// Keys are normalized to lower case and `null` entries dropped, so lookups
/// during the merge are case-insensitive and unset values stay unset.
pub fn load_yaml_file(path: &Path) -> SourceOutcome<Mapping> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return SourceOutcome::Absent,
        Err(e) => return SourceOutcome::Malformed(format!("IO error: {}", e)),
    };

    parse_yaml(&content)
}

/// Parse YAML text into a normalized mapping.
pub fn parse_yaml(content: &str) -> SourceOutcome<Mapping> {
    let mut document: Value = match serde_yaml::from_str(content) {
        Ok(document) => document,
        Err(e) => return SourceOutcome::Malformed(format!("Parse error: {}", e)),
    };
    if let Err(e) = document.apply_merge() {
        return SourceOutcome::Malformed(format!("Merge key error: {}", e));
    }

    match normalize(document) {
        Value::Mapping(mapping) => SourceOutcome::Loaded(mapping),
        Value::Null => SourceOutcome::Loaded(Mapping::new()),
        other => SourceOutcome::Malformed(format!(
            "expected a mapping at the document root, found {}",
            kind_of(&other)
        )),
    }
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut normalized = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping {
                if value.is_null() {
                    continue;
                }
                let key = match key {
                    Value::String(key) => Value::String(key.to_lowercase()),
                    other => other,
                };
                normalized.insert(key, normalize(value));
            }
            Value::Mapping(normalized)
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize).collect()),
        Value::Tagged(tagged) => normalize(tagged.value),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
