//! Environment overrides for credential settings.
//!
//! Only the keys listed in [`ENV_OVERRIDES`] are ever read from the
//! environment. Application metadata, logging and API policy are file only.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

/// Environment variables that override the structured file, paired with the
/// (normalized) key they replace.
pub const ENV_OVERRIDES: [(&str, &str); 7] = [
    ("DB_HOST", "db_host"),
    ("DB_PORT", "db_port"),
    ("DB_USER", "db_user"),
    ("DB_PASS", "db_pass"),
    ("DB_NAME", "db_name"),
    ("REDIS_URL", "redis_url"),
    ("JWT_SECRET", "jwt_secret"),
];

/// Read access to environment variables.
pub trait EnvLookup {
    /// Value of `key`, or `None` when the variable is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Live environment layered over values read from an override file.
///
/// A variable set in the live environment shadows the file even when empty.
pub struct LayeredEnv<'a, E> {
    live: &'a E,
    file: &'a HashMap<String, String>,
}

impl<'a, E: EnvLookup> LayeredEnv<'a, E> {
    pub fn new(live: &'a E, file: &'a HashMap<String, String>) -> Self {
        Self { live, file }
    }
}

impl<E: EnvLookup> EnvLookup for LayeredEnv<'_, E> {
    fn get(&self, key: &str) -> Option<String> {
        self.live.get(key).or_else(|| self.file.get(key).cloned())
    }
}

/// Write every non-empty override onto the top level of `merged`.
///
/// Returns the environment variable names that took effect.
pub fn apply_overrides(merged: &mut Mapping, env: &impl EnvLookup) -> Vec<&'static str> {
    let mut applied = Vec::new();

    for (var, key) in ENV_OVERRIDES {
        let Some(value) = env.get(var).filter(|value| !value.is_empty()) else {
            continue;
        };
        merged.insert(Value::String(key.to_string()), Value::String(value));
        applied.push(var);
    }

    applied
}
