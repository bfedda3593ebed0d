//! Configuration schema definitions.
//!
//! This module defines the resolved configuration structure for the service.
//! The on-disk shape is flat for credentials (`DB_HOST`, `REDIS_URL`, ...) and
//! sectioned for everything else (`app`, `logging`, `api`); serde flattening
//! maps the flat keys onto their owning group.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::config::duration::parse_duration;

/// Host used by [`AppMetadata::address`] when `app.host` is empty.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used by [`AppMetadata::address`] when `app.port` is empty or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Shutdown deadline used when `app.shutdown_timeout` is empty or invalid.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Root configuration for the service.
///
/// Built once at startup by [`ConfigResolver`](crate::config::ConfigResolver)
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolvedConfig {
    /// Database connection settings (`DB_*`).
    #[serde(flatten)]
    pub database: DatabaseSettings,

    /// Cache connection settings (`REDIS_URL`).
    #[serde(flatten)]
    pub cache: CacheSettings,

    /// Token signing secret (`JWT_SECRET`).
    #[serde(flatten)]
    pub secret: SecretSettings,

    /// Application metadata and listen settings.
    pub app: AppMetadata,

    /// Log level and output format.
    pub logging: LoggingSettings,

    /// API policy descriptors.
    pub api: ApiPolicy,
}

/// Database connection settings.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    #[serde(rename = "db_host", deserialize_with = "scalar_string")]
    pub host: String,

    #[serde(rename = "db_port", deserialize_with = "scalar_string")]
    pub port: String,

    #[serde(rename = "db_user", deserialize_with = "scalar_string")]
    pub user: String,

    #[serde(rename = "db_pass", deserialize_with = "scalar_string")]
    pub password: String,

    #[serde(rename = "db_name", deserialize_with = "scalar_string")]
    pub name: String,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &Redacted(&self.password))
            .field("name", &self.name)
            .finish()
    }
}

/// Cache connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Connection URL (e.g., "redis://localhost:6379/0").
    #[serde(rename = "redis_url", deserialize_with = "scalar_string")]
    pub url: String,
}

/// Secret material used to sign tokens.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecretSettings {
    #[serde(rename = "jwt_secret", deserialize_with = "scalar_string")]
    pub jwt_secret: String,
}

impl fmt::Debug for SecretSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSettings")
            .field("jwt_secret", &Redacted(&self.jwt_secret))
            .finish()
    }
}

/// Application metadata. File only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(deserialize_with = "scalar_string")]
    pub version: String,

    #[serde(deserialize_with = "scalar_string")]
    pub description: String,

    /// Listen host; see [`AppMetadata::address`].
    #[serde(deserialize_with = "scalar_string")]
    pub host: String,

    /// Listen port; see [`AppMetadata::address`].
    #[serde(deserialize_with = "scalar_string")]
    pub port: String,

    /// Graceful shutdown deadline (e.g., "15s").
    #[serde(deserialize_with = "scalar_string")]
    pub shutdown_timeout: String,
}

impl AppMetadata {
    /// Network address the server binds to, as `host:port`.
    ///
    /// Empty host falls back to [`DEFAULT_HOST`]; an empty or non-numeric port
    /// falls back to [`DEFAULT_PORT`].
    pub fn address(&self) -> String {
        let host = match self.host.trim() {
            "" => DEFAULT_HOST,
            host => host,
        };
        let port = self.port.trim().parse::<u16>().unwrap_or(DEFAULT_PORT);

        // Bare IPv6 literals need brackets to form a socket address.
        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        }
    }

    /// Deadline for draining in-flight requests on shutdown.
    pub fn shutdown_timeout(&self) -> Duration {
        parse_duration(&self.shutdown_timeout)
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)
    }
}

/// Logging settings. File only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive (e.g., "info", "debug", "condo_backend=trace").
    #[serde(deserialize_with = "scalar_string")]
    pub level: String,

    /// Output format ("json" or "text").
    #[serde(deserialize_with = "scalar_string")]
    pub format: String,
}

/// API policy descriptors. File only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiPolicy {
    /// Rate limit descriptor (e.g., "100/m"), passed through untouched.
    #[serde(deserialize_with = "scalar_string")]
    pub rate_limit: String,

    /// Per-request timeout (e.g., "30s").
    #[serde(deserialize_with = "scalar_string")]
    pub timeout: String,
}

impl ApiPolicy {
    /// Per-request timeout, or `None` when unset, zero, or unparsable.
    pub fn request_timeout(&self) -> Option<Duration> {
        parse_duration(&self.timeout).filter(|timeout| !timeout.is_zero())
    }
}

/// Debug wrapper that hides a secret value.
struct Redacted<'a>(&'a str);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("\"\"")
        } else {
            f.write_str("\"<redacted>\"")
        }
    }
}

/// Decode any YAML scalar into its textual form.
///
/// Numbers and booleans are rendered, `null` becomes the empty string,
/// mappings and sequences are rejected.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> serde::de::Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a scalar value")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
