//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env override file ──┐
//! process environment ─┴→ overrides.rs (7 credential keys only)
//!                             │
//! configs/app.yaml → sources.rs (parse, normalize keys)
//!                             │
//!                             ▼
//!                   loader.rs (merge, typed decode)
//!                             │
//!                             ▼
//!                   ResolvedConfig (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Missing or unparsable sources degrade to empty values, never abort
//! - Only a decode failure of the merged document is an error
//! - The set of environment-overridable keys is a static table
//! - No global registry: the resolver is a plain value owned by the caller

pub mod duration;
pub mod loader;
pub mod overrides;
pub mod schema;
pub mod sources;

pub use loader::{ConfigError, ConfigResolver};
pub use overrides::{EnvLookup, ProcessEnv, ENV_OVERRIDES};
pub use schema::{
    ApiPolicy, AppMetadata, CacheSettings, DatabaseSettings, LoggingSettings, ResolvedConfig,
    SecretSettings,
};
pub use sources::SourceOutcome;
