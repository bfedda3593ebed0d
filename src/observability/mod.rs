//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config resolution
//!     → bootstrap subscriber (scoped, RUST_LOG or info)
//! ResolvedConfig.logging
//!     → logging.rs (global subscriber: level filter + text/JSON output)
//! HTTP requests
//!     → tower-http TraceLayer spans
//! ```

pub mod logging;
