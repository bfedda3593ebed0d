//! Condo management backend service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigResolver, ResolvedConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
