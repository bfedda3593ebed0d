//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → placeholder handler (`GET /` → app metadata)
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
