//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Resolve config → Init logging → Bind listener → Serve
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM/SIGHUP → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     Broadcast → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - SIGHUP shuts down like SIGTERM; there is no config reload
//! - Shutdown has timeout: in-flight work is abandoned after the deadline

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::{wait_for_signal, ShutdownSignal};
