//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! codec callers, rehydration, CLI
//!     → tracing macros (structured events)
//!     → logging.rs subscriber (pretty or JSON, stderr)
//! ```
//!
//! # Design Decisions
//! - The codec itself never logs; events come from its callers
//! - `RUST_LOG` overrides the configured filter

pub mod logging;

pub use logging::init_logging;
