//! Caller-location subsystem.
//!
//! # Data Flow
//! ```text
//! call site (class, method, file, line)
//!     → record.rs (LocationRecord, immutable)
//!     → codec.rs encode → "Class.Method(File:Line)"
//!
//! stored/transmitted text
//!     → codec.rs decode (structural checks)
//!     → LocationRecord | MalformedLocation
//! ```
//!
//! # Design Decisions
//! - The canonical string is the only wire format; no escaping is applied
//! - Decode splits on the *last* `.` and the *last* `:` so dotted class
//!   names and colon-bearing paths survive
//! - Malformed input is a recoverable error, never a panic

pub mod codec;
pub mod record;

pub use codec::{decode, decode_optional, encode, MalformedLocation};
pub use record::{LocationRecord, UNKNOWN_LINE};
