//! Canonical string codec for call-site locations.
//!
//! # Responsibilities
//! - Format a `LocationRecord` as `Class.Method(File:Line)`
//! - Parse that form back, rejecting anything structurally malformed
//!
//! # Design Decisions
//! - Pure functions: no I/O, no logging, no shared state
//! - Encode is total and never escapes embedded delimiters
//! - Decode splits on the last `.` and last `:`, so method names and line
//!   numbers must not contain those characters
//! - Empty segments from runs of `(` are dropped before counting

use thiserror::Error;

use crate::location::record::LocationRecord;

/// Decode failure. Every variant is the same recoverable condition; the
/// variant only records which structural check rejected the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLocation {
    /// Input was empty or absent.
    #[error("malformed location: input is empty")]
    Empty,

    /// Splitting on `(` did not yield exactly two non-empty segments.
    #[error("malformed location: expected 2 `(`-delimited segments, found {found}")]
    SegmentCount { found: usize },

    /// The part before `(` has no `.` separating class and method.
    #[error("malformed location: missing `.` between class and method")]
    MissingDot,

    /// The part after `(` has no `:` separating file and line.
    #[error("malformed location: missing `:` between file and line")]
    MissingColon,

    /// The line-number substring is not a 32-bit integer.
    #[error("malformed location: invalid line number {text:?}")]
    InvalidLineNumber { text: String },
}

/// Encode a location into its canonical string form.
pub fn encode(record: &LocationRecord) -> String {
    record.to_string()
}

/// Decode the canonical string form into a location.
pub fn decode(input: &str) -> Result<LocationRecord, MalformedLocation> {
    if input.is_empty() {
        return Err(MalformedLocation::Empty);
    }

    let segments: Vec<&str> = input.split('(').filter(|s| !s.is_empty()).collect();
    let [left, right] = segments.as_slice() else {
        return Err(MalformedLocation::SegmentCount {
            found: segments.len(),
        });
    };

    // A `(`-split segment never starts with `(`, so the left trim is vestigial.
    let left = left.trim_matches('(');
    let right = right.trim_matches(|c: char| c == '(' || c == ')');

    let (class_name, method_name) = left.rsplit_once('.').ok_or(MalformedLocation::MissingDot)?;
    let (file_name, line_text) = right.rsplit_once(':').ok_or(MalformedLocation::MissingColon)?;
    let line_number = parse_line_number(line_text)?;

    Ok(LocationRecord::new(
        class_name,
        method_name,
        file_name,
        line_number,
    ))
}

/// Decode a location that may be missing altogether.
pub fn decode_optional(input: Option<&str>) -> Result<LocationRecord, MalformedLocation> {
    input.map_or(Err(MalformedLocation::Empty), decode)
}

/// Integer parse with optional sign and surrounding ASCII whitespace.
fn parse_line_number(text: &str) -> Result<i32, MalformedLocation> {
    text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r'))
        .parse::<i32>()
        .map_err(|_| MalformedLocation::InvalidLineNumber {
            text: text.to_string(),
        })
}
