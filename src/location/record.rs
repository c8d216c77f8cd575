//! The call-site location value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::location::codec::{decode, encode, MalformedLocation};

/// Line number used when the caller could not determine one.
pub const UNKNOWN_LINE: i32 = -1;

/// Where a log-emitting call happened.
///
/// Immutable once constructed. The codec imposes no constraints on the
/// fields: any strings and any line number (including zero and negatives)
/// are carried as-is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocationRecord {
    class_name: String,
    method_name: String,
    file_name: String,
    line_number: i32,
}

impl LocationRecord {
    /// Create a location from a known call site.
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        file_name: impl Into<String>,
        line_number: i32,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            file_name: file_name.into(),
            line_number,
        }
    }

    /// Placeholder for a call site that could not be recovered.
    pub fn unknown() -> Self {
        Self::new("?", "?", "?", UNKNOWN_LINE)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn line_number(&self) -> i32 {
        self.line_number
    }

    /// Canonical `Class.Method(File:Line)` form.
    pub fn full_info(&self) -> String {
        encode(self)
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({}:{})",
            self.class_name, self.method_name, self.file_name, self.line_number
        )
    }
}

// Diagnostic form only; not part of the wire format.
impl fmt::Debug for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[LocationRecord: {}]", self)
    }
}

impl FromStr for LocationRecord {
    type Err = MalformedLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl TryFrom<&str> for LocationRecord {
    type Error = MalformedLocation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        decode(value)
    }
}

impl Serialize for LocationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loc = LocationRecord::new("Program", "Main", "Program.cs", 17);
        assert_eq!(loc.class_name(), "Program");
        assert_eq!(loc.method_name(), "Main");
        assert_eq!(loc.file_name(), "Program.cs");
        assert_eq!(loc.line_number(), 17);
    }

    #[test]
    fn test_display_is_canonical_form() {
        let loc = LocationRecord::new("Program", "Main", "Program.cs", 17);
        assert_eq!(loc.to_string(), "Program.Main(Program.cs:17)");
        assert_eq!(loc.full_info(), loc.to_string());
    }

    #[test]
    fn test_debug_form_is_tagged() {
        let loc = LocationRecord::new("A", "b", "c.rs", 3);
        assert_eq!(format!("{:?}", loc), "[LocationRecord: A.b(c.rs:3)]");
    }

    #[test]
    fn test_unknown_placeholder() {
        let loc = LocationRecord::unknown();
        assert_eq!(loc.line_number(), UNKNOWN_LINE);
        assert_eq!(loc.to_string(), "?.?(?:-1)");
        assert_eq!(loc.to_string().parse::<LocationRecord>().unwrap(), loc);
    }

    #[test]
    fn test_from_str_and_try_from() {
        let parsed: LocationRecord = "Outer.Inner.Run(lib.rs:9)".parse().unwrap();
        assert_eq!(parsed.class_name(), "Outer.Inner");
        assert_eq!(LocationRecord::try_from("Outer.Inner.Run(lib.rs:9)").unwrap(), parsed);
        assert!("garbage".parse::<LocationRecord>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let loc = LocationRecord::new("Svc.Worker", "Tick", "worker.rs", 0);
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, "\"Svc.Worker.Tick(worker.rs:0)\"");

        let back: LocationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);

        let err = serde_json::from_str::<LocationRecord>("\"no-parens\"").unwrap_err();
        assert!(err.to_string().contains("segments"));
    }
}
