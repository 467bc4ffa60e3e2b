//! Closed enumerations used by the registry record model.
//!
//! Only the defined variants are valid. The schema validator reports any
//! other value before these are ever deserialized.

use serde::Deserialize;
use std::fmt;

/// Which half of a record's pattern set a regex belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Accepted,
    Forbidden,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Accepted => "accepted",
            PatternKind::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern.{}", self.as_str())
    }
}

/// Transport of a verification source. Only `http-json` is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum SourceType {
    #[serde(rename = "http-json")]
    HttpJson,
}

impl SourceType {
    pub const KNOWN: &'static [&'static str] = &["http-json"];
}

/// Discriminator values accepted for `verification[].type`.
pub const VERIFICATION_TYPES: &[&str] = &["ip", "dns", "cidr"];
