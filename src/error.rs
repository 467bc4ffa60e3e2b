use std::fmt;
use thiserror::Error;

use crate::enums::PatternKind;

/// Position of a record in the registry, with its `id` when one could be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordRef {
    pub index: usize,
    pub id: Option<String>,
}

impl RecordRef {
    pub fn new(index: usize, id: Option<&str>) -> Self {
        RecordRef {
            index,
            id: id.map(str::to_string),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "record #{} ('{}')", self.index, id),
            None => write!(f, "record #{}", self.index),
        }
    }
}

/// Produced by `parse` when the registry text is not a JSON array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{}:{}: {}", line, col, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// A record whose shape does not match the registry schema.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{record}: {rule} at {path}: {message}")]
pub struct SchemaDiagnostic {
    pub record: RecordRef,
    pub rule: String,
    pub path: String,
    pub message: String,
}

/// A regex source that the engine refuses to compile.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid regex in {kind}: '{pattern}': {reason}")]
pub struct InvalidPattern {
    pub kind: PatternKind,
    pub pattern: String,
    pub reason: String,
}

/// A record whose patterns disagree with its own example instances.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConsistencyDiagnostic {
    #[error("record '{record_id}': {error}")]
    InvalidPattern {
        record_id: String,
        #[source]
        error: InvalidPattern,
    },

    /// `kind` tells which side disagreed: an accepted pattern the instance
    /// fails, or a forbidden pattern it matches.
    #[error("{}", render_accepted_mismatch(.record_id, .instance, .kind, .pattern))]
    AcceptedInstanceMismatch {
        record_id: String,
        instance: String,
        kind: PatternKind,
        pattern: String,
    },

    #[error(
        "record '{record_id}': instance in instances.rejected unexpectedly matches all accepted patterns and none of the forbidden patterns\n  pattern.accepted: {accepted:?}\n  pattern.forbidden: {forbidden:?}\n  instance: {instance:?}\n  matches all accepted: {matches_all_accepted}, matches any forbidden: {matches_any_forbidden}"
    )]
    RejectedInstanceMismatch {
        record_id: String,
        instance: String,
        accepted: Vec<String>,
        forbidden: Vec<String>,
        matches_all_accepted: bool,
        matches_any_forbidden: bool,
    },
}

fn render_accepted_mismatch(
    record_id: &str,
    instance: &str,
    kind: &PatternKind,
    pattern: &str,
) -> String {
    let what = match kind {
        PatternKind::Accepted => "does not match the required accepted pattern",
        PatternKind::Forbidden => "should not match the forbidden pattern",
    };
    format!(
        "record '{}': instance in instances.accepted {}\n  {}: {:?}\n  instance: {:?}",
        record_id, what, kind, pattern, instance
    )
}

impl ConsistencyDiagnostic {
    pub fn record_id(&self) -> &str {
        match self {
            ConsistencyDiagnostic::InvalidPattern { record_id, .. }
            | ConsistencyDiagnostic::AcceptedInstanceMismatch { record_id, .. }
            | ConsistencyDiagnostic::RejectedInstanceMismatch { record_id, .. } => record_id,
        }
    }
}

/// Non-fatal finding about a record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("record '{record_id}': {code}: {message}")]
pub struct Warning {
    pub record_id: String,
    pub code: String,
    pub message: String,
}

/// Anything that fails a registry run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error(transparent)]
    Schema(#[from] SchemaDiagnostic),
    #[error(transparent)]
    Consistency(#[from] ConsistencyDiagnostic),
    /// Shape was accepted by the schema validator but the typed decode failed.
    #[error("{record}: cannot decode record: {message}")]
    Decode { record: RecordRef, message: String },
    /// A warning promoted to an error by `deny_warnings`.
    #[error(transparent)]
    Warning(#[from] Warning),
}

/// Produced when the registry text is not in canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(
        "registry is not canonically formatted (first difference at line {line}); run `well-known-bots generate` to rewrite it\n  expected: {expected:?}\n  found:    {found:?}"
    )]
    NotCanonical {
        line: usize,
        expected: String,
        found: String,
    },
}
