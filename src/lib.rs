//! Checker for the well-known bots registry.
//!
//! The registry is a single JSON array of records, one per bot or crawler.
//! Each record identifies its bot with a pair of regex lists and may carry
//! curated example identifiers. This crate verifies the shape of every
//! record and proves that each record's patterns classify its own examples
//! the way the maintainers intended:
//!
//! ```text
//! parse(text) → [Value] → validate_schema → Record → check_pattern_consistency
//!                        └──────────────── validate_all ───────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let text = r#"[
//!   {
//!     "id": "examplebot",
//!     "pattern": { "accepted": ["^ExampleBot/"], "forbidden": ["spoofed"] },
//!     "categories": ["search-engine-crawler"],
//!     "verification": [],
//!     "instances": {
//!       "accepted": ["ExampleBot/1.0"],
//!       "rejected": ["ExampleBot/spoofed-client"]
//!     }
//!   }
//! ]"#;
//!
//! let report = well_known_bots::load(text).expect("valid registry");
//! assert_eq!(report.records, 1);
//! ```

pub mod consistency;
pub mod enums;
pub mod error;
pub mod format;
pub mod parse;
pub mod pattern;
pub mod schema;
pub mod types;
pub mod validate;

pub use error::*;
pub use types::*;

pub use consistency::check_pattern_consistency;
pub use parse::parse;
pub use pattern::{CompiledPatternSet, Verdict, classify};
pub use schema::validate_schema;
pub use validate::{Report, ValidateOptions, validate_all};

/// Error type for the [`load`] convenience entry point.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{} invalid record(s)", .0.len())]
    Invalid(Vec<Diagnostic>),
}

/// Convenience entry point composing parse → validate_all with default
/// options (every record checked, warnings allowed).
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the text is not a JSON array and
/// [`LoadError::Invalid`] with every diagnostic otherwise.
pub fn load(input: &str) -> Result<Report, LoadError> {
    let records = parse::parse(input)?;
    validate::validate_all(&records, &ValidateOptions::default()).map_err(LoadError::Invalid)
}
