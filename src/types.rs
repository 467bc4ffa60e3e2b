use serde::Deserialize;
use serde_json::{Map, Value};

use crate::enums::SourceType;

// ─── Record ─────────────────────────────────────────────────────────────────

/// One bot or crawler definition in the registry.
///
/// Only built from JSON that already passed [`crate::schema::validate_schema`].
/// Fields the checker does not inspect (`addition_date`, `depends_on`, ...)
/// are kept in `extra` so a decoded record still describes the whole entry.
#[derive(Clone, Debug, Deserialize)]
pub struct Record {
    pub id: String,
    pub pattern: PatternSet,
    pub categories: Vec<String>,
    pub url: Option<String>,
    pub verification: Vec<Verification>,
    pub aliases: Option<Vec<String>>,
    pub instances: Option<Instances>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─── Pattern set ────────────────────────────────────────────────────────────

/// The `{accepted, forbidden}` pair of regex sources identifying a record.
///
/// A candidate matches when it matches every `accepted` pattern and none of
/// the `forbidden` ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PatternSet {
    pub accepted: Vec<String>,
    pub forbidden: Vec<String>,
}

impl PatternSet {
    pub fn new<A, F>(accepted: A, forbidden: F) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        PatternSet {
            accepted: accepted.into_iter().map(Into::into).collect(),
            forbidden: forbidden.into_iter().map(Into::into).collect(),
        }
    }
}

// ─── Instances ──────────────────────────────────────────────────────────────

/// Curated example identifiers used only to check the pattern set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Instances {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

// ─── Verification ───────────────────────────────────────────────────────────

/// How a client claiming to be this bot can be verified.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Verification {
    Ip {
        sources: Vec<Source>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Cidr {
        sources: Vec<Source>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Dns {
        masks: Vec<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

/// A remote list of addresses, selected out of a JSON document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub url: String,
    pub selector: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
