//! The classification rule over a record's `{accepted, forbidden}` regex sets.
//!
//! A candidate is matched by a record iff it matches **every** accepted
//! pattern and **none** of the forbidden ones. Matching is an unanchored
//! search: a pattern matches if it matches anywhere in the candidate, so
//! authors anchor explicitly with `^`/`$` where they need to.
//!
//! An empty `accepted` list matches everything; an empty `forbidden` list
//! excludes nothing.
//!
//! Patterns are authored for the ECMAScript `RegExp` dialect, so they are
//! compiled with `regress` and no flags: `\d`, `\w` and `\b` are ASCII-only,
//! look-around is available, inline flag groups such as `(?i)` are not.

use regress::Regex;

use crate::enums::PatternKind;
use crate::error::InvalidPattern;
use crate::types::PatternSet;

/// Outcome of classifying one candidate, with the pattern responsible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict<'a> {
    Matched,
    /// The candidate fails this accepted pattern (first one in declaration order).
    AcceptedMiss { pattern: &'a str },
    /// The candidate passes every accepted pattern but hits this forbidden one.
    ForbiddenHit { pattern: &'a str },
}

impl Verdict<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched)
    }
}

#[derive(Clone, Debug)]
struct Compiled {
    source: String,
    re: Regex,
}

impl Compiled {
    fn is_match(&self, candidate: &str) -> bool {
        self.re.find(candidate).is_some()
    }
}

/// A pattern set with every source compiled once.
#[derive(Clone, Debug)]
pub struct CompiledPatternSet {
    accepted: Vec<Compiled>,
    forbidden: Vec<Compiled>,
}

impl CompiledPatternSet {
    /// Compile every pattern. The first source that fails to compile is
    /// reported; accepted patterns are compiled before forbidden ones.
    pub fn compile(patterns: &PatternSet) -> Result<Self, InvalidPattern> {
        Ok(CompiledPatternSet {
            accepted: compile_all(&patterns.accepted, PatternKind::Accepted)?,
            forbidden: compile_all(&patterns.forbidden, PatternKind::Forbidden)?,
        })
    }

    pub fn classify(&self, candidate: &str) -> bool {
        self.matches_all_accepted(candidate) && !self.matches_any_forbidden(candidate)
    }

    pub fn matches_all_accepted(&self, candidate: &str) -> bool {
        self.accepted.iter().all(|p| p.is_match(candidate))
    }

    pub fn matches_any_forbidden(&self, candidate: &str) -> bool {
        self.forbidden.iter().any(|p| p.is_match(candidate))
    }

    /// First accepted pattern the candidate does not match.
    pub fn first_accepted_miss(&self, candidate: &str) -> Option<&str> {
        self.accepted
            .iter()
            .find(|p| !p.is_match(candidate))
            .map(|p| p.source.as_str())
    }

    /// First forbidden pattern the candidate matches.
    pub fn first_forbidden_hit(&self, candidate: &str) -> Option<&str> {
        self.forbidden
            .iter()
            .find(|p| p.is_match(candidate))
            .map(|p| p.source.as_str())
    }

    /// Classify and say why. Accepted patterns are inspected first, so a
    /// candidate that both misses an accepted pattern and hits a forbidden
    /// one is reported as an accepted miss.
    pub fn explain(&self, candidate: &str) -> Verdict<'_> {
        if let Some(pattern) = self.first_accepted_miss(candidate) {
            return Verdict::AcceptedMiss { pattern };
        }
        if let Some(pattern) = self.first_forbidden_hit(candidate) {
            return Verdict::ForbiddenHit { pattern };
        }
        Verdict::Matched
    }
}

fn compile_all(sources: &[String], kind: PatternKind) -> Result<Vec<Compiled>, InvalidPattern> {
    sources
        .iter()
        .map(|source| {
            tracing::trace!(%kind, pattern = %source, "compiling pattern");
            let re = Regex::new(source).map_err(|e| InvalidPattern {
                kind,
                pattern: source.clone(),
                reason: e.to_string(),
            })?;
            Ok(Compiled {
                source: source.clone(),
                re,
            })
        })
        .collect()
}

/// Decide whether `candidate` is matched by `patterns`.
///
/// Compiles the set on every call; use [`CompiledPatternSet`] to classify
/// many candidates against the same record.
pub fn classify(patterns: &PatternSet, candidate: &str) -> Result<bool, InvalidPattern> {
    Ok(CompiledPatternSet::compile(patterns)?.classify(candidate))
}
