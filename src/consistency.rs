//! Proves a record's pattern set classifies its own example instances.
//!
//! Every `instances.accepted` entry must be matched by the record and every
//! `instances.rejected` entry must not be. Rejected instances are meant to
//! show that the forbidden patterns do real exclusion work; the hard check
//! only requires that they do not match, and [`lint_rejected_instances`]
//! flags the ones that are rejected merely because an accepted pattern is
//! too narrow for them.

use crate::enums::PatternKind;
use crate::error::{ConsistencyDiagnostic, Warning};
use crate::pattern::{CompiledPatternSet, Verdict};
use crate::types::Record;

pub const W001_REJECTED_WITHOUT_FORBIDDEN: &str = "W-001";

/// Check a schema-valid record. Returns the first disagreement found.
///
/// Records without `instances` only need their patterns to compile.
pub fn check_pattern_consistency(record: &Record) -> Result<(), ConsistencyDiagnostic> {
    check_instances(record, &compile_record(record)?)
}

/// Compile a record's pattern set, attributing a failure to the record.
pub fn compile_record(record: &Record) -> Result<CompiledPatternSet, ConsistencyDiagnostic> {
    CompiledPatternSet::compile(&record.pattern).map_err(|error| {
        ConsistencyDiagnostic::InvalidPattern {
            record_id: record.id.clone(),
            error,
        }
    })
}

/// Check `record`'s instances against its already compiled patterns.
pub fn check_instances(
    record: &Record,
    compiled: &CompiledPatternSet,
) -> Result<(), ConsistencyDiagnostic> {
    let Some(instances) = &record.instances else {
        return Ok(());
    };

    for instance in &instances.accepted {
        match compiled.explain(instance) {
            Verdict::Matched => {}
            Verdict::AcceptedMiss { pattern } => {
                return Err(accepted_mismatch(record, instance, PatternKind::Accepted, pattern));
            }
            Verdict::ForbiddenHit { pattern } => {
                return Err(accepted_mismatch(record, instance, PatternKind::Forbidden, pattern));
            }
        }
    }

    for instance in &instances.rejected {
        let matches_all_accepted = compiled.matches_all_accepted(instance);
        let matches_any_forbidden = compiled.matches_any_forbidden(instance);
        if matches_all_accepted && !matches_any_forbidden {
            return Err(ConsistencyDiagnostic::RejectedInstanceMismatch {
                record_id: record.id.clone(),
                instance: instance.clone(),
                accepted: record.pattern.accepted.clone(),
                forbidden: record.pattern.forbidden.clone(),
                matches_all_accepted,
                matches_any_forbidden,
            });
        }
    }

    tracing::trace!(
        id = %record.id,
        accepted = instances.accepted.len(),
        rejected = instances.rejected.len(),
        "instances consistent"
    );
    Ok(())
}

/// Report rejected instances that never reach a forbidden pattern because
/// they already miss an accepted one.
pub fn lint_rejected_instances(record: &Record, compiled: &CompiledPatternSet) -> Vec<Warning> {
    let Some(instances) = &record.instances else {
        return Vec::new();
    };

    instances
        .rejected
        .iter()
        .filter_map(|instance| match compiled.explain(instance) {
            Verdict::AcceptedMiss { pattern } => Some(Warning {
                record_id: record.id.clone(),
                code: W001_REJECTED_WITHOUT_FORBIDDEN.to_string(),
                message: format!(
                    "rejected instance {:?} is excluded by missing accepted pattern {:?}, not by a forbidden pattern",
                    instance, pattern
                ),
            }),
            _ => None,
        })
        .collect()
}

fn accepted_mismatch(
    record: &Record,
    instance: &str,
    kind: PatternKind,
    pattern: &str,
) -> ConsistencyDiagnostic {
    ConsistencyDiagnostic::AcceptedInstanceMismatch {
        record_id: record.id.clone(),
        instance: instance.to_string(),
        kind,
        pattern: pattern.to_string(),
    }
}
