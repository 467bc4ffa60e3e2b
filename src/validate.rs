//! Whole-registry validation: schema, then pattern consistency, per record.
//!
//! Records are visited in declaration order so failure reports are
//! reproducible. Each record contributes at most one diagnostic (its first
//! defect). By default every record is checked and all diagnostics are
//! returned; [`ValidateOptions::fail_fast`] stops at the first one.

use serde_json::Value;

use crate::consistency::{check_instances, compile_record, lint_rejected_instances};
use crate::error::{Diagnostic, RecordRef, Warning};
use crate::schema::validate_schema;
use crate::types::Record;

/// Knobs for [`validate_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Stop at the first failing record instead of checking them all.
    pub fail_fast: bool,
    /// Treat warnings as failures.
    pub deny_warnings: bool,
}

/// Summary of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub records: usize,
    /// Records that carry `instances` and had them checked.
    pub with_instances: usize,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validate every record. Returns the report, or the diagnostics in record
/// order when at least one record is defective.
pub fn validate_all(records: &[Value], options: &ValidateOptions) -> Result<Report, Vec<Diagnostic>> {
    let mut report = Report {
        records: records.len(),
        ..Report::default()
    };
    let mut diagnostics = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        let outcome = validate_record(index, raw).and_then(|(record, warnings)| {
            if options.deny_warnings
                && let Some(first) = warnings.first()
            {
                return Err(Diagnostic::Warning(first.clone()));
            }
            Ok((record, warnings))
        });

        match outcome {
            Ok((record, warnings)) => {
                if record.instances.is_some() {
                    report.with_instances += 1;
                }
                for warning in &warnings {
                    tracing::debug!(%warning, "record warning");
                }
                report.warnings.extend(warnings);
            }
            Err(diagnostic) => {
                tracing::debug!(index, %diagnostic, "record failed");
                diagnostics.push(diagnostic);
                if options.fail_fast {
                    break;
                }
            }
        }
    }

    if diagnostics.is_empty() {
        tracing::debug!(
            records = report.records,
            with_instances = report.with_instances,
            warnings = report.warnings.len(),
            "registry valid"
        );
        Ok(report)
    } else {
        Err(diagnostics)
    }
}

/// Run every check on one raw record and hand back its typed form.
pub fn validate_record(index: usize, raw: &Value) -> Result<(Record, Vec<Warning>), Diagnostic> {
    validate_schema(index, raw)?;

    let record: Record = serde_json::from_value(raw.clone()).map_err(|e| Diagnostic::Decode {
        record: RecordRef::new(index, raw.get("id").and_then(Value::as_str)),
        message: e.to_string(),
    })?;

    let compiled = compile_record(&record)?;
    check_instances(&record, &compiled)?;
    let warnings = lint_rejected_instances(&record, &compiled);

    tracing::trace!(index, id = %record.id, "record valid");
    Ok((record, warnings))
}
