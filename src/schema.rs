//! Structural checks on a raw registry record, S-001 through S-009.
//!
//! Works on the decoded JSON rather than the typed [`crate::types::Record`]
//! so that a defect can be reported against the exact field that caused it.
//! Checks run in rule order and stop at the first violation: later rules
//! assume the shape earlier ones established.

use serde_json::{Map, Value};

use crate::enums::{SourceType, VERIFICATION_TYPES};
use crate::error::{RecordRef, SchemaDiagnostic};

/// Validate the shape of the record at `index`.
pub fn validate_schema(index: usize, record: &Value) -> Result<(), SchemaDiagnostic> {
    let ctx = Ctx {
        record: RecordRef::new(index, record.get("id").and_then(Value::as_str)),
    };

    let Some(obj) = record.as_object() else {
        return Err(ctx.fail("S-001", "", "record must be an object"));
    };

    s001_id(&ctx, obj)?;
    let pattern = s002_pattern_object(&ctx, obj)?;
    ctx.string_array("S-003", "pattern.accepted", pattern.get("accepted"), "pattern (accepted) entry")?;
    ctx.string_array("S-004", "pattern.forbidden", pattern.get("forbidden"), "pattern (forbidden) entry")?;
    s005_categories(&ctx, obj)?;
    s006_url(&ctx, obj)?;
    s007_verification(&ctx, obj)?;
    s008_aliases(&ctx, obj)?;
    s009_instances(&ctx, obj)?;
    Ok(())
}

struct Ctx {
    record: RecordRef,
}

impl Ctx {
    fn fail(&self, rule: &str, path: &str, message: impl Into<String>) -> SchemaDiagnostic {
        SchemaDiagnostic {
            record: self.record.clone(),
            rule: rule.to_string(),
            path: if path.is_empty() { "$".to_string() } else { path.to_string() },
            message: message.into(),
        }
    }

    /// `value` must be an array whose entries are all strings.
    fn string_array<'a>(
        &self,
        rule: &str,
        path: &str,
        value: Option<&'a Value>,
        entry_name: &str,
    ) -> Result<&'a [Value], SchemaDiagnostic> {
        let Some(items) = value.and_then(Value::as_array) else {
            return Err(self.fail(rule, path, format!("{} is missing or is not an array", path)));
        };
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                return Err(self.fail(
                    rule,
                    &format!("{}[{}]", path, i),
                    format!("{} was not a string: {}", entry_name, item),
                ));
            }
        }
        Ok(items.as_slice())
    }

    /// `value` must be a string when present.
    fn optional_string(&self, rule: &str, path: &str, value: Option<&Value>) -> Result<(), SchemaDiagnostic> {
        match value {
            None | Some(Value::String(_)) => Ok(()),
            Some(other) => Err(self.fail(
                rule,
                path,
                format!("wrong type for `{}` string field: {}", path, other),
            )),
        }
    }
}

// ─── S-001 ──────────────────────────────────────────────────────────────────

fn s001_id(ctx: &Ctx, obj: &Map<String, Value>) -> Result<(), SchemaDiagnostic> {
    match obj.get("id") {
        Some(Value::String(_)) => Ok(()),
        _ => Err(ctx.fail("S-001", "id", "record is missing required `id` string field")),
    }
}

// ─── S-002 ──────────────────────────────────────────────────────────────────

fn s002_pattern_object<'a>(
    ctx: &Ctx,
    obj: &'a Map<String, Value>,
) -> Result<&'a Map<String, Value>, SchemaDiagnostic> {
    obj.get("pattern").and_then(Value::as_object).ok_or_else(|| {
        ctx.fail(
            "S-002",
            "pattern",
            "record is missing required pattern object with accepted and forbidden arrays",
        )
    })
}

// ─── S-005 ──────────────────────────────────────────────────────────────────

fn s005_categories(ctx: &Ctx, obj: &Map<String, Value>) -> Result<(), SchemaDiagnostic> {
    let categories = ctx.string_array("S-005", "categories", obj.get("categories"), "category")?;
    if categories.is_empty() {
        return Err(ctx.fail(
            "S-005",
            "categories",
            "the `categories` field must contain at least one entry",
        ));
    }
    Ok(())
}

// ─── S-006 ──────────────────────────────────────────────────────────────────

fn s006_url(ctx: &Ctx, obj: &Map<String, Value>) -> Result<(), SchemaDiagnostic> {
    ctx.optional_string("S-006", "url", obj.get("url"))
}

// ─── S-007 ──────────────────────────────────────────────────────────────────

fn s007_verification(ctx: &Ctx, obj: &Map<String, Value>) -> Result<(), SchemaDiagnostic> {
    let Some(rules) = obj.get("verification").and_then(Value::as_array) else {
        return Err(ctx.fail(
            "S-007",
            "verification",
            "record is missing required `verification` array field",
        ));
    };

    for (i, rule) in rules.iter().enumerate() {
        let path = format!("verification[{}]", i);
        match rule.get("type").and_then(Value::as_str) {
            Some(kind @ ("ip" | "cidr")) => verification_sources(ctx, &path, kind, rule)?,
            Some("dns") => {
                ctx.string_array("S-007", &format!("{}.masks", path), rule.get("masks"), "mask")?;
            }
            _ => {
                return Err(ctx.fail(
                    "S-007",
                    &format!("{}.type", path),
                    format!(
                        "verification entry is incorrect, only {} are supported: {}",
                        quoted_list(VERIFICATION_TYPES),
                        rule
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn verification_sources(ctx: &Ctx, path: &str, kind: &str, rule: &Value) -> Result<(), SchemaDiagnostic> {
    let sources_path = format!("{}.sources", path);
    let Some(sources) = rule.get("sources").and_then(Value::as_array) else {
        return Err(ctx.fail(
            "S-007",
            &sources_path,
            format!("{} verification entry is missing required `sources` array field", kind),
        ));
    };

    for (j, source) in sources.iter().enumerate() {
        let source_path = format!("{}[{}]", sources_path, j);
        match source.get("type").and_then(Value::as_str) {
            Some(t) if SourceType::KNOWN.contains(&t) => {}
            _ => {
                return Err(ctx.fail(
                    "S-007",
                    &format!("{}.type", source_path),
                    format!(
                        "{} source `type` must be a valid type (currently only {} is supported)",
                        kind,
                        quoted_list(SourceType::KNOWN)
                    ),
                ));
            }
        }
        for field in ["url", "selector"] {
            if !source.get(field).is_some_and(Value::is_string) {
                return Err(ctx.fail(
                    "S-007",
                    &format!("{}.{}", source_path, field),
                    format!("{} source `{}` must be a string", kind, field),
                ));
            }
        }
    }
    Ok(())
}

// ─── S-008 ──────────────────────────────────────────────────────────────────

fn s008_aliases(ctx: &Ctx, obj: &Map<String, Value>) -> Result<(), SchemaDiagnostic> {
    match obj.get("aliases") {
        None => Ok(()),
        Some(Value::Array(_)) => ctx
            .string_array("S-008", "aliases", obj.get("aliases"), "alias")
            .map(|_| ()),
        Some(other) => Err(ctx.fail(
            "S-008",
            "aliases",
            format!("wrong type for `aliases` array field: {}", other),
        )),
    }
}

// ─── S-009 ──────────────────────────────────────────────────────────────────

fn s009_instances(ctx: &Ctx, obj: &Map<String, Value>) -> Result<(), SchemaDiagnostic> {
    let Some(value) = obj.get("instances") else {
        return Ok(());
    };
    let Some(instances) = value.as_object() else {
        return Err(ctx.fail(
            "S-009",
            "instances",
            "wrong type for `instances`, it must be an object with accepted and rejected arrays",
        ));
    };
    ctx.string_array("S-009", "instances.accepted", instances.get("accepted"), "instance")?;
    ctx.string_array("S-009", "instances.rejected", instances.get("rejected"), "rejected instance")?;
    Ok(())
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("`{}`", s))
        .collect::<Vec<_>>()
        .join(", ")
}
