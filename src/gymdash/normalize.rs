//! Document canonicalization.
//!
//! The store is schema-less: the same logical field arrives as different
//! JSON shapes depending on which client wrote it. Everything here is
//! total — malformed input degrades to a sentinel ([`FieldValue::Missing`]
//! or the empty-string id), never an error, so one corrupt document can
//! never blank a whole table.
//!
//! Each encoding family is a closed enum resolved by exhaustive match.
//! A new encoding means a new variant, visible at compile time, not
//! another speculative property probe.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::model::{FieldValue, NormalizedRecord, RawDocument};
use crate::schema::{self, CollectionSchema, FieldKind};

/// Character budget for blob summaries and long text cells.
pub const SUMMARY_BUDGET: usize = 80;

/// The identifier encodings the store emits.
#[derive(Debug)]
enum IdEncoding<'a> {
    Plain(&'a str),
    /// `{ "$oid": "..." }`
    Wrapped(&'a str),
    /// A nested document carrying its own `_id`.
    Nested(&'a Value),
    /// A bare scalar (number, bool) standing in for an id.
    Scalar(&'a Value),
    Unresolvable,
}

fn classify_id(value: &Value) -> IdEncoding<'_> {
    match value {
        Value::String(s) => IdEncoding::Plain(s),
        Value::Object(map) => {
            if let Some(Value::String(oid)) = map.get("$oid") {
                IdEncoding::Wrapped(oid)
            } else if let Some(inner) = map.get("_id") {
                IdEncoding::Nested(inner)
            } else {
                IdEncoding::Unresolvable
            }
        }
        Value::Number(_) | Value::Bool(_) => IdEncoding::Scalar(value),
        Value::Null | Value::Array(_) => IdEncoding::Unresolvable,
    }
}

/// Resolve any identifier encoding to a plain string id.
///
/// Total: the unresolvable case is the empty string, which
/// [`FieldValue::is_missing`] treats as absent.
pub fn resolve_id(value: &Value) -> String {
    match classify_id(value) {
        IdEncoding::Plain(s) => s.to_string(),
        IdEncoding::Wrapped(s) => s.to_string(),
        IdEncoding::Nested(inner) => resolve_id(inner),
        IdEncoding::Scalar(v) => v.to_string(),
        IdEncoding::Unresolvable => String::new(),
    }
}

/// The date encodings the store emits, in resolution order.
#[derive(Debug)]
enum DateEncoding<'a> {
    /// `{ "$numberLong": "1704067200000" }` — epoch millis serialized as
    /// a string to avoid precision loss in transport.
    WrappedLong(&'a str),
    /// A bare number of epoch milliseconds.
    Epoch(f64),
    /// `{ "$date": ... }`; the payload is itself re-resolved.
    WrappedDate(&'a Value),
    /// A date string, ISO-8601 or one of the store's looser forms.
    Stringly(&'a str),
    Unsupported,
}

fn classify_date(value: &Value) -> DateEncoding<'_> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(digits)) = map.get("$numberLong") {
                DateEncoding::WrappedLong(digits)
            } else if let Some(inner) = map.get("$date") {
                DateEncoding::WrappedDate(inner)
            } else {
                DateEncoding::Unsupported
            }
        }
        Value::Number(n) => match n.as_f64() {
            Some(ms) => DateEncoding::Epoch(ms),
            None => DateEncoding::Unsupported,
        },
        Value::String(s) => DateEncoding::Stringly(s),
        Value::Null | Value::Bool(_) | Value::Array(_) => DateEncoding::Unsupported,
    }
}

/// Resolve any date encoding to a UTC instant, or `None` for the
/// missing-date sentinel. Never panics, never leaks "Invalid Date".
pub fn resolve_date(value: &Value) -> Option<DateTime<Utc>> {
    match classify_date(value) {
        DateEncoding::WrappedLong(digits) => {
            digits.trim().parse::<i64>().ok().and_then(from_epoch_millis)
        }
        DateEncoding::Epoch(ms) => {
            if ms.is_finite() {
                from_epoch_millis(ms as i64)
            } else {
                None
            }
        }
        DateEncoding::WrappedDate(inner) => resolve_date(inner),
        DateEncoding::Stringly(s) => parse_date_string(s),
        DateEncoding::Unsupported => None,
    }
}

fn from_epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    None
}

/// Truncate to the summary budget, marking the cut with an ellipsis.
pub fn truncate_text(s: &str) -> String {
    if s.chars().count() <= SUMMARY_BUDGET {
        return s.to_string();
    }
    let mut out: String = s.chars().take(SUMMARY_BUDGET - 1).collect();
    out.push('…');
    out
}

/// Short human display string for a free-form blob.
///
/// Arrays render as an item count; objects as a recognized sub-shape
/// (a `name` field) or a truncated JSON preview; JSON-encoded strings
/// are parsed and summarized as what they encode; long plain strings
/// truncate at the same budget.
pub fn summarize_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
                    return summarize_value(&parsed);
                }
            }
            truncate_text(s)
        }
        Value::Array(items) => {
            if items.len() == 1 {
                "1 item".to_string()
            } else {
                format!("{} items", items.len())
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(name)) = map.get("name") {
                truncate_text(name)
            } else {
                truncate_text(&serde_json::to_string(map).unwrap_or_default())
            }
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// First present, non-null, non-empty candidate among `sources`.
fn pick<'a>(raw: &'a RawDocument, sources: &[&str]) -> Option<&'a Value> {
    for key in sources {
        match raw.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.is_empty() => continue,
            Some(v) => return Some(v),
        }
    }
    None
}

fn convert(value: &Value, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Id => FieldValue::Id(resolve_id(value)),
        FieldKind::Date => match resolve_date(value) {
            Some(dt) => FieldValue::Date(dt),
            None => FieldValue::Missing,
        },
        FieldKind::Number => match as_number(value) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Missing,
        },
        FieldKind::Bool => match value {
            Value::Bool(b) => FieldValue::Bool(*b),
            _ => FieldValue::Missing,
        },
        FieldKind::Count => match value {
            Value::Array(items) => FieldValue::Number(items.len() as f64),
            other => match as_number(other) {
                Some(n) => FieldValue::Number(n),
                None => FieldValue::Missing,
            },
        },
        FieldKind::Text => match value {
            Value::String(s) => FieldValue::Text(truncate_text(s)),
            Value::Number(n) => FieldValue::Text(n.to_string()),
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            other => text_or_missing(summarize_value(other)),
        },
        FieldKind::Summary => text_or_missing(summarize_value(value)),
    }
}

fn text_or_missing(s: String) -> FieldValue {
    if s.is_empty() {
        FieldValue::Missing
    } else {
        FieldValue::Text(s)
    }
}

/// Canonicalize one raw document against a collection schema.
///
/// Pure and total: every schema field is present in the result, with the
/// missing sentinel standing in where the document had nothing usable.
pub fn normalize(raw: &RawDocument, schema: &CollectionSchema) -> NormalizedRecord {
    let mut rec = NormalizedRecord::new();
    for rule in schema.fields {
        let value = match pick(raw, rule.sources) {
            Some(v) => convert(v, rule.kind),
            None => FieldValue::Missing,
        };
        rec.set(rule.name, value);
    }
    if let Some(key) = schema.actions_field {
        flatten_actions(raw.get(key), &mut rec);
    }
    rec
}

/// Flatten a nested per-action counter map into flat fields the
/// projector can reference directly: for each action type `X`,
/// `x_count`, `x_last_at`, and `x_latest_note` (the last note in
/// insertion order), plus an `activity` roll-up string.
fn flatten_actions(actions: Option<&Value>, rec: &mut NormalizedRecord) {
    let map = match actions {
        Some(Value::Object(m)) => m,
        _ => {
            rec.set("activity", FieldValue::Text("No activity yet".to_string()));
            return;
        }
    };

    let mut parts = Vec::new();
    for (action, counter) in map {
        let key = to_snake(action);

        let count = counter
            .get("count")
            .and_then(as_number)
            .unwrap_or(0.0)
            .max(0.0);
        rec.set(format!("{}_count", key), FieldValue::Number(count));

        let last_at = counter
            .get("lastActivityTime")
            .and_then(resolve_date)
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Missing);
        rec.set(format!("{}_last_at", key), last_at);

        let latest_note = counter
            .get("notes")
            .and_then(Value::as_array)
            .and_then(|notes| notes.last())
            .and_then(Value::as_str)
            .map(|s| FieldValue::Text(truncate_text(s)))
            .unwrap_or(FieldValue::Missing);
        rec.set(format!("{}_latest_note", key), latest_note);

        if count > 0.0 {
            parts.push(format!("{}: {}", action, count as u64));
        }
    }

    let summary = if parts.is_empty() {
        "No activity yet".to_string()
    } else {
        parts.join(" • ")
    };
    rec.set("activity", FieldValue::Text(summary));
}

fn to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Best-effort canonicalization for collections with no bespoke schema
/// (the explorer path). Field typing falls back to value shape plus the
/// shared column-name heuristics.
pub fn normalize_dynamic(raw: &RawDocument) -> NormalizedRecord {
    let mut rec = NormalizedRecord::new();
    for (key, value) in raw {
        let fv = match value {
            Value::Null => FieldValue::Missing,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(_) if schema::is_date_name(key) => match resolve_date(value) {
                Some(dt) => FieldValue::Date(dt),
                None => FieldValue::Missing,
            },
            Value::Number(n) => match n.as_f64() {
                Some(x) => FieldValue::Number(x),
                None => FieldValue::Missing,
            },
            Value::String(s) => {
                if schema::is_identifier_name(key) {
                    FieldValue::Id(s.clone())
                } else if schema::is_date_name(key) {
                    match resolve_date(value) {
                        Some(dt) => FieldValue::Date(dt),
                        None => FieldValue::Text(truncate_text(s)),
                    }
                } else {
                    FieldValue::Text(truncate_text(s))
                }
            }
            Value::Array(_) => text_or_missing(summarize_value(value)),
            Value::Object(_) => {
                if schema::is_identifier_name(key) {
                    FieldValue::Id(resolve_id(value))
                } else if schema::is_date_name(key) {
                    match resolve_date(value) {
                        Some(dt) => FieldValue::Date(dt),
                        None => text_or_missing(summarize_value(value)),
                    }
                } else {
                    text_or_missing(summarize_value(value))
                }
            }
        };
        rec.set(key.clone(), fv);
    }
    rec
}
