//! Page reductions and the status/progress derivation rules.
//!
//! [`aggregate`] is one left-to-right pass over the page, linear in the
//! number of records, and never mutates its input. There is no
//! incremental maintenance: every call is a fresh full-page reduction.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

use crate::model::{FieldValue, NormalizedRecord, StatValue, SummaryStats};

/// A named statistic to reduce over the page.
#[derive(Debug, Clone)]
pub enum StatSpec {
    /// Number of records on the page.
    PageCount { name: String },
    /// Sum of a numeric field across records where it is present.
    Sum { name: String, field: String },
    /// Maximum of a numeric field, zero when never present.
    Max { name: String, field: String },
    /// Cardinality of the distinct non-missing values of a field.
    Distinct { name: String, field: String },
    /// The four status buckets of [`resolve_status`], emitted as one
    /// entry per label.
    StatusCounts,
}

impl StatSpec {
    pub fn page_count(name: &str) -> Self {
        StatSpec::PageCount {
            name: name.to_string(),
        }
    }

    pub fn sum(name: &str, field: &str) -> Self {
        StatSpec::Sum {
            name: name.to_string(),
            field: field.to_string(),
        }
    }

    pub fn max(name: &str, field: &str) -> Self {
        StatSpec::Max {
            name: name.to_string(),
            field: field.to_string(),
        }
    }

    pub fn distinct(name: &str, field: &str) -> Self {
        StatSpec::Distinct {
            name: name.to_string(),
            field: field.to_string(),
        }
    }
}

enum Acc {
    Count(u64),
    Sum(f64),
    Max(f64),
    Distinct(HashSet<String>),
    Status([u64; 4]),
}

/// Reduce one page of records into [`SummaryStats`], in declaration order.
/// An empty page yields all-zero counts and empty sets, never an error.
pub fn aggregate(records: &[NormalizedRecord], specs: &[StatSpec]) -> SummaryStats {
    let mut accs: Vec<Acc> = specs
        .iter()
        .map(|spec| match spec {
            StatSpec::PageCount { .. } => Acc::Count(0),
            StatSpec::Sum { .. } => Acc::Sum(0.0),
            StatSpec::Max { .. } => Acc::Max(0.0),
            StatSpec::Distinct { .. } => Acc::Distinct(HashSet::new()),
            StatSpec::StatusCounts => Acc::Status([0; 4]),
        })
        .collect();

    for rec in records {
        for (spec, acc) in specs.iter().zip(accs.iter_mut()) {
            match (spec, acc) {
                (StatSpec::PageCount { .. }, Acc::Count(n)) => *n += 1,
                (StatSpec::Sum { field, .. }, Acc::Sum(total)) => {
                    if let Some(x) = rec.get(field).as_number() {
                        *total += x;
                    }
                }
                (StatSpec::Max { field, .. }, Acc::Max(best)) => {
                    if let Some(x) = rec.get(field).as_number() {
                        if x > *best {
                            *best = x;
                        }
                    }
                }
                (StatSpec::Distinct { field, .. }, Acc::Distinct(seen)) => {
                    if let Some(key) = distinct_key(rec.get(field)) {
                        seen.insert(key);
                    }
                }
                (StatSpec::StatusCounts, Acc::Status(buckets)) => {
                    buckets[resolve_status(rec) as usize] += 1;
                }
                _ => {}
            }
        }
    }

    let mut stats = SummaryStats::new();
    for (spec, acc) in specs.iter().zip(accs.into_iter()) {
        match (spec, acc) {
            (StatSpec::PageCount { name }, Acc::Count(n)) => {
                stats.push(name.clone(), StatValue::Count(n));
            }
            (StatSpec::Sum { name, .. }, Acc::Sum(total)) => {
                stats.push(name.clone(), StatValue::Sum(total));
            }
            (StatSpec::Max { name, .. }, Acc::Max(best)) => {
                stats.push(name.clone(), StatValue::Sum(best));
            }
            (StatSpec::Distinct { name, .. }, Acc::Distinct(seen)) => {
                stats.push(name.clone(), StatValue::Count(seen.len() as u64));
            }
            (StatSpec::StatusCounts, Acc::Status(buckets)) => {
                for status in [
                    Status::Completed,
                    Status::InProgress,
                    Status::Pending,
                    Status::Cancelled,
                ] {
                    stats.push(
                        status.to_string(),
                        StatValue::Count(buckets[status as usize]),
                    );
                }
            }
            _ => {}
        }
    }
    stats
}

fn distinct_key(value: &FieldValue) -> Option<String> {
    if value.is_missing() {
        return None;
    }
    match value {
        FieldValue::Id(s) | FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Number(n) => Some(n.to_string()),
        FieldValue::Bool(b) => Some(b.to_string()),
        FieldValue::Date(d) => Some(d.to_rfc3339()),
        FieldValue::Missing => None,
    }
}

/// The challenge-participation status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Completed = 0,
    InProgress = 1,
    Pending = 2,
    Cancelled = 3,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Completed => "Completed",
            Status::InProgress => "In-progress",
            Status::Pending => "Pending",
            Status::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

static COMPLETED_SYNONYMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["completed", "finished", "done"]));
static PENDING_SYNONYMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["pending", "not_started"]));
static CANCELLED_SYNONYMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["cancelled", "canceled", "failed"]));

/// Resolve a record's completion state to exactly one label.
///
/// Precedence: a true completion flag OR a completed-synonym status text
/// wins; then cancelled synonyms; then pending synonyms; anything else
/// (including no signal at all) is In-progress.
pub fn resolve_status(rec: &NormalizedRecord) -> Status {
    let flag = rec.get("completed").as_bool().unwrap_or(false);
    let text = rec
        .get("status")
        .as_str()
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if flag || COMPLETED_SYNONYMS.contains(text.as_str()) {
        Status::Completed
    } else if CANCELLED_SYNONYMS.contains(text.as_str()) {
        Status::Cancelled
    } else if PENDING_SYNONYMS.contains(text.as_str()) {
        Status::Pending
    } else {
        Status::InProgress
    }
}

/// Human progress text, as a strict fallback chain: explicit percentage,
/// then done/goal, then done alone, then the sentinel.
pub fn progress_text(rec: &NormalizedRecord) -> String {
    if let Some(pct) = rec.get("progress").as_number() {
        return format!("{}%", trim_num(pct));
    }
    let done = rec.get("steps_done").as_number();
    let goal = rec.get("steps_goal").as_number();
    match (done, goal) {
        (Some(d), Some(g)) => format!("{}/{} steps", trim_num(d), trim_num(g)),
        (Some(d), None) => format!("{} steps", trim_num(d)),
        _ => "-".to_string(),
    }
}

fn trim_num(n: f64) -> String {
    if n.fract() == 0.0 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[(&str, FieldValue)]) -> NormalizedRecord {
        let mut r = NormalizedRecord::new();
        for (name, value) in fields {
            r.set(*name, value.clone());
        }
        r
    }

    fn challenge(flag: Option<bool>, status: Option<&str>) -> NormalizedRecord {
        let mut fields = Vec::new();
        if let Some(b) = flag {
            fields.push(("completed", FieldValue::Bool(b)));
        }
        if let Some(s) = status {
            fields.push(("status", FieldValue::Text(s.to_string())));
        }
        rec(&fields)
    }

    #[test]
    fn aggregate_empty_page_is_all_zeros() {
        let specs = [
            StatSpec::page_count("Records"),
            StatSpec::sum("Total steps", "steps"),
            StatSpec::max("Best day", "steps"),
            StatSpec::distinct("Users", "user_id"),
            StatSpec::StatusCounts,
        ];
        let stats = aggregate(&[], &specs);
        assert_eq!(stats.get("Records"), Some(StatValue::Count(0)));
        assert_eq!(stats.get("Total steps"), Some(StatValue::Sum(0.0)));
        assert_eq!(stats.get("Best day"), Some(StatValue::Sum(0.0)));
        assert_eq!(stats.get("Users"), Some(StatValue::Count(0)));
        assert_eq!(stats.get("Completed"), Some(StatValue::Count(0)));
        assert_eq!(stats.get("In-progress"), Some(StatValue::Count(0)));
    }

    #[test]
    fn aggregate_sums_and_distincts() {
        let records = vec![
            rec(&[
                ("user_id", FieldValue::Id("u1".into())),
                ("steps", FieldValue::Number(12450.0)),
            ]),
            rec(&[
                ("user_id", FieldValue::Id("u2".into())),
                ("steps", FieldValue::Number(9870.0)),
            ]),
            rec(&[
                ("user_id", FieldValue::Id("u1".into())),
                ("steps", FieldValue::Number(11230.0)),
            ]),
            // missing fields contribute nothing
            rec(&[]),
        ];
        let specs = [
            StatSpec::page_count("Records"),
            StatSpec::sum("Total steps", "steps"),
            StatSpec::max("Best day", "steps"),
            StatSpec::distinct("Users", "user_id"),
        ];
        let stats = aggregate(&records, &specs);
        assert_eq!(stats.get("Records"), Some(StatValue::Count(4)));
        assert_eq!(stats.get("Total steps"), Some(StatValue::Sum(33550.0)));
        assert_eq!(stats.get("Best day"), Some(StatValue::Sum(12450.0)));
        assert_eq!(stats.get("Users"), Some(StatValue::Count(2)));
    }

    #[test]
    fn aggregate_does_not_mutate_input() {
        let records = vec![rec(&[("steps", FieldValue::Number(5.0))])];
        let before = records.clone();
        let _ = aggregate(&records, &[StatSpec::sum("Total", "steps")]);
        assert_eq!(records, before);
    }

    #[test]
    fn status_truth_table() {
        use Status::*;
        let cases: &[(Option<bool>, Option<&str>, Status)] = &[
            // flag wins outright when true
            (Some(true), None, Completed),
            (Some(true), Some("cancelled"), Completed),
            (Some(true), Some("nonsense"), Completed),
            // completed synonyms win even with a false flag
            (Some(false), Some("Finished"), Completed),
            (None, Some("done"), Completed),
            (None, Some("COMPLETED"), Completed),
            // cancelled synonyms
            (Some(false), Some("cancelled"), Cancelled),
            (None, Some("Canceled"), Cancelled),
            (None, Some("failed"), Cancelled),
            // pending synonyms
            (None, Some("pending"), Pending),
            (Some(false), Some("not_started"), Pending),
            // everything else defaults to in-progress
            (None, None, InProgress),
            (Some(false), None, InProgress),
            (None, Some("running"), InProgress),
            (Some(false), Some(""), InProgress),
        ];
        for (flag, status, expected) in cases {
            let got = resolve_status(&challenge(*flag, *status));
            assert_eq!(got, *expected, "flag={:?} status={:?}", flag, status);
        }
    }

    #[test]
    fn status_counts_bucket_each_record_once() {
        let records = vec![
            challenge(Some(true), None),
            challenge(None, Some("finished")),
            challenge(None, Some("pending")),
            challenge(None, Some("failed")),
            challenge(None, None),
        ];
        let stats = aggregate(&records, &[StatSpec::StatusCounts]);
        assert_eq!(stats.get("Completed"), Some(StatValue::Count(2)));
        assert_eq!(stats.get("Pending"), Some(StatValue::Count(1)));
        assert_eq!(stats.get("Cancelled"), Some(StatValue::Count(1)));
        assert_eq!(stats.get("In-progress"), Some(StatValue::Count(1)));
    }

    #[test]
    fn progress_prefers_percentage() {
        let r = rec(&[
            ("progress", FieldValue::Number(85.0)),
            ("steps_done", FieldValue::Number(100.0)),
            ("steps_goal", FieldValue::Number(200.0)),
        ]);
        assert_eq!(progress_text(&r), "85%");
    }

    #[test]
    fn progress_falls_back_through_the_chain() {
        let done_and_goal = rec(&[
            ("steps_done", FieldValue::Number(120.0)),
            ("steps_goal", FieldValue::Number(300.0)),
        ]);
        assert_eq!(progress_text(&done_and_goal), "120/300 steps");

        let done_only = rec(&[("steps_done", FieldValue::Number(120.0))]);
        assert_eq!(progress_text(&done_only), "120 steps");

        let neither = rec(&[]);
        assert_eq!(progress_text(&neither), "-");

        // a goal without a done-count is not progress
        let goal_only = rec(&[("steps_goal", FieldValue::Number(300.0))]);
        assert_eq!(progress_text(&goal_only), "-");
    }
}
