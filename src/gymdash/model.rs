use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// An unvalidated document exactly as the store returned it. Field
/// presence, type, and encoding are not guaranteed.
pub type RawDocument = serde_json::Map<String, Value>;

/// A canonical scalar produced by the normalizer.
///
/// `Missing` is the sentinel for absent or unparseable data; an empty
/// `Id` or `Text` counts as missing too (the store encodes "no value"
/// both ways).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Id(String),
    Text(String),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Id(s) | FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Textual content of `Id` and `Text` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Id(s) | FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

static MISSING: FieldValue = FieldValue::Missing;

/// The canonicalized, display-ready form of a [`RawDocument`].
///
/// Fields keep insertion order (the auto-column fallback depends on order
/// of first appearance). Lookup of a field that was never set yields
/// [`FieldValue::Missing`], so projector columns can reference any name
/// without a presence check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> &FieldValue {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .unwrap_or(&MISSING)
    }

    /// True when the field exists and is not a missing sentinel.
    pub fn has(&self, name: &str) -> bool {
        !self.get(name).is_missing()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One page of raw documents for a named collection.
///
/// `total_count` is a store-reported estimate and may be stale relative
/// to `documents`. Ordering of `documents` is most-recently-created
/// first; which field that derives from is collection configuration.
#[derive(Debug, Clone)]
pub struct CollectionPage {
    pub name: String,
    pub documents: Vec<RawDocument>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

/// The six approximate counters behind the dashboard KPI cards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    #[serde(rename = "totalActivities")]
    pub total_activities: u64,
    #[serde(rename = "totalDailyStepsRecords")]
    pub total_daily_steps_records: u64,
    #[serde(rename = "totalExercises")]
    pub total_exercises: u64,
    #[serde(rename = "activeChallenges")]
    pub active_challenges: u64,
    #[serde(rename = "openCarts")]
    pub open_carts: u64,
    #[serde(rename = "totalConversations")]
    pub total_conversations: u64,
}

/// One row of the `/meta` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionCount {
    pub name: String,
    pub count: u64,
}

/// A single named summary statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    /// Row counts, bucket counts, distinct-set cardinalities.
    Count(u64),
    /// Sums and maxima over numeric fields.
    Sum(f64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Sum(x) if x.fract() == 0.0 => write!(f, "{}", *x as i64),
            StatValue::Sum(x) => write!(f, "{:.1}", x),
        }
    }
}

/// Summary aggregates over one page of normalized records, in the order
/// the stat specs declared them. Always a fresh full-page reduction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    entries: Vec<(String, StatValue)>,
}

impl SummaryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: StatValue) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<StatValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StatValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
