//! Exercise library with client-side search and level filtering.

use std::str::FromStr;

use super::{ViewMessage, ViewResult};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{NormalizedRecord, StatValue, SummaryStats};
use crate::normalize::normalize;
use crate::project::project;
use crate::schema;
use crate::transport::Transport;

/// Fields that make an exercise record worth displaying; entirely bare
/// placeholder documents are hidden.
const DETAIL_FIELDS: &[&str] = &["name", "level", "muscle_group", "video", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Beginner,
    Intermediate,
    Advanced,
    /// Any level value outside the three known labels, or none at all.
    Other,
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LevelFilter::All),
            "beginner" => Ok(LevelFilter::Beginner),
            "intermediate" => Ok(LevelFilter::Intermediate),
            "advanced" => Ok(LevelFilter::Advanced),
            "other" => Ok(LevelFilter::Other),
            other => Err(format!("unknown level filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    pub search: Option<String>,
    pub level: LevelFilter,
}

// bucket indexes: Beginner, Intermediate, Advanced, Other
const LEVEL_LABELS: [&str; 4] = ["Beginner", "Intermediate", "Advanced", "Other"];

fn level_bucket(level: &str) -> usize {
    match level.trim().to_ascii_lowercase().as_str() {
        "beginner" => 0,
        "intermediate" => 1,
        "advanced" => 2,
        _ => 3,
    }
}

fn matches_filter(filter: &ExerciseFilter, rec: &NormalizedRecord) -> bool {
    if let Some(term) = &filter.search {
        let term = term.trim().to_ascii_lowercase();
        if !term.is_empty() {
            let name = rec.get("name").as_str().unwrap_or("").to_ascii_lowercase();
            if !name.contains(&term) {
                return false;
            }
        }
    }
    let bucket = level_bucket(rec.get("level").as_str().unwrap_or(""));
    match filter.level {
        LevelFilter::All => true,
        LevelFilter::Beginner => bucket == 0,
        LevelFilter::Intermediate => bucket == 1,
        LevelFilter::Advanced => bucket == 2,
        LevelFilter::Other => bucket == 3,
    }
}

pub async fn run<T: Transport>(
    fetcher: &Fetcher<T>,
    page: u32,
    page_size: u32,
    filter: &ExerciseFilter,
) -> Result<ViewResult> {
    let exercises = fetcher.collection("exercises", page, page_size).await?;

    let detailed: Vec<NormalizedRecord> = exercises
        .documents
        .iter()
        .map(|doc| normalize(doc, &schema::EXERCISES))
        .filter(|rec| DETAIL_FIELDS.iter().any(|field| rec.has(field)))
        .collect();

    // level counts describe the whole detailed page, not the filtered slice
    let mut buckets = [0u64; 4];
    for rec in &detailed {
        buckets[level_bucket(rec.get("level").as_str().unwrap_or(""))] += 1;
    }

    let shown_of = detailed.len();
    let filtered: Vec<NormalizedRecord> = detailed
        .into_iter()
        .filter(|rec| matches_filter(filter, rec))
        .collect();

    let table = project(&filtered, &schema::exercise_columns());

    let mut summary = SummaryStats::new();
    summary.push("Total exercises", StatValue::Count(exercises.total_count));
    summary.push("With details", StatValue::Count(shown_of as u64));
    summary.push("Matching filters", StatValue::Count(filtered.len() as u64));
    for (label, count) in LEVEL_LABELS.iter().zip(buckets) {
        summary.push(*label, StatValue::Count(count));
    }

    let mut result = ViewResult::new("Exercises")
        .with_table(table)
        .with_summary(summary)
        .with_total(exercises.total_count);
    if filtered.is_empty() && shown_of > 0 {
        result.add_message(ViewMessage::info(
            "No exercises match the current filters.",
        ));
    }
    Ok(result)
}
