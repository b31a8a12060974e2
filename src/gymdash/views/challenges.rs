//! Challenge participation: who is in which challenge and how far along.

use super::ViewResult;
use crate::aggregate::{aggregate, progress_text, resolve_status, StatSpec};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{FieldValue, NormalizedRecord, StatValue, SummaryStats};
use crate::normalize::normalize;
use crate::project::project;
use crate::schema;
use crate::transport::Transport;

pub async fn run<T: Transport>(
    fetcher: &Fetcher<T>,
    page: u32,
    page_size: u32,
) -> Result<ViewResult> {
    let works = fetcher.collection("challengesworks", page, page_size).await?;

    let mut records: Vec<NormalizedRecord> = Vec::with_capacity(works.documents.len());
    for doc in &works.documents {
        // the store holds some entirely empty participation records
        if doc.is_empty() {
            continue;
        }
        let mut rec = normalize(doc, &schema::CHALLENGE_WORKS);

        // challenge display falls back to the raw id when unnamed
        let challenge = if rec.has("challenge_name") {
            rec.get("challenge_name").clone()
        } else {
            rec.get("challenge_id").clone()
        };
        rec.set("challenge", challenge);
        rec.set(
            "status_label",
            FieldValue::Text(resolve_status(&rec).to_string()),
        );
        rec.set("progress_text", FieldValue::Text(progress_text(&rec)));
        records.push(rec);
    }

    let table = project(&records, &schema::challenge_columns());

    let mut summary = SummaryStats::new();
    summary.push("Total records", StatValue::Count(works.total_count));
    summary.push("Shown", StatValue::Count(records.len() as u64));
    let reduced = aggregate(
        &records,
        &[
            StatSpec::distinct("Unique challenges", "challenge_id"),
            StatSpec::StatusCounts,
        ],
    );
    for (name, value) in reduced.iter() {
        summary.push(name, value);
    }

    Ok(ViewResult::new("Challenges")
        .with_table(table)
        .with_summary(summary)
        .with_total(works.total_count))
}
