//! Member conversations.

use super::ViewResult;
use crate::aggregate::{aggregate, StatSpec};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{NormalizedRecord, StatValue, SummaryStats};
use crate::normalize::normalize;
use crate::project::project;
use crate::schema;
use crate::transport::Transport;

pub async fn run<T: Transport>(
    fetcher: &Fetcher<T>,
    page: u32,
    page_size: u32,
) -> Result<ViewResult> {
    let conversations = fetcher.collection("conversations", page, page_size).await?;

    let records: Vec<NormalizedRecord> = conversations
        .documents
        .iter()
        .map(|doc| normalize(doc, &schema::CONVERSATIONS))
        .collect();

    let table = project(&records, &schema::conversation_columns());

    let mut summary = SummaryStats::new();
    summary.push(
        "Total conversations",
        StatValue::Count(conversations.total_count),
    );
    let reduced = aggregate(
        &records,
        &[StatSpec::sum("Total participants", "participants_count")],
    );
    for (name, value) in reduced.iter() {
        summary.push(name, value);
    }

    Ok(ViewResult::new("Conversations")
        .with_table(table)
        .with_summary(summary)
        .with_total(conversations.total_count))
}
