//! Daily steps: top steppers across the current page.

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
    let steps = fetcher.collection("dailysteps", page, page_size).await?;

    let mut records: Vec<NormalizedRecord> = steps
        .documents
        .iter()
        .map(|doc| normalize(doc, &schema::DAILY_STEPS))
        .collect();

    for rec in &mut records {
        // one join key per record, whichever identity the document carries
        let key = rec
            .get("user_name")
            .as_str()
            .filter(|s| !s.is_empty())
            .or_else(|| rec.get("user_id").as_str().filter(|s| !s.is_empty()))
            .unwrap_or("")
            .to_string();
        rec.set("user_key", crate::model::FieldValue::Text(key));
    }

    // leaderboard ordering: highest step counts first
    records.sort_by(|a, b| {
        let a_steps = a.get("steps").as_number().unwrap_or(0.0);
        let b_steps = b.get("steps").as_number().unwrap_or(0.0);
        b_steps.total_cmp(&a_steps)
    });

    let table = project(&records, &schema::steps_columns());

    let mut summary = SummaryStats::new();
    summary.push("Total records", StatValue::Count(steps.total_count));
    let reduced = aggregate(
        &records,
        &[
            StatSpec::sum("Total steps", "steps"),
            StatSpec::max("Best day", "steps"),
            StatSpec::distinct("Users", "user_key"),
        ],
    );
    for (name, value) in reduced.iter() {
        summary.push(name, value);
    }

    Ok(ViewResult::new("Daily Steps Overview")
        .with_table(table)
        .with_summary(summary)
        .with_total(steps.total_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::MemoryTransport;
    use serde_json::json;

    const PATH: &str = "/collections/dailysteps?page=1&limit=50";

    fn body() -> serde_json::Value {
        json!({
            "page": 1, "limit": 50, "total": 3,
            "docs": [
                { "_id": "s3", "userName": "Mike Johnson", "date": "2024-01-15", "steps": 10890 },
                { "_id": "s2", "userName": "John Doe", "date": "2024-01-15", "steps": 12450 },
                { "_id": "s1", "user_id": "u5", "date": 1705276800000_i64, "steps": "9120" }
            ]
        })
    }

    #[tokio::test]
    async fn rows_sort_by_step_count_descending() {
        let transport = MemoryTransport::new().with_route(PATH, body());
        let fetcher = Fetcher::new(transport);
        let result = run(&fetcher, 1, 50).await.unwrap();

        let steps_col = result
            .table
            .columns
            .iter()
            .position(|c| c.label == "Steps")
            .unwrap();
        let steps: Vec<&str> = result
            .table
            .rows
            .iter()
            .map(|row| row[steps_col].as_str())
            .collect();
        assert_eq!(steps, vec!["12,450", "10,890", "9,120"]);
    }

    #[tokio::test]
    async fn summary_totals() {
        let transport = MemoryTransport::new().with_route(PATH, body());
        let fetcher = Fetcher::new(transport);
        let result = run(&fetcher, 1, 50).await.unwrap();

        assert_eq!(
            result.summary.get("Total steps"),
            Some(StatValue::Sum(32460.0))
        );
        assert_eq!(result.summary.get("Best day"), Some(StatValue::Sum(12450.0)));
        assert_eq!(result.summary.get("Users"), Some(StatValue::Count(3)));
    }

    #[tokio::test]
    async fn string_encoded_dates_and_epochs_both_render() {
        let transport = MemoryTransport::new().with_route(PATH, body());
        let fetcher = Fetcher::new(transport);
        let result = run(&fetcher, 1, 50).await.unwrap();

        let date_col = result
            .table
            .columns
            .iter()
            .position(|c| c.label == "Date")
            .unwrap();
        for row in &result.table.rows {
            assert_ne!(row[date_col], "-");
        }
    }
}
