//! Activity overview: recent per-user activity with a user lookup join.

use std::collections::HashMap;

use super::ViewResult;
use crate::aggregate::{aggregate, StatSpec};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{FieldValue, NormalizedRecord, StatValue, SummaryStats};
use crate::normalize::normalize;
use crate::project::project;
use crate::schema;
use crate::transport::Transport;

/// Page size for the lookup side of the join; plenty to resolve names
/// for any single activities page.
const USER_LOOKUP_SIZE: u32 = 500;

pub async fn run<T: Transport>(
    fetcher: &Fetcher<T>,
    page: u32,
    page_size: u32,
) -> Result<ViewResult> {
    // Join barrier: the view renders only once both fetches have
    // settled, and fails as one unit if either does.
    let (activities, users) = tokio::try_join!(
        fetcher.collection("activities", page, page_size),
        fetcher.collection("users", 1, USER_LOOKUP_SIZE),
    )?;

    let users_by_id: HashMap<String, String> = users
        .documents
        .iter()
        .map(|doc| normalize(doc, &schema::USERS))
        .filter_map(|rec| {
            let id = rec.get("id").as_str()?.to_string();
            if id.is_empty() {
                return None;
            }
            Some((id, display_name(&rec)))
        })
        .collect();

    let mut records: Vec<NormalizedRecord> = activities
        .documents
        .iter()
        .map(|doc| normalize(doc, &schema::ACTIVITIES))
        .collect();
    for rec in &mut records {
        let name = rec
            .get("user_id")
            .as_str()
            .and_then(|id| users_by_id.get(id))
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        rec.set("user_name", FieldValue::Text(name));
    }

    let table = project(&records, &schema::activity_columns());

    let mut summary = SummaryStats::new();
    summary.push("Total records", StatValue::Count(activities.total_count));
    let reduced = aggregate(
        &records,
        &[
            StatSpec::distinct("Unique users", "user_id"),
            StatSpec::sum("Total logins", "login_count"),
        ],
    );
    for (name, value) in reduced.iter() {
        summary.push(name, value);
    }

    Ok(ViewResult::new("Activity Overview")
        .with_table(table)
        .with_summary(summary)
        .with_total(activities.total_count))
}

fn display_name(rec: &NormalizedRecord) -> String {
    for field in ["name", "username", "email"] {
        if let Some(s) = rec.get(field).as_str() {
            if !s.is_empty() {
                return s.to_string();
            }
        }
    }
    "Unknown".to_string()
}
