//! Generic store exploration: the `/meta` listing, and a best-effort
//! table over any whitelisted collection without a bespoke view.

use super::ViewResult;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{NormalizedRecord, StatValue, SummaryStats};
use crate::normalize::normalize_dynamic;
use crate::project::{auto_columns, group_digits, project, TableView};
use crate::schema::{CellFormat, Column};
use crate::transport::Transport;

/// A page of any whitelisted collection, with auto-detected columns.
///
/// Unlike the bespoke views, the column set here depends on page
/// content: the first few non-identifier fields seen, in order.
pub async fn collection<T: Transport>(
    fetcher: &Fetcher<T>,
    name: &str,
    page: u32,
    page_size: u32,
) -> Result<ViewResult> {
    let data = fetcher.collection(name, page, page_size).await?;

    let records: Vec<NormalizedRecord> =
        data.documents.iter().map(normalize_dynamic).collect();
    let columns = auto_columns(&records);
    let table = project(&records, &columns);

    let mut summary = SummaryStats::new();
    summary.push("Total records", StatValue::Count(data.total_count));
    summary.push("Shown", StatValue::Count(records.len() as u64));

    Ok(ViewResult::new(&format!("Collection: {}", name))
        .with_table(table)
        .with_summary(summary)
        .with_total(data.total_count))
}

/// All store collections with their document counts.
pub async fn meta<T: Transport>(fetcher: &Fetcher<T>) -> Result<ViewResult> {
    let rows = fetcher.meta().await?;

    let table = TableView {
        columns: vec![
            Column::new("name", "Collection", CellFormat::Text),
            Column::new("count", "Documents", CellFormat::Number),
        ],
        rows: rows
            .iter()
            .map(|row| vec![row.name.clone(), group_digits(row.count as i64)])
            .collect(),
    };

    let mut summary = SummaryStats::new();
    summary.push("Collections", StatValue::Count(rows.len() as u64));

    Ok(ViewResult::new("Store collections")
        .with_table(table)
        .with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::MemoryTransport;
    use serde_json::json;

    #[tokio::test]
    async fn auto_columns_come_from_page_content() {
        let body = json!({
            "page": 1, "limit": 20, "total": 2,
            "docs": [
                { "_id": "b2", "title": "Stretching 101", "author": "Lisa", "createdAt": "2024-01-10T08:00:00Z" },
                { "_id": "b1", "title": "Protein basics", "tags": ["nutrition"] }
            ]
        });
        let transport =
            MemoryTransport::new().with_route("/collections/blogs?page=1&limit=20", body);
        let fetcher = Fetcher::new(transport);
        let result = collection(&fetcher, "blogs", 1, 20).await.unwrap();

        let fields: Vec<&str> = result
            .table
            .columns
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        // document keys arrive in the store's canonical (sorted) order;
        // fields seen only in later records append after them
        assert_eq!(fields, vec!["author", "createdAt", "title", "tags"]);
        assert_eq!(result.table.rows[0][1], "10 Jan 2024, 08:00");
        assert_eq!(result.table.rows[1][3], "1 item");
    }

    #[tokio::test]
    async fn disallowed_names_never_reach_the_transport() {
        let fetcher = Fetcher::new(MemoryTransport::new());
        assert!(collection(&fetcher, "secrets", 1, 20).await.is_err());
        assert!(fetcher.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn meta_lists_every_collection() {
        let transport = MemoryTransport::new().with_route(
            "/meta",
            json!([
                { "name": "activities", "count": 1248 },
                { "name": "users", "count": 892 }
            ]),
        );
        let fetcher = Fetcher::new(transport);
        let result = meta(&fetcher).await.unwrap();

        assert_eq!(result.table.rows.len(), 2);
        assert_eq!(result.table.rows[0], vec!["activities", "1,248"]);
        assert_eq!(
            result.summary.get("Collections"),
            Some(StatValue::Count(2))
        );
    }
}
