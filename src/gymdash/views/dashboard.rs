//! The KPI-card dashboard.

use super::{StatCard, ViewResult};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{StatValue, SummaryStats};
use crate::project::group_digits;
use crate::transport::Transport;

pub async fn run<T: Transport>(fetcher: &Fetcher<T>) -> Result<ViewResult> {
    let stats = fetcher.dashboard().await?;

    let card = |title: &str, value: u64, description: &str| StatCard {
        title: title.to_string(),
        value: group_digits(value as i64),
        description: description.to_string(),
    };
    let cards = vec![
        card(
            "Total Activities",
            stats.total_activities,
            "Recent actions taken by users.",
        ),
        card(
            "Daily Steps Records",
            stats.total_daily_steps_records,
            "Entries in the Daily Steps log.",
        ),
        card(
            "Active Challenges",
            stats.active_challenges,
            "Currently running fitness challenges.",
        ),
        card(
            "Total Exercises",
            stats.total_exercises,
            "Exercises available in the library.",
        ),
        card("Open Carts", stats.open_carts, "Carts with pending checkouts."),
        card(
            "Conversations",
            stats.total_conversations,
            "Active user chat conversations.",
        ),
    ];

    // relative-size chart data, one bar per module
    let mut summary = SummaryStats::new();
    summary.push("Activities", StatValue::Count(stats.total_activities));
    summary.push("Steps", StatValue::Count(stats.total_daily_steps_records));
    summary.push("Challenges", StatValue::Count(stats.active_challenges));
    summary.push("Exercises", StatValue::Count(stats.total_exercises));
    summary.push("Carts", StatValue::Count(stats.open_carts));
    summary.push("Conversations", StatValue::Count(stats.total_conversations));

    Ok(ViewResult::new("Dashboard Overview")
        .with_cards(cards)
        .with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::MemoryTransport;
    use serde_json::json;

    #[tokio::test]
    async fn six_cards_with_grouped_values() {
        let transport = MemoryTransport::new().with_route(
            "/dashboard",
            json!({
                "totalActivities": 1248,
                "totalDailyStepsRecords": 8542,
                "totalExercises": 156,
                "activeChallenges": 12,
                "openCarts": 23,
                "totalConversations": 47
            }),
        );
        let fetcher = Fetcher::new(transport);
        let result = run(&fetcher).await.unwrap();

        assert_eq!(result.cards.len(), 6);
        assert_eq!(result.cards[0].title, "Total Activities");
        assert_eq!(result.cards[0].value, "1,248");
        assert_eq!(result.summary.get("Steps"), Some(StatValue::Count(8542)));
    }

    #[tokio::test]
    async fn missing_counters_default_to_zero() {
        let transport =
            MemoryTransport::new().with_route("/dashboard", json!({ "totalActivities": 3 }));
        let fetcher = Fetcher::new(transport);
        let result = run(&fetcher).await.unwrap();
        assert_eq!(result.cards[0].value, "3");
        assert_eq!(result.cards[4].value, "0");
    }
}
