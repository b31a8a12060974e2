//! End-to-end pipeline runs against the bundled fixture backend.
//!
//! The fixture mounts its routes under `/api` like the production
//! backend, so every view here also exercises the Fetcher's prefix
//! fallback on the way through.

use gymdash::api::{DashApi, ExerciseFilter, LevelFilter};
use gymdash::error::DashError;
use gymdash::model::StatValue;
use gymdash::transport::fixture::FixtureTransport;

fn api() -> DashApi<FixtureTransport> {
    DashApi::new(FixtureTransport::new())
}

fn column(result: &gymdash::api::ViewResult, label: &str) -> usize {
    result
        .table
        .columns
        .iter()
        .position(|c| c.label == label)
        .unwrap_or_else(|| panic!("missing column {:?}", label))
}

#[tokio::test]
async fn dashboard_cards_reflect_collection_counts() {
    let result = api().dashboard().await.unwrap();
    assert_eq!(result.cards.len(), 6);

    let card = |title: &str| {
        result
            .cards
            .iter()
            .find(|c| c.title == title)
            .unwrap_or_else(|| panic!("missing card {:?}", title))
    };
    assert_eq!(card("Total Activities").value, "6");
    assert_eq!(card("Daily Steps Records").value, "7");
    assert_eq!(card("Total Exercises").value, "8");
    assert_eq!(card("Active Challenges").value, "4");
    assert_eq!(card("Open Carts").value, "3");
    assert_eq!(card("Conversations").value, "5");
}

#[tokio::test]
async fn activity_view_joins_users_across_encodings() {
    let result = api().activity(1, 100).await.unwrap();
    assert_eq!(result.total_count, 6);

    let user = column(&result, "User");
    let names: Vec<&str> = result
        .table
        .rows
        .iter()
        .map(|row| row[user].as_str())
        .collect();
    // newest activity first; ids arrive plain, wrapped, and nested and
    // all resolve against the user lookup
    assert_eq!(names[0], "John Doe");
    assert_eq!(names[1], "Sarah Smith");
    assert_eq!(names[2], "mikej");
    // a user document with only an email falls back to it
    assert!(names.contains(&"david@mygym.example"));
    // an id that matches no user resolves to the fallback
    assert!(names.contains(&"Unknown"));
}

#[tokio::test]
async fn activity_summary_sums_logins() {
    let result = api().activity(1, 100).await.unwrap();
    assert_eq!(
        result.summary.get("Total logins"),
        Some(StatValue::Sum(23.0))
    );
    assert_eq!(result.summary.get("Unique users"), Some(StatValue::Count(6)));
}

#[tokio::test]
async fn activity_rollup_renders_per_action_counts() {
    let result = api().activity(1, 100).await.unwrap();
    let activity = column(&result, "Activity");
    assert_eq!(result.table.rows[0][activity], "Login: 12 • WorkoutPlan: 3");
    // a record whose actions map is empty still renders
    assert!(result
        .table
        .rows
        .iter()
        .any(|row| row[activity] == "No activity yet"));
}

#[tokio::test]
async fn steps_view_is_a_leaderboard() {
    let result = api().steps(1, 50).await.unwrap();
    let steps = column(&result, "Steps");
    let values: Vec<&str> = result
        .table
        .rows
        .iter()
        .map(|row| row[steps].as_str())
        .collect();
    assert_eq!(
        values,
        vec!["12,450", "11,230", "10,890", "9,870", "9,120", "8,430", "7,980"]
    );
    assert_eq!(
        result.summary.get("Total steps"),
        Some(StatValue::Sum(69970.0))
    );
    assert_eq!(result.summary.get("Best day"), Some(StatValue::Sum(12450.0)));
    assert_eq!(result.summary.get("Users"), Some(StatValue::Count(6)));
}

#[tokio::test]
async fn challenges_view_buckets_statuses() {
    let result = api().challenges(1, 50).await.unwrap();
    // the entirely-empty participation record is hidden
    assert_eq!(result.summary.get("Shown"), Some(StatValue::Count(5)));
    assert_eq!(result.summary.get("Completed"), Some(StatValue::Count(2)));
    assert_eq!(result.summary.get("Pending"), Some(StatValue::Count(1)));
    assert_eq!(result.summary.get("Cancelled"), Some(StatValue::Count(1)));
    assert_eq!(result.summary.get("In-progress"), Some(StatValue::Count(1)));
    assert_eq!(
        result.summary.get("Unique challenges"),
        Some(StatValue::Count(3))
    );
}

#[tokio::test]
async fn exercises_view_filters_by_level() {
    let all = api()
        .exercises(1, 100, &ExerciseFilter::default())
        .await
        .unwrap();
    assert_eq!(all.summary.get("With details"), Some(StatValue::Count(7)));
    assert_eq!(all.summary.get("Beginner"), Some(StatValue::Count(2)));
    assert_eq!(all.summary.get("Other"), Some(StatValue::Count(2)));

    let beginners = api()
        .exercises(
            1,
            100,
            &ExerciseFilter {
                search: None,
                level: LevelFilter::Beginner,
            },
        )
        .await
        .unwrap();
    let name = column(&beginners, "Exercise name");
    let names: Vec<&str> = beginners
        .table
        .rows
        .iter()
        .map(|row| row[name].as_str())
        .collect();
    assert_eq!(names, vec!["Squats", "Running"]);
}

#[tokio::test]
async fn conversations_view_counts_participants() {
    let result = api().conversations(1, 50).await.unwrap();
    assert_eq!(result.total_count, 5);
    assert_eq!(
        result.summary.get("Total participants"),
        Some(StatValue::Sum(13.0))
    );
    let last = column(&result, "Last Message");
    assert_eq!(result.table.rows[0][last], "Challenge starts tomorrow!");
}

#[tokio::test]
async fn explorer_applies_auto_columns_and_currency() {
    let result = api().collection("carts", 1, 20).await.unwrap();
    let fields: Vec<&str> = result
        .table
        .columns
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    // identifiers are excluded; order is first appearance
    assert_eq!(fields, vec!["createdAt", "items", "totalPrice"]);

    let price = column(&result, "TotalPrice");
    let items = column(&result, "Items");
    assert_eq!(result.table.rows[0][price], "2,499");
    assert_eq!(result.table.rows[0][items], "2 items");
    // zero-priced carts render as Free under the currency heuristic
    assert_eq!(result.table.rows[1][price], "Free");
}

#[tokio::test]
async fn explorer_pagination_pages_through() {
    let page1 = api().collection("dailysteps", 1, 3).await.unwrap();
    let page2 = api().collection("dailysteps", 2, 3).await.unwrap();
    assert_eq!(page1.total_count, 7);
    assert_eq!(page1.table.rows.len(), 3);
    assert_eq!(page2.table.rows.len(), 3);
    assert_ne!(page1.table.rows[0], page2.table.rows[0]);
}

#[tokio::test]
async fn meta_lists_the_sample_collections() {
    let result = api().meta().await.unwrap();
    assert_eq!(result.summary.get("Collections"), Some(StatValue::Count(8)));
    let names: Vec<&str> = result
        .table
        .rows
        .iter()
        .map(|row| row[0].as_str())
        .collect();
    assert!(names.contains(&"activities"));
    assert!(names.contains(&"users"));
}

#[tokio::test]
async fn disallowed_collections_fail_before_the_backend() {
    let err = api().collection("secrets", 1, 20).await.unwrap_err();
    assert!(matches!(err, DashError::CollectionNotAllowed(_)));
}
