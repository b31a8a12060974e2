//! Per-collection configuration tables.
//!
//! This module is the data the views feed into the shared pipeline: which
//! raw keys each logical field may hide under, how each field is typed,
//! which columns a collection displays, and where its recency ordering
//! comes from. The normalization *rules* live in [`crate::normalize`];
//! nothing here executes logic.

/// How a resolved raw value becomes a [`crate::model::FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Identifier in any supported encoding; resolves to a string id.
    Id,
    /// Date in any supported encoding; resolves to a UTC instant.
    Date,
    Number,
    Bool,
    Text,
    /// A count: accepts a plain number or an array (its length).
    Count,
    /// Free-form blob; resolves to a short human summary string.
    Summary,
}

/// One logical field and the raw keys it may be found under, tried in
/// order. The first present, non-null, non-empty source wins.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub sources: &'static [&'static str],
    pub kind: FieldKind,
}

/// Which raw field a collection's newest-first ordering derives from.
/// The store sorts; this records the contract per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyKey {
    CreationId,
    LastUpdated,
}

#[derive(Debug, Clone)]
pub struct CollectionSchema {
    pub collection: &'static str,
    pub fields: &'static [FieldRule],
    /// Raw key holding a nested per-action counter map to flatten.
    pub actions_field: Option<&'static str>,
    pub recency: RecencyKey,
}

/// Display formatting for one column. `Auto` dispatches on the value and
/// a column-name heuristic; the others force a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Auto,
    Date,
    DateTime,
    Number,
    Currency,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub field: String,
    pub label: String,
    pub format: CellFormat,
}

impl Column {
    pub fn new(field: &str, label: &str, format: CellFormat) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            format,
        }
    }
}

const fn rule(
    name: &'static str,
    sources: &'static [&'static str],
    kind: FieldKind,
) -> FieldRule {
    FieldRule {
        name,
        sources,
        kind,
    }
}

pub static ACTIVITIES: CollectionSchema = CollectionSchema {
    collection: "activities",
    fields: &[
        rule("user_id", &["userId", "user", "created_for"], FieldKind::Id),
        rule("last_updated", &["lastUpdated", "updated_at"], FieldKind::Date),
        rule("created_at", &["created_at", "createdAt"], FieldKind::Date),
    ],
    actions_field: Some("actions"),
    recency: RecencyKey::LastUpdated,
};

/// Lookup-side schema for the activities view's user join.
pub static USERS: CollectionSchema = CollectionSchema {
    collection: "users",
    fields: &[
        rule("id", &["_id"], FieldKind::Id),
        rule("name", &["name"], FieldKind::Text),
        rule("username", &["username"], FieldKind::Text),
        rule("email", &["email"], FieldKind::Text),
    ],
    actions_field: None,
    recency: RecencyKey::CreationId,
};

pub static DAILY_STEPS: CollectionSchema = CollectionSchema {
    collection: "dailysteps",
    fields: &[
        rule("user_name", &["userName", "user_name", "username"], FieldKind::Text),
        rule("user_id", &["userId", "user_id", "user"], FieldKind::Id),
        rule("date", &["date", "day", "created_at", "createdAt"], FieldKind::Date),
        rule("steps", &["steps", "stepCount", "step_count", "count"], FieldKind::Number),
    ],
    actions_field: None,
    recency: RecencyKey::CreationId,
};

pub static CHALLENGE_WORKS: CollectionSchema = CollectionSchema {
    collection: "challengesworks",
    fields: &[
        rule("challenge_name", &["challenge_name", "challengeName", "name"], FieldKind::Text),
        rule("challenge_id", &["challenge_id", "challengeId", "challenge"], FieldKind::Id),
        rule(
            "participant",
            &["user_id", "userid", "member_id", "created_for", "assigned_to"],
            FieldKind::Id,
        ),
        rule("completed", &["completed", "isCompleted"], FieldKind::Bool),
        rule("status", &["status", "state", "challengeStatus"], FieldKind::Text),
        rule("progress", &["progress", "progressPercent", "percentage"], FieldKind::Number),
        rule(
            "steps_done",
            &["steps_done", "currentSteps", "completedSteps"],
            FieldKind::Number,
        ),
        rule("steps_goal", &["steps_goal", "goalSteps", "targetSteps"], FieldKind::Number),
        rule("start_at", &["start_at", "startDate", "created_at"], FieldKind::Date),
        rule("last_updated", &["lastUpdated", "updated_at"], FieldKind::Date),
    ],
    actions_field: None,
    recency: RecencyKey::LastUpdated,
};

pub static EXERCISES: CollectionSchema = CollectionSchema {
    collection: "exercises",
    fields: &[
        rule("name", &["name"], FieldKind::Text),
        rule("level", &["levels", "level"], FieldKind::Text),
        rule(
            "muscle_group",
            &["sub_categories_Name", "subCategory", "subcategory"],
            FieldKind::Text,
        ),
        rule("video", &["video"], FieldKind::Text),
        rule("description", &["description"], FieldKind::Summary),
    ],
    actions_field: None,
    recency: RecencyKey::CreationId,
};

pub static CONVERSATIONS: CollectionSchema = CollectionSchema {
    collection: "conversations",
    fields: &[
        rule("conversation_id", &["conversationId", "_id"], FieldKind::Id),
        rule("participants", &["participants"], FieldKind::Summary),
        rule(
            "participants_count",
            &["participantsCount", "participants"],
            FieldKind::Count,
        ),
        rule("last_message", &["lastMessage", "last_message"], FieldKind::Summary),
        rule("last_updated", &["lastUpdated", "updated_at"], FieldKind::Date),
    ],
    actions_field: None,
    recency: RecencyKey::CreationId,
};

/// Column-name heuristics shared by the auto-column fallback and the
/// `Auto` cell-format dispatch.
pub fn is_identifier_name(name: &str) -> bool {
    name == "_id" || name == "id" || name.ends_with("_id") || name.ends_with("Id")
}

pub fn is_date_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("date")
        || lower.ends_with("_at")
        || name.ends_with("At")
        || lower.contains("updated")
        || lower.contains("time")
}

pub fn is_currency_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("price") || lower.contains("amount") || lower == "cost" || lower == "fee"
}

pub fn schema_for(collection: &str) -> Option<&'static CollectionSchema> {
    match collection {
        "activities" => Some(&ACTIVITIES),
        "users" => Some(&USERS),
        "dailysteps" => Some(&DAILY_STEPS),
        "challengesworks" => Some(&CHALLENGE_WORKS),
        "exercises" => Some(&EXERCISES),
        "conversations" => Some(&CONVERSATIONS),
        _ => None,
    }
}

pub fn activity_columns() -> Vec<Column> {
    vec![
        Column::new("user_name", "User", CellFormat::Text),
        Column::new("user_id", "User ID", CellFormat::Text),
        Column::new("activity", "Activity", CellFormat::Text),
        Column::new("last_updated", "Last Updated", CellFormat::DateTime),
        Column::new("created_at", "Created At", CellFormat::DateTime),
    ]
}

pub fn steps_columns() -> Vec<Column> {
    vec![
        Column::new("user_name", "User", CellFormat::Text),
        Column::new("user_id", "User ID", CellFormat::Text),
        Column::new("date", "Date", CellFormat::Date),
        Column::new("steps", "Steps", CellFormat::Number),
    ]
}

pub fn challenge_columns() -> Vec<Column> {
    vec![
        Column::new("challenge", "Challenge", CellFormat::Text),
        Column::new("participant", "Participant", CellFormat::Text),
        Column::new("status_label", "Status", CellFormat::Text),
        Column::new("progress_text", "Progress", CellFormat::Text),
        Column::new("start_at", "Start", CellFormat::Date),
        Column::new("last_updated", "Last updated", CellFormat::DateTime),
    ]
}

pub fn exercise_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Exercise name", CellFormat::Text),
        Column::new("level", "Level", CellFormat::Text),
        Column::new("muscle_group", "Muscle group", CellFormat::Text),
        Column::new("video", "Video", CellFormat::Text),
        Column::new("description", "Description", CellFormat::Text),
    ]
}

pub fn conversation_columns() -> Vec<Column> {
    vec![
        Column::new("conversation_id", "ID", CellFormat::Text),
        Column::new("participants", "Participants", CellFormat::Text),
        Column::new("participants_count", "Count", CellFormat::Number),
        Column::new("last_message", "Last Message", CellFormat::Text),
        Column::new("last_updated", "Last Updated", CellFormat::DateTime),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bespoke_collections_have_schemas() {
        for name in [
            "activities",
            "users",
            "dailysteps",
            "challengesworks",
            "exercises",
            "conversations",
        ] {
            let schema = schema_for(name).expect("schema");
            assert_eq!(schema.collection, name);
            assert!(!schema.fields.is_empty());
        }
        assert!(schema_for("carts").is_none());
    }

    #[test]
    fn only_activities_flattens_actions() {
        assert_eq!(ACTIVITIES.actions_field, Some("actions"));
        assert!(CHALLENGE_WORKS.actions_field.is_none());
    }
}
