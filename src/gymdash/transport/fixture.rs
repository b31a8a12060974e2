//! A bundled sample backend.
//!
//! Stands in for the real query surface with real behavior: newest-first
//! ordering, skip/limit pagination, the server-side whitelist guard,
//! and the `/api` path prefix the production backend mounts its routes
//! under. The sample documents deliberately mix identifier and date
//! encodings so every normalizer path gets exercised end to end.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::Transport;
use crate::collections;
use crate::error::{DashError, Result};
use crate::normalize::resolve_id;

pub struct FixtureTransport {
    collections: BTreeMap<String, Vec<Value>>,
}

impl Default for FixtureTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureTransport {
    /// A transport pre-loaded with the bundled sample gym.
    pub fn new() -> Self {
        let mut transport = Self::empty();
        for (name, docs) in sample_data() {
            transport.collections.insert(name.to_string(), docs);
        }
        transport
    }

    /// A transport with no data, for building custom fixtures.
    pub fn empty() -> Self {
        Self {
            collections: BTreeMap::new(),
        }
    }

    pub fn with_collection(mut self, name: &str, docs: Vec<Value>) -> Self {
        self.collections.insert(name.to_string(), docs);
        self
    }

    fn dashboard(&self) -> Value {
        let count = |name: &str| {
            self.collections
                .get(name)
                .map(|docs| docs.len())
                .unwrap_or(0)
        };
        json!({
            "totalActivities": count("activities"),
            "totalDailyStepsRecords": count("dailysteps"),
            "totalExercises": count("exercises"),
            "activeChallenges": count("challenges"),
            "openCarts": count("carts"),
            "totalConversations": count("conversations"),
        })
    }

    fn meta(&self) -> Value {
        let rows: Vec<Value> = self
            .collections
            .iter()
            .map(|(name, docs)| json!({ "name": name, "count": docs.len() }))
            .collect();
        Value::Array(rows)
    }

    fn collection_page(&self, rest: &str, full_path: &str) -> Result<Value> {
        let (name, query) = rest.split_once('?').unwrap_or((rest, ""));

        if !collections::is_allowed(name) {
            return Err(DashError::Server {
                status: 400,
                path: full_path.to_string(),
            });
        }

        let mut page: u32 = 1;
        let mut limit: u32 = 20;
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("page", v)) => page = v.parse().unwrap_or(1).max(1),
                Some(("limit", v)) => limit = v.parse().unwrap_or(20).max(1),
                _ => {}
            }
        }

        let mut docs = self
            .collections
            .get(name)
            .cloned()
            .unwrap_or_default();
        // newest first, by creation-derived identifier
        docs.sort_by_key(|doc| {
            std::cmp::Reverse(doc.get("_id").map(resolve_id).unwrap_or_default())
        });

        let total = docs.len();
        let skip = ((page - 1) as usize).saturating_mul(limit as usize);
        let page_docs: Vec<Value> = docs.into_iter().skip(skip).take(limit as usize).collect();

        Ok(json!({
            "name": name,
            "page": page,
            "limit": limit,
            "total": total,
            "docs": page_docs,
        }))
    }
}

impl Transport for FixtureTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        // Routes are mounted under /api, as on the production backend;
        // the Fetcher's prefix fallback is expected to find them there.
        let stripped = match path.strip_prefix("/api") {
            Some(rest) => rest,
            None => return Err(DashError::NotFound(path.to_string())),
        };
        if let Some(rest) = stripped.strip_prefix("/collections/") {
            return self.collection_page(rest, path);
        }
        match stripped {
            "/dashboard" => Ok(self.dashboard()),
            "/meta" => Ok(self.meta()),
            _ => Err(DashError::NotFound(path.to_string())),
        }
    }
}

fn sample_data() -> Vec<(&'static str, Vec<Value>)> {
    let users = vec![
        json!({ "_id": { "$oid": "66a00001" }, "name": "John Doe", "email": "john@mygym.example" }),
        json!({ "_id": "66a00002", "name": "Sarah Smith", "username": "sarahs" }),
        json!({ "_id": { "$oid": "66a00003" }, "username": "mikej", "email": "mike@mygym.example" }),
        json!({ "_id": "66a00004", "name": "Emily Brown" }),
        json!({ "_id": "66a00005", "email": "david@mygym.example" }),
        json!({ "_id": "66a00006", "name": "Lisa Wang" }),
    ];

    let activities = vec![
        json!({
            "_id": "66b00006",
            "userId": "66a00001",
            "actions": {
                "Login": { "count": 12, "lastActivityTime": 1705312200000_i64, "notes": ["first login", "back again"] },
                "WorkoutPlan": { "count": 3, "lastActivityTime": { "$date": "2024-01-14T09:15:00Z" }, "notes": ["leg day"] }
            },
            "lastUpdated": 1705312200000_i64,
            "created_at": "2024-01-02T08:00:00Z"
        }),
        json!({
            "_id": "66b00005",
            "userId": { "$oid": "66a00002" },
            "actions": {
                "Login": { "count": 8, "lastActivityTime": { "$date": { "$numberLong": "1705225800000" } }, "notes": [] },
                "Contest": { "count": 1, "lastActivityTime": "2024-01-10T18:30:00Z", "notes": ["joined new year contest"] }
            },
            "lastUpdated": { "$date": "2024-01-14T10:30:00Z" },
            "created_at": "2024-01-03T08:00:00Z"
        }),
        json!({
            "_id": "66b00004",
            "user": { "_id": { "$oid": "66a00003" } },
            "actions": {
                "DietPlan": { "count": 2, "lastActivityTime": { "$numberLong": "1705139400000" }, "notes": ["cutting", "bulking"] }
            },
            "lastUpdated": { "$numberLong": "1705139400000" }
        }),
        json!({
            "_id": "66b00003",
            "userId": "66a00004",
            "actions": {},
            "lastUpdated": "2024-01-12T07:45:00Z",
            "created_at": "2024-01-04T08:00:00Z"
        }),
        json!({
            "_id": "66b00002",
            "created_for": "66a00005",
            "actions": {
                "Login": { "count": 2, "notes": ["trial session"] }
            },
            "lastUpdated": "2024-01-11T19:20:00Z"
        }),
        json!({
            "_id": "66b00001",
            "userId": "66a99999",
            "actions": { "Login": { "count": 1 } },
            "lastUpdated": "2024-01-10T06:00:00Z"
        }),
    ];

    let dailysteps = vec![
        json!({ "_id": "66c00007", "userName": "John Doe", "date": "2024-01-15", "steps": 12450 }),
        json!({ "_id": "66c00006", "userName": "Sarah Smith", "date": "2024-01-15", "steps": 11230 }),
        json!({ "_id": "66c00005", "userName": "Mike Johnson", "date": "2024-01-15", "steps": 10890 }),
        json!({ "_id": "66c00004", "userName": "Emily Brown", "date": "2024-01-15", "steps": 9870 }),
        json!({ "_id": "66c00003", "user_id": "66a00005", "date": 1705276800000_i64, "steps": "9120" }),
        json!({ "_id": "66c00002", "userName": "Lisa Wang", "date": "2024-01-14", "steps": 8430 }),
        json!({ "_id": "66c00001", "userName": "John Doe", "date": "2024-01-14", "steps": 7980 }),
    ];

    let challenges = vec![
        json!({ "_id": "66d00004", "name": "30-Day Fitness Challenge", "status": "Active", "startDate": "2024-01-01", "endDate": "2024-01-31", "participants": 145 }),
        json!({ "_id": "66d00003", "name": "New Year Marathon Prep", "status": "Active", "startDate": "2024-01-01", "endDate": "2024-03-31", "participants": 67 }),
        json!({ "_id": "66d00002", "name": "Weight Loss Warriors", "status": "Active", "startDate": "2024-01-05", "endDate": "2024-02-05", "participants": 92 }),
        json!({ "_id": "66d00001", "name": "Strength Building Challenge", "status": "Active", "startDate": "2024-01-10", "endDate": "2024-02-10", "participants": 78 }),
    ];

    let challengesworks = vec![
        json!({
            "_id": "66e00006",
            "challenge_name": "30-Day Fitness Challenge",
            "challenge_id": "66d00004",
            "user_id": "66a00001",
            "completed": true,
            "progress": 100,
            "start_at": "2024-01-01",
            "lastUpdated": "2024-01-15T08:00:00Z"
        }),
        json!({
            "_id": "66e00005",
            "challengeId": { "$oid": "66d00004" },
            "member_id": "66a00002",
            "status": "Finished",
            "completed": false,
            "steps_done": 30, "steps_goal": 30,
            "startDate": "2024-01-01",
            "updated_at": "2024-01-14T21:10:00Z"
        }),
        json!({
            "_id": "66e00004",
            "challenge": "66d00003",
            "user_id": "66a00003",
            "status": "pending",
            "steps_done": 0, "steps_goal": 90,
            "start_at": "2024-01-02"
        }),
        json!({
            "_id": "66e00003",
            "challenge_id": "66d00002",
            "user_id": "66a00004",
            "status": "cancelled",
            "progress": "15",
            "start_at": "2024-01-05",
            "lastUpdated": 1705089000000_i64
        }),
        json!({
            "_id": "66e00002",
            "challenge_id": "66d00002",
            "created_for": "66a00005",
            "steps_done": 12,
            "start_at": "2024-01-05",
            "lastUpdated": "2024-01-13T12:00:00Z"
        }),
        json!({}),
    ];

    let exercises = vec![
        json!({ "_id": "66f00008", "name": "Barbell Bench Press", "levels": "Intermediate", "sub_categories_Name": "Chest", "video": "https://videos.mygym.example/bench.mp4", "description": "Lie on a flat bench, grip the bar slightly wider than shoulder width, lower to mid-chest and press back up without bouncing." }),
        json!({ "_id": "66f00007", "name": "Squats", "levels": "Beginner", "sub_categories_Name": "Legs", "description": "Feet shoulder width, brace, sit back and down until thighs are parallel, drive up through the heels." }),
        json!({ "_id": "66f00006", "name": "Deadlift", "levels": "Advanced", "sub_categories_Name": "Back", "video": "https://videos.mygym.example/deadlift.mp4" }),
        json!({ "_id": "66f00005", "name": "Running", "levels": "Beginner", "sub_categories_Name": "Endurance" }),
        json!({ "_id": "66f00004", "name": "Pull-ups", "levels": "Intermediate", "sub_categories_Name": "Back" }),
        json!({ "_id": "66f00003", "name": "Burpees", "levels": "expert", "sub_categories_Name": "Full Body" }),
        json!({ "_id": "66f00002", "name": "Plank", "sub_categories_Name": "Abs" }),
        json!({ "_id": "66f00001" }),
    ];

    let conversations = vec![
        json!({ "_id": "66900005", "conversationId": "CONV-005", "participants": ["Tom Wilson", "Anna Garcia", "Lisa Wang", "Challenge Coordinator"], "lastMessage": "Challenge starts tomorrow!", "lastUpdated": "2024-01-15 10:30" }),
        json!({ "_id": "66900004", "conversationId": "CONV-004", "participants": ["David Lee", "Trainer Mike"], "lastMessage": "Great progress this week!", "lastUpdated": "2024-01-15 11:15" }),
        json!({ "_id": "66900003", "conversationId": "CONV-003", "participantsCount": 2, "lastMessage": "Can I reschedule my session?", "lastUpdated": "2024-01-15 12:20" }),
        json!({ "_id": "66900002", "conversationId": "CONV-002", "participants": ["Sarah Smith", "Emily Brown", "Instructor Lisa"], "lastMessage": "What time is the yoga class?", "lastUpdated": "2024-01-15 13:45" }),
        json!({ "_id": "66900001", "conversationId": "CONV-001", "participants": ["John Doe", "Trainer Mike"], "lastMessage": "Thanks for the workout tips!", "lastUpdated": "2024-01-15 14:30" }),
    ];

    let carts = vec![
        json!({ "_id": "66800003", "userId": "66a00001", "items": ["protein powder", "shaker"], "totalPrice": 2499, "createdAt": "2024-01-15T09:00:00Z" }),
        json!({ "_id": "66800002", "userId": "66a00004", "items": ["gym gloves"], "totalPrice": 0, "createdAt": "2024-01-14T15:30:00Z" }),
        json!({ "_id": "66800001", "userId": "66a00006", "items": [], "totalPrice": 1299, "createdAt": "2024-01-13T11:00:00Z" }),
    ];

    vec![
        ("users", users),
        ("activities", activities),
        ("dailysteps", dailysteps),
        ("challenges", challenges),
        ("challengesworks", challengesworks),
        ("exercises", exercises),
        ("conversations", conversations),
        ("carts", carts),
    ]
}
