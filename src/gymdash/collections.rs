//! The collection whitelist, shared by the client-side guard in
//! [`crate::fetch::Fetcher`] and the server-side route guard in
//! [`crate::transport::fixture::FixtureTransport`].
//!
//! The backend exposes a generic "list collection" endpoint; only these
//! names may be requested through it. Client and server consult the same
//! list, so the two guards cannot drift apart.

pub const ALLOWED_COLLECTIONS: &[&str] = &[
    "activities",
    "activityfeeds",
    "attendances",
    "auditlogs",
    "audittrails",
    "blogs",
    "bmrs",
    "carts",
    "certifications",
    "challenges",
    "challengesworks",
    "chatmembers",
    "commonpages",
    "conversations",
    "createmembershiptokens",
    "dailysteps",
    "exercisecategories",
    "exerciselevels",
    "exercises",
    "exercisesubcategories",
    "users",
];

pub fn is_allowed(name: &str) -> bool {
    ALLOWED_COLLECTIONS.contains(&name)
}
