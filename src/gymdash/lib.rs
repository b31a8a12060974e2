//! # Gymdash Architecture
//!
//! Gymdash is a **UI-agnostic dashboard library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client. The same core could back a web frontend,
//! a TUI, or a reporting job.
//!
//! ## The Pipeline
//!
//! Every view is one run of a strict, one-directional pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transport (transport/)                                     │
//! │  - The external backend seam: get_json(path)                │
//! │  - MemoryTransport for tests, FixtureTransport for demos    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Fetcher (fetch.rs)                                         │
//! │  - Whitelist guard, /api prefix fallback, page decoding     │
//! │  - The only async, fallible stage                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Normalizer (normalize.rs)                                  │
//! │  - Loosely-typed documents → canonical NormalizedRecord     │
//! │  - Total: malformed input degrades to sentinels, never errs │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Projector / Aggregator (project.rs, aggregate.rs)          │
//! │  - Column selection + cell formatting → TableView           │
//! │  - Single-pass page reduction → SummaryStats                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! No stage calls back into an earlier one, and nothing is cached across
//! runs—every view activation recomputes from a fresh fetch.
//!
//! ## Views Supply Data, Not Logic
//!
//! The normalization and projection rules live once, in the shared
//! modules. Each view module ([`views`]) contributes only configuration:
//! a [`schema::CollectionSchema`] of field-source chains, a column list,
//! and the stats to reduce. This is deliberate: per-view copies of the
//! same field handling drift apart.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From [`api`] inward, code takes regular arguments, returns regular
//! `Result` types, never touches stdout/stderr, and never assumes a
//! terminal. Rendering belongs to the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all views
//! - [`views`]: Per-view pipelines returning structured [`views::ViewResult`]s
//! - [`fetch`]: The Fetcher over the transport seam
//! - [`transport`]: Backend abstraction and implementations
//! - [`normalize`]: Document canonicalization rules
//! - [`project`]: Tabular projection and cell formatting
//! - [`aggregate`]: Page reductions, status and progress rules
//! - [`schema`]: Per-collection configuration tables
//! - [`collections`]: The shared collection whitelist
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod aggregate;
pub mod api;
pub mod collections;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod project;
pub mod schema;
pub mod transport;
pub mod views;
