//! The backend seam.
//!
//! The real query surface (an HTTP service in front of the document
//! store) is an external collaborator this crate does not implement.
//! Everything above it talks to the [`Transport`] trait instead, which
//! keeps the pipeline testable without a network:
//!
//! - [`memory::MemoryTransport`]: a route table with failure injection,
//!   for tests
//! - [`fixture::FixtureTransport`]: a bundled sample backend with real
//!   pagination, for demos and the CLI
//!
//! Timeouts and connection management belong to the transport
//! implementation, not to this crate.

use serde_json::Value;

use crate::error::Result;

pub mod fixture;
pub mod memory;

/// Abstract interface to the backend query surface.
///
/// `path` is the full request path including any query string, e.g.
/// `/collections/dailysteps?page=1&limit=20`. Implementations are
/// read-only and side-effect free from the caller's point of view.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_json(&self, path: &str) -> Result<Value>;
}
