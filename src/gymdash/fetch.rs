//! The Fetcher: the only async, fallible stage of the pipeline.
//!
//! Validates collection names against the shared whitelist before any
//! transport call, decodes response bodies, and handles the backend's
//! path-prefix ambiguity: the contract path is unprefixed, but some
//! deployments mount the routes under `/api`.

use serde::Deserialize;
use serde_json::Value;

use crate::collections;
use crate::error::{DashError, Result};
use crate::model::{CollectionCount, CollectionPage, DashboardStats};
use crate::transport::Transport;

/// Wire shape of the list-collection endpoint. Lenient on purpose: a
/// backend that omits the echo fields still yields a usable page.
#[derive(Deserialize)]
struct PageBody {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    docs: Vec<Value>,
}

pub struct Fetcher<T: Transport> {
    transport: T,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one page of a whitelisted collection, newest first.
    ///
    /// A name outside the whitelist is rejected client-side; no request
    /// is issued.
    pub async fn collection(
        &self,
        name: &str,
        page: u32,
        page_size: u32,
    ) -> Result<CollectionPage> {
        if !collections::is_allowed(name) {
            log::warn!("rejected request for non-whitelisted collection {:?}", name);
            return Err(DashError::CollectionNotAllowed(name.to_string()));
        }
        let page = page.max(1);
        let page_size = page_size.max(1);
        let path = format!("/collections/{}?page={}&limit={}", name, page, page_size);
        let body = self.get_with_fallback(&path).await?;
        let parsed: PageBody = serde_json::from_value(body)?;

        let mut documents = Vec::with_capacity(parsed.docs.len());
        for doc in parsed.docs {
            match doc {
                Value::Object(map) => documents.push(map),
                other => {
                    log::warn!("dropping non-object document in {}: {}", name, other);
                }
            }
        }

        Ok(CollectionPage {
            name: name.to_string(),
            documents,
            total_count: parsed.total.unwrap_or(0),
            page: parsed.page.unwrap_or(page),
            page_size: parsed.limit.unwrap_or(page_size),
        })
    }

    /// The `/dashboard` KPI counters.
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let body = self.get_with_fallback("/dashboard").await?;
        Ok(serde_json::from_value(body)?)
    }

    /// The `/meta` listing of all store collections with counts.
    pub async fn meta(&self) -> Result<Vec<CollectionCount>> {
        let body = self.get_with_fallback("/meta").await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Primary path first; on a not-found signal only, retry once under
    /// the `/api` prefix. Server and network failures propagate as-is.
    async fn get_with_fallback(&self, path: &str) -> Result<Value> {
        match self.transport.get_json(path).await {
            Ok(body) => Ok(body),
            Err(err) if err.is_not_found() => {
                let prefixed = format!("/api{}", path);
                log::debug!("{} not found, retrying {}", path, prefixed);
                self.transport.get_json(&prefixed).await
            }
            Err(err) => Err(err),
        }
    }
}
