use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::Transport;
use crate::error::{DashError, Result};

/// A failure to inject for a specific path.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Server(u16),
    Network,
}

/// In-memory transport for tests: a route→response map plus injected
/// failures, with a call log so tests can assert exactly which requests
/// were issued (or that none were).
#[derive(Default)]
pub struct MemoryTransport {
    routes: HashMap<String, Value>,
    failures: HashMap<String, Failure>,
    calls: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), body);
        self
    }

    pub fn with_failure(mut self, path: &str, failure: Failure) -> Self {
        self.failures.insert(path.to_string(), failure);
        self
    }

    /// Paths requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Transport for MemoryTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.to_string());
        }
        if let Some(failure) = self.failures.get(path) {
            return Err(match failure {
                Failure::Server(status) => DashError::Server {
                    status: *status,
                    path: path.to_string(),
                },
                Failure::Network => DashError::Network("connection refused".to_string()),
            });
        }
        match self.routes.get(path) {
            Some(body) => Ok(body.clone()),
            None => Err(DashError::NotFound(path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn routes_resolve_and_unknown_is_not_found() {
        let transport = MemoryTransport::new().with_route("/meta", json!([]));
        assert!(transport.get_json("/meta").await.is_ok());
        let err = transport.get_json("/nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn failures_and_call_log() {
        let transport = MemoryTransport::new().with_failure("/boom", Failure::Server(500));
        let err = transport.get_json("/boom").await.unwrap_err();
        assert!(matches!(err, DashError::Server { status: 500, .. }));
        assert_eq!(transport.calls(), vec!["/boom".to_string()]);
    }
}
