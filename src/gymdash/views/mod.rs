//! Per-view pipelines.
//!
//! Each module wires one view of the dashboard: fetch the page(s) it
//! needs, normalize against its schema, derive any view-specific fields,
//! project, aggregate, and hand back a [`ViewResult`] for the client to
//! render. Views contribute configuration and wiring; the rules live in
//! the shared modules.

use crate::error::Result;
use crate::model::SummaryStats;
use crate::project::TableView;

pub mod activity;
pub mod challenges;
pub mod conversations;
pub mod dashboard;
pub mod exercises;
pub mod explorer;
pub mod steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ViewMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl ViewMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One KPI card: a pre-formatted headline number with its caption.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

/// Everything a client needs to render one view.
#[derive(Debug, Clone, Default)]
pub struct ViewResult {
    pub title: String,
    pub table: TableView,
    pub summary: SummaryStats,
    pub cards: Vec<StatCard>,
    /// Store-reported total across all pages, not just the shown page.
    pub total_count: u64,
    pub messages: Vec<ViewMessage>,
}

impl ViewResult {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: TableView) -> Self {
        self.table = table;
        self
    }

    pub fn with_summary(mut self, summary: SummaryStats) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_cards(mut self, cards: Vec<StatCard>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total_count = total;
        self
    }

    pub fn add_message(&mut self, message: ViewMessage) {
        self.messages.push(message);
    }
}

/// The view layer's idle → loading → (success | error) cycle, entered
/// fresh on every activation or reload.
///
/// Stale-data policy: a failed refresh keeps the last good result on
/// display next to a persistent error; it never blanks already-rendered
/// data. An empty successful fetch is its own state, distinct from the
/// error state.
#[derive(Debug, Default)]
pub struct ViewState {
    result: Option<ViewResult>,
    error: Option<String>,
    loading: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn apply(&mut self, outcome: Result<ViewResult>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            // keep the previous result, if any
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn result(&self) -> Option<&ViewResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The fetch succeeded and found nothing to show.
    pub fn is_empty_success(&self) -> bool {
        self.error.is_none()
            && self
                .result
                .as_ref()
                .map(|r| r.table.is_empty() && r.cards.is_empty())
                .unwrap_or(false)
    }
}
