//! # API Facade
//!
//! The single entry point for all dashboard views, generic over the
//! backend transport:
//!
//! - Production-ish: `DashApi<FixtureTransport>` (or any real transport)
//! - Testing: `DashApi<MemoryTransport>`
//!
//! The facade dispatches to the view modules and nothing more — no
//! business logic, no I/O, no presentation concerns. Clients render the
//! returned [`ViewResult`]s however they like.

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::transport::Transport;
use crate::views;

pub struct DashApi<T: Transport> {
    fetcher: Fetcher<T>,
}

impl<T: Transport> DashApi<T> {
    pub fn new(transport: T) -> Self {
        Self {
            fetcher: Fetcher::new(transport),
        }
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    pub async fn dashboard(&self) -> Result<views::ViewResult> {
        views::dashboard::run(&self.fetcher).await
    }

    pub async fn activity(&self, page: u32, page_size: u32) -> Result<views::ViewResult> {
        views::activity::run(&self.fetcher, page, page_size).await
    }

    pub async fn steps(&self, page: u32, page_size: u32) -> Result<views::ViewResult> {
        views::steps::run(&self.fetcher, page, page_size).await
    }

    pub async fn challenges(&self, page: u32, page_size: u32) -> Result<views::ViewResult> {
        views::challenges::run(&self.fetcher, page, page_size).await
    }

    pub async fn exercises(
        &self,
        page: u32,
        page_size: u32,
        filter: &ExerciseFilter,
    ) -> Result<views::ViewResult> {
        views::exercises::run(&self.fetcher, page, page_size, filter).await
    }

    pub async fn conversations(&self, page: u32, page_size: u32) -> Result<views::ViewResult> {
        views::conversations::run(&self.fetcher, page, page_size).await
    }

    pub async fn collection(
        &self,
        name: &str,
        page: u32,
        page_size: u32,
    ) -> Result<views::ViewResult> {
        views::explorer::collection(&self.fetcher, name, page, page_size).await
    }

    pub async fn meta(&self) -> Result<views::ViewResult> {
        views::explorer::meta(&self.fetcher).await
    }
}

pub use crate::views::exercises::{ExerciseFilter, LevelFilter};
pub use crate::views::{MessageLevel, StatCard, ViewMessage, ViewResult, ViewState};
