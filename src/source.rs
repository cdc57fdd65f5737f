// src/source.rs

use async_trait::async_trait;

use crate::error::Error;
use crate::fetch::{self, urls};
use crate::profile;
use crate::table::DataTable;
use crate::UniversityId;

/// Everything the run loop needs from the outside world for one university.
/// A seam rather than direct calls so the loop can run against a mock, and
/// so the fragile page heuristic can be swapped without touching the loop.
#[async_trait]
pub trait UniversitySource {
    async fn graduation_records(&mut self, id: UniversityId) -> Result<DataTable, Error>;
    async fn enrollment_records(&mut self, id: UniversityId) -> Result<DataTable, Error>;
    async fn resolve_state(&mut self, slug: &str) -> Result<String, Error>;
}

/// Live DataUSA-backed source: plain HTTP for the statistics API, the one
/// shared WebDriver session for profile pages.
pub struct LiveSource {
    http: reqwest::Client,
    browser: fantoccini::Client,
}

impl LiveSource {
    pub fn new(http: reqwest::Client, browser: fantoccini::Client) -> Self {
        Self { http, browser }
    }

    /// Hand the browser session back so the caller can close it; the session
    /// outlives the source's usefulness but must not outlive the program.
    pub fn into_browser(self) -> fantoccini::Client {
        self.browser
    }
}

#[async_trait]
impl UniversitySource for LiveSource {
    async fn graduation_records(&mut self, id: UniversityId) -> Result<DataTable, Error> {
        fetch::fetch_records(&self.http, &urls::graduation_query(id)).await
    }

    async fn enrollment_records(&mut self, id: UniversityId) -> Result<DataTable, Error> {
        fetch::fetch_records(&self.http, &urls::enrollment_query(id)).await
    }

    async fn resolve_state(&mut self, slug: &str) -> Result<String, Error> {
        profile::resolve_state(&mut self.browser, slug).await
    }
}
