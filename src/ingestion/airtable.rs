//! Airtable REST source.
//!
//! Lists every record of one table with `GET {api_url}/{base_id}/{table_name}`, following the
//! `offset` cursor until the last page. Every failure (transport, HTTP status, undecodable page)
//! surfaces as a single [`DashboardError::Connection`]; nothing is retried.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::types::Record;

use super::RecordSource;
use super::json::{RawRecord, RecordPage};

/// Largest page size the list endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_BODY_EXCERPT: usize = 200;

/// Blocking client for one Airtable table.
#[derive(Debug, Clone)]
pub struct AirtableSource {
    client: Client,
    config: DashboardConfig,
    page_size: usize,
}

impl AirtableSource {
    /// Create a source for the table described by `config`.
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DashboardError::connection(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Override the page size (clamped to `1..=100`).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// URL of the list-records endpoint, without query parameters.
    pub fn list_url(&self) -> DashboardResult<Url> {
        let mut url = Url::parse(&self.config.api_url).map_err(|e| {
            DashboardError::connection(format!("invalid api url '{}': {e}", self.config.api_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                DashboardError::connection(format!(
                    "api url '{}' cannot be a base",
                    self.config.api_url
                ))
            })?
            .pop_if_empty()
            .push(&self.config.base_id)
            .push(&self.config.table_name);
        Ok(url)
    }

    fn fetch_page(&self, offset: Option<&str>) -> DashboardResult<RecordPage> {
        let mut url = self.list_url()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &self.page_size.to_string());
            if let Some(offset) = offset {
                query.append_pair("offset", offset);
            }
        }

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.api_token)
            .send()
            .map_err(|e| DashboardError::connection(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(DashboardError::connection(format!(
                "API error ({status}): {}",
                excerpt(&text)
            )));
        }

        response
            .json::<RecordPage>()
            .map_err(|e| DashboardError::connection(format!("failed to parse records page: {e}")))
    }
}

impl RecordSource for AirtableSource {
    fn describe(&self) -> String {
        format!(
            "airtable base={} table={}",
            self.config.base_id, self.config.table_name
        )
    }

    fn fetch_all_records(&self) -> DashboardResult<Vec<Record>> {
        collect_pages(|offset| self.fetch_page(offset))
    }
}

/// Drive a paginated listing: call `fetch_page` with the previous page's cursor until a page
/// arrives without one, concatenating records in page order.
///
/// A cursor that repeats the one just requested is rejected as a connection error.
pub fn collect_pages<F>(mut fetch_page: F) -> DashboardResult<Vec<Record>>
where
    F: FnMut(Option<&str>) -> DashboardResult<RecordPage>,
{
    let mut records = Vec::new();
    let mut offset: Option<String> = None;
    loop {
        let page = fetch_page(offset.as_deref())?;
        records.extend(page.records.into_iter().map(RawRecord::into_record));
        match page.offset {
            Some(next) if offset.as_deref() == Some(next.as_str()) => {
                return Err(DashboardError::connection(format!(
                    "pagination offset '{next}' did not advance"
                )));
            }
            Some(next) => offset = Some(next),
            None => return Ok(records),
        }
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(ERROR_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
