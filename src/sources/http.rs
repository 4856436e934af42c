//! HTTP JSON record source with `offset` continuation paging.

use std::time::Duration;

use crate::state::RawRecord;

use super::{RecordSource, Result, decode_page};

/// Upper bound on followed continuation pages per fetch.
pub const MAX_PAGES: usize = 50;

/// Fetches inventory rows from an HTTP JSON endpoint.
///
/// Pages are followed through the `offset` continuation token until the
/// backend stops returning one. A collection longer than [`MAX_PAGES`] pages
/// is a fetch failure, never a truncated list.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// Shared client with connection pooling.
    client: reqwest::Client,
    /// Endpoint listing the rows.
    url: String,
    /// Bearer token, when the backend requires one.
    token: Option<String>,
}

impl HttpSource {
    /// What: Build a source for `url`.
    ///
    /// Inputs:
    /// - `url`: Endpoint listing the rows
    /// - `token`: Optional bearer token
    ///
    /// Output:
    /// - Configured source
    ///
    /// # Errors
    /// - When the HTTP client cannot be constructed
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(format!("scanshelf/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// What: Build the URL for one page.
    ///
    /// Inputs:
    /// - `offset`: Continuation token from the previous page
    ///
    /// Output:
    /// - Base URL with `offset` appended as a query parameter when present
    fn page_url(&self, offset: Option<&str>) -> String {
        match offset {
            None => self.url.clone(),
            Some(token) => {
                let sep = if self.url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{sep}offset={}",
                    self.url,
                    crate::util::percent_encode(token)
                )
            }
        }
    }

    /// What: Fetch and decode one page.
    ///
    /// Inputs:
    /// - `offset`: Continuation token, `None` for the first page
    ///
    /// Output:
    /// - Rows and the next continuation token
    ///
    /// # Errors
    /// - Transport failures, non-success status codes, undecodable bodies
    async fn fetch_page(&self, offset: Option<&str>) -> Result<(Vec<RawRecord>, Option<String>)> {
        let url = self.page_url(offset);
        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "fetched inventory page"
        );
        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            tracing::warn!(
                status = status.as_u16(),
                preview = preview,
                "inventory endpoint returned non-success status"
            );
            return Err(format!("Inventory server responded with status {status}").into());
        }
        decode_page(&body)
    }
}

impl RecordSource for HttpSource {
    async fn list_inventory_records(&self) -> Result<Vec<RawRecord>> {
        let mut rows = Vec::new();
        let mut offset: Option<String> = None;
        for _ in 0..MAX_PAGES {
            let (mut page, next) = self.fetch_page(offset.as_deref()).await?;
            rows.append(&mut page);
            match next {
                Some(token) => offset = Some(token),
                None => return Ok(rows),
            }
        }
        tracing::warn!(
            pages = MAX_PAGES,
            rows = rows.len(),
            "inventory page limit reached"
        );
        Err(format!("Inventory page limit reached ({MAX_PAGES} pages)").into())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
