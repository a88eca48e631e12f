// src/fetch/pages.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

use super::retry::RetryPolicy;
use crate::config::Config;

/// One page of the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
}

/// Blocking client for the paginated OCW course listing.
pub struct ApiClient {
    client: Client,
    api_url: String,
    page_size: usize,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            page_size: config.page_size,
            retry: config.retry,
        })
    }

    /// Fetch a single page. Transport failures and non-success statuses are
    /// retried under the client's policy; a body that is not a page is not.
    pub fn fetch_page(&self, url: &str) -> Result<Page> {
        let url = with_page_size(url, self.page_size)?;
        let resp = self.retry.run(url.as_str(), || {
            self.client
                .get(url.clone())
                .send()
                .with_context(|| format!("GET {url}"))?
                .error_for_status()
                .with_context(|| format!("non-success status from {url}"))
        })?;
        resp.json::<Page>()
            .with_context(|| format!("decoding page from {url}"))
    }

    /// Follow `next` links from the listing URL and collect every result.
    #[instrument(level = "info", skip(self), fields(url = %self.api_url))]
    pub fn fetch_all(&self) -> Result<Vec<Value>> {
        let results = collect_pages(&self.api_url, self.page_size, |url| self.fetch_page(url))?;
        info!(courses = results.len(), "loaded data from the OCW API");
        Ok(results)
    }
}

/// Pagination loop, independent of transport: call `fetch` for the first
/// URL and then for every `next` link until there is none.
pub fn collect_pages<F>(first_url: &str, page_size: usize, mut fetch: F) -> Result<Vec<Value>>
where
    F: FnMut(&str) -> Result<Page>,
{
    let mut results = Vec::new();
    let mut next = Some(first_url.to_string());
    let mut fetched = 0usize;
    let mut total_pages = None;

    while let Some(url) = next.take() {
        let page = fetch(&url)?;
        fetched += 1;
        let total = *total_pages.get_or_insert_with(|| page_count(page.count, page_size));
        info!(
            results = page.results.len(),
            "fetched page {fetched}/{}",
            total.max(fetched)
        );
        results.extend(page.results);
        next = page.next;
    }

    Ok(results)
}

/// Number of pages needed for `count` records, as reported by the first page.
pub fn page_count(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Add `limit=<page_size>` unless the URL already carries a limit, which
/// `next` links from the API do.
pub fn with_page_size(url: &str, page_size: usize) -> Result<Url> {
    let mut url = Url::parse(url).with_context(|| format!("parsing URL {url}"))?;
    if !url.query_pairs().any(|(k, _)| k == "limit") {
        url.query_pairs_mut()
            .append_pair("limit", &page_size.to_string());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;

    fn page(ids: &[u32], count: usize, next: Option<&str>) -> Page {
        Page {
            results: ids.iter().map(|id| json!({ "id": id })).collect(),
            count,
            next: next.map(str::to_string),
        }
    }

    #[test]
    fn follows_next_links_in_order() -> Result<()> {
        let mut requested = Vec::new();
        let results = collect_pages("https://api/p1", 2, |url| {
            requested.push(url.to_string());
            Ok(match url {
                "https://api/p1" => page(&[1, 2], 5, Some("https://api/p2")),
                "https://api/p2" => page(&[3, 4], 5, Some("https://api/p3")),
                "https://api/p3" => page(&[5], 5, None),
                other => return Err(anyhow!("unexpected {other}")),
            })
        })?;

        assert_eq!(requested, ["https://api/p1", "https://api/p2", "https://api/p3"]);
        let ids: Vec<u64> = results.iter().filter_map(|v| v["id"].as_u64()).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(5, 2), 3);
        assert_eq!(page_count(2500, 100), 25);
        assert_eq!(page_count(2501, 100), 26);
        assert_eq!(page_count(0, 100), 0);
        assert_eq!(page_count(7, 0), 7);
    }

    #[test]
    fn single_empty_page() -> Result<()> {
        let results = collect_pages("https://api/p1", 100, |_| Ok(Page::default()))?;
        assert!(results.is_empty());
        Ok(())
    }

    #[test]
    fn page_failure_aborts() {
        let err = collect_pages("https://api/p1", 100, |url| match url {
            "https://api/p1" => Ok(page(&[1], 2, Some("https://api/p2"))),
            _ => Err(anyhow!("gateway timeout")),
        });
        assert!(err.is_err());
    }

    #[test]
    fn page_size_added_once() -> Result<()> {
        let url = with_page_size("https://api.learn.mit.edu/api/v1/courses/?platform=ocw", 100)?;
        assert_eq!(
            url.as_str(),
            "https://api.learn.mit.edu/api/v1/courses/?platform=ocw&limit=100"
        );

        let next = with_page_size(
            "https://api.learn.mit.edu/api/v1/courses/?limit=100&offset=100&platform=ocw",
            100,
        )?;
        assert_eq!(
            next.as_str(),
            "https://api.learn.mit.edu/api/v1/courses/?limit=100&offset=100&platform=ocw"
        );
        Ok(())
    }

    #[test]
    fn page_decodes_listing_body() -> Result<()> {
        let page: Page = serde_json::from_str(
            r#"{"count": 1, "next": null, "previous": null, "results": [{"title": "x"}]}"#,
        )?;
        assert_eq!(page.count, 1);
        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 1);
        Ok(())
    }
}
