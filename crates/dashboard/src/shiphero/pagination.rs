//! Cursor pagination over `ShipHero` connections.
//!
//! [`fetch_all_pages`] walks a connection page by page, sleeping between
//! requests to stay under `ShipHero`'s credit limits, until the API reports no
//! further pages or the page cap is hit. Dropping the returned future stops
//! the walk before the next request is sent.

use std::future::Future;
use std::time::Duration;

use tracing::instrument;

use super::ShipHeroError;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Default maximum number of pages fetched in one walk.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Default pause between consecutive page requests, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 500;

/// Default pause between consecutive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(DEFAULT_PAGE_DELAY_MS);

/// One page of records plus the cursor needed to continue.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl<T> Page<T> {
    /// A page with no records and nothing after it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
            has_next_page: false,
            end_cursor: None,
        }
    }
}

/// Something that can be read one cursor page at a time.
pub trait PageSource {
    type Record: Send;

    /// Fetch up to `first` records following `after`.
    fn fetch_page(
        &self,
        first: i64,
        after: Option<&str>,
    ) -> impl Future<Output = Result<Page<Self::Record>, ShipHeroError>> + Send;
}

/// Limits applied to a pagination walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    pub page_size: i64,
    pub max_pages: u32,
    pub page_delay: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

/// Everything collected by a pagination walk.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    /// Records in page order.
    pub records: Vec<T>,
    /// Number of page requests that succeeded.
    pub pages_fetched: u32,
    /// `true` when the walk stopped at `max_pages` while more pages remained.
    pub truncated: bool,
}

/// Fetch every page from `source`, bounded by `settings.max_pages`.
///
/// The cursor of each page feeds the next request. The walk ends when a page
/// reports no next page, carries no cursor, or the page cap is reached.
///
/// # Errors
///
/// The first failed page aborts the walk; records from earlier pages are
/// discarded.
#[instrument(skip_all, fields(page_size = settings.page_size, max_pages = settings.max_pages))]
pub async fn fetch_all_pages<S>(
    source: &S,
    settings: PaginationSettings,
) -> Result<FetchOutcome<S::Record>, ShipHeroError>
where
    S: PageSource + Sync,
{
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched: u32 = 0;
    let mut has_more = true;

    while has_more && pages_fetched < settings.max_pages {
        let page = source
            .fetch_page(settings.page_size, cursor.as_deref())
            .await?;
        pages_fetched += 1;

        let page_records = page.records.len();
        records.extend(page.records);
        tracing::debug!(
            page = pages_fetched,
            records = page_records,
            total = records.len(),
            has_next_page = page.has_next_page,
            "Fetched page"
        );

        cursor = page.end_cursor;
        has_more = page.has_next_page && cursor.is_some();

        if has_more && pages_fetched < settings.max_pages && !settings.page_delay.is_zero() {
            tokio::time::sleep(settings.page_delay).await;
        }
    }

    // A walk capped before its first request has not seen a ceiling.
    let truncated = has_more && pages_fetched > 0;
    if truncated {
        tracing::warn!(
            pages_fetched,
            records = records.len(),
            "Stopped at page cap with more pages remaining"
        );
    } else {
        tracing::info!(pages_fetched, records = records.len(), "Fetched all pages");
    }

    Ok(FetchOutcome {
        records,
        pages_fetched,
        truncated,
    })
}
