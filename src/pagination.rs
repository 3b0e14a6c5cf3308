//! Pagination over GitHub list endpoints.
//!
//! Items returned by list endpoints are full representations, so completable
//! items are built already complete.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};
use url::Url;

use crate::error::{GithubError, Result};
use crate::object::{Completable, Object};
use crate::opt::Opt;
use crate::traits::{CompletableResource, Headers, Requester, Resource};

/// Default page size (GitHub's own default).
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page size GitHub accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// A page of results from the GitHub API.
#[derive(Debug)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u64>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub count: u32,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, count: u32, total: Option<u64>) -> Self {
        let has_more = match total {
            Some(t) => (u64::from(page) * u64::from(count)) < t,
            None => items.len() >= count as usize,
        };
        Self {
            items,
            total,
            page,
            count,
            has_more,
        }
    }

    /// Take `has_more` from a `Link` response header.
    ///
    /// Plain list endpoints only announce a next page through `rel="next"`,
    /// so a missing header means this is the last page.
    #[must_use]
    pub fn with_link_header(mut self, link: Option<&str>) -> Self {
        self.has_more = link.is_some_and(|link| {
            link.split(',')
                .any(|part| part.trim_end().ends_with("rel=\"next\""))
        });
        self
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            count: self.count,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Build an item from one element of a list response.
pub trait FromListItem: Sized {
    /// Construct from a full representation. Never performs I/O.
    fn from_list_item(
        requester: &Arc<dyn Requester>,
        headers: &Headers,
        attributes: &Map<String, Value>,
        lazy: Opt<bool>,
    ) -> Self;
}

impl<R: CompletableResource> FromListItem for Completable<R> {
    fn from_list_item(
        requester: &Arc<dyn Requester>,
        headers: &Headers,
        attributes: &Map<String, Value>,
        lazy: Opt<bool>,
    ) -> Self {
        Completable::from_full(Arc::clone(requester), headers.clone(), attributes, lazy)
    }
}

impl<R: Resource> FromListItem for Object<R> {
    fn from_list_item(
        requester: &Arc<dyn Requester>,
        headers: &Headers,
        attributes: &Map<String, Value>,
        lazy: Opt<bool>,
    ) -> Self {
        Object::new(Arc::clone(requester), headers.clone(), attributes, lazy)
    }
}

/// A lazily fetched, paginated collection.
///
/// Building the list performs no I/O; pages are requested on demand.
///
/// # Example
///
/// ```ignore
/// let repo = github.get_repo("octocat/hello-world", Opt::Unset).await?;
///
/// // Fetch a single page
/// let page = repo.get_issues(None)?.with_per_page(50).get_page(1).await?;
///
/// // Fetch all pages
/// let issues = repo.get_issues(Some(IssueState::All))?.all().await?;
/// ```
pub struct PaginatedList<T> {
    requester: Arc<dyn Requester>,
    url: String,
    params: Vec<(String, String)>,
    list_item: Option<&'static str>,
    total_count_item: &'static str,
    per_page: u32,
    lazy: Opt<bool>,
    _item: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for PaginatedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedList")
            .field("url", &self.url)
            .field("params", &self.params)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl<T: FromListItem> PaginatedList<T> {
    /// A list over `url`, whose items inherit `lazy`.
    pub fn new(requester: Arc<dyn Requester>, url: String, lazy: Opt<bool>) -> Self {
        Self {
            requester,
            url,
            params: Vec::new(),
            list_item: None,
            total_count_item: "total_count",
            per_page: DEFAULT_PER_PAGE,
            lazy,
            _item: PhantomData,
        }
    }

    /// Items are wrapped in an object under `key` (search endpoints).
    #[must_use]
    pub fn with_list_item(mut self, key: &'static str) -> Self {
        self.list_item = Some(key);
        self
    }

    /// Add a query parameter sent with every page request.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Set the page size, clamped to `1..=100`.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// The page size used for requests.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    fn page_url(&self, page: u32) -> Result<String> {
        let mut url = Url::parse(&self.requester.make_url(&self.url)?)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
            query.append_pair("per_page", &self.per_page.to_string());
            query.append_pair("page", &page.to_string());
        }
        Ok(url.to_string())
    }

    /// Fetch a single page (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a list.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn get_page(&self, page: u32) -> Result<Page<T>> {
        let url = self.page_url(page)?;
        let (headers, body) = self.requester.get_json(&url).await?;

        let (elements, total) = match (self.list_item, body) {
            (Some(key), Value::Object(mut wrapper)) => {
                let total = wrapper.get(self.total_count_item).and_then(Value::as_u64);
                (wrapper.remove(key).unwrap_or(Value::Array(Vec::new())), total)
            }
            (_, body) => (body, None),
        };
        let Value::Array(elements) = elements else {
            return Err(GithubError::InvalidResponse(format!(
                "expected a list from {url}"
            )));
        };

        let items = elements
            .iter()
            .filter_map(Value::as_object)
            .map(|attributes| T::from_list_item(&self.requester, &headers, attributes, self.lazy))
            .collect();

        let page = Page::new(items, page, self.per_page, total);
        Ok(match self.list_item {
            // Wrapped search results carry their own total count
            Some(_) => page,
            None => page.with_link_header(headers.get("link").map(String::as_str)),
        })
    }

    /// Fetch all pages.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn all(&self) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = self.get_page(page).await?;
            let has_more = result.has_more && !result.is_empty();
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
