//! # Browse State
//!
//! The filter bar and "load more" button of the browse page, as data.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_search / set_genre / set_sort ──► filter changes, page = 1         │
//! │  load_more()                       ──► page + 1 (no has_more guard)     │
//! │  clear_filters()                   ──► defaults, page = 1               │
//! │  current_page(catalog)             ──► query ─► paginate ─► Page        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::query::{paginate, AudiobookQuery, Page, SortKey, DEFAULT_PAGE_SIZE};
use crate::types::{Audiobook, GENRE_ALL};
use crate::validation::validate_search_query;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    query: AudiobookQuery,
    page: usize,
    page_size: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        BrowseState::new(DEFAULT_PAGE_SIZE)
    }
}

impl BrowseState {
    /// Fresh browse state. A zero `page_size` falls back to the default.
    pub fn new(page_size: usize) -> Self {
        BrowseState {
            query: AudiobookQuery {
                search: String::new(),
                genre: GENRE_ALL.to_string(),
                sort: SortKey::default(),
            },
            page: 1,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    pub fn query(&self) -> &AudiobookQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the search text (trimmed, at most 100 characters).
    pub fn set_search(&mut self, search: &str) -> CoreResult<()> {
        self.query.search = validate_search_query(search)?;
        self.page = 1;
        Ok(())
    }

    /// Sets the genre filter. Any label is accepted; one that matches no
    /// genre simply yields an empty page.
    pub fn set_genre(&mut self, genre: &str) {
        self.query.genre = genre.trim().to_string();
        self.page = 1;
    }

    /// Sets the sort key from its wire name.
    pub fn set_sort(&mut self, sort_key: &str) -> CoreResult<()> {
        self.query.sort = sort_key.parse()?;
        self.page = 1;
        Ok(())
    }

    pub fn set_page_size(&mut self, page_size: usize) -> CoreResult<()> {
        if page_size == 0 {
            return Err(CoreError::invalid_argument("page size", "must be positive"));
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Jumps straight to a page, e.g. when restoring a deep link.
    pub fn set_page(&mut self, page: usize) -> CoreResult<()> {
        if page == 0 {
            return Err(CoreError::invalid_argument("page", "pages start at 1"));
        }
        self.page = page;
        Ok(())
    }

    /// Shows one more page of results.
    ///
    /// Unconditional: past the last page the visible list simply stays
    /// complete. Callers hide the button once `has_more` is false.
    pub fn load_more(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn clear_filters(&mut self) {
        *self = BrowseState::new(self.page_size);
    }

    /// Whether anything other than the defaults is applied.
    pub fn has_active_filters(&self) -> bool {
        !self.query.search.is_empty()
            || (!self.query.genre.is_empty() && self.query.genre != GENRE_ALL)
            || self.query.sort != SortKey::default()
    }

    /// Runs the query against `catalog` and returns the visible page.
    pub fn current_page(&self, catalog: &Catalog) -> CoreResult<Page<Audiobook>> {
        let filtered = self.query.apply(catalog.books());
        paginate(&filtered, self.page, self.page_size)
    }
}
