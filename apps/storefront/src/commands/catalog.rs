//! # Catalog Commands
//!
//! Browsing, searching and book detail.
//!
//! ## Browse Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Filter bar                                                             │
//! │  ┌──────────────┐ ┌────────────┐ ┌─────────────┐                        │
//! │  │ search: dune │ │ genre: All │ │ sort: price │                        │
//! │  └──────────────┘ └────────────┘ └─────────────┘                        │
//! │         │               │               │                               │
//! │         └───────────────┴───────┬───────┘                               │
//! │                                 ▼                                       │
//! │                     browse_books(request) ── page reset to 1            │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │         ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐                 │
//! │         │ book 1  │ │ book 2  │ │  ...    │ │ book 8  │                 │
//! │         └─────────┘ └─────────┘ └─────────┘ └─────────┘                 │
//! │                                 │                                       │
//! │                          [ Load more ] ── load_more() ── page + 1       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use nexus_core::{
    Audiobook, BrowseState, Page, SortKey, POPULAR_BOOKS_LIMIT, RELATED_BOOKS_LIMIT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{BrowseHolder, CatalogState, FavoritesState};

// =============================================================================
// DTOs
// =============================================================================

/// Filter bar input. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One cumulative page of the browse grid, with the filters that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPageResponse {
    pub items: Vec<Audiobook>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_more: bool,
    pub search: String,
    pub genre: String,
    pub sort: SortKey,
    pub page_size: usize,
}

impl BookPageResponse {
    fn new(page: Page<Audiobook>, browse: &BrowseState) -> Self {
        BookPageResponse {
            items: page.items,
            total_count: page.total_count,
            total_pages: page.total_pages,
            current_page: page.current_page,
            has_more: page.has_more,
            search: browse.query().search.clone(),
            genre: browse.query().genre.clone(),
            sort: browse.query().sort,
            page_size: browse.page_size(),
        }
    }
}

/// Detail page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub book: Audiobook,
    pub related: Vec<Audiobook>,
    pub is_favorite: bool,
}

// =============================================================================
// Browse
// =============================================================================

fn current_page(catalog: &CatalogState, browse: &BrowseState) -> Result<BookPageResponse, ApiError> {
    let page = browse.current_page(catalog.inner())?;
    Ok(BookPageResponse::new(page, browse))
}

/// Applies the filter bar and returns the resulting page.
///
/// ## Behavior
/// - Any filter change resets to page 1
/// - `page` is applied after the filters, so an explicit page wins
/// - Invalid input (unknown sort, page 0) leaves the browse state untouched
pub fn browse_books(
    catalog: &CatalogState,
    browse: &BrowseHolder,
    request: BrowseRequest,
) -> Result<BookPageResponse, ApiError> {
    debug!(
        search = ?request.search,
        genre = ?request.genre,
        sort = ?request.sort,
        page = ?request.page,
        "browse_books command"
    );

    browse.with_browse_mut(|state| {
        let mut next = state.clone();
        if let Some(page_size) = request.page_size {
            next.set_page_size(page_size)?;
        }
        if let Some(search) = &request.search {
            next.set_search(search)?;
        }
        if let Some(genre) = &request.genre {
            next.set_genre(genre);
        }
        if let Some(sort) = &request.sort {
            next.set_sort(sort)?;
        }
        if let Some(page) = request.page {
            next.set_page(page)?;
        }

        let response = current_page(catalog, &next)?;
        *state = next;
        Ok(response)
    })
}

/// Reveals the next `page_size` books.
pub fn load_more(catalog: &CatalogState, browse: &BrowseHolder) -> Result<BookPageResponse, ApiError> {
    debug!("load_more command");

    browse.with_browse_mut(|state| {
        state.load_more();
        current_page(catalog, state)
    })
}

/// Resets search, genre and sort. The page size is kept.
pub fn clear_filters(
    catalog: &CatalogState,
    browse: &BrowseHolder,
) -> Result<BookPageResponse, ApiError> {
    debug!("clear_filters command");

    browse.with_browse_mut(|state| {
        state.clear_filters();
        current_page(catalog, state)
    })
}

// =============================================================================
// Lookup
// =============================================================================

/// Book detail with related titles and the caller's favorite flag.
///
/// ## Arguments
/// * `id` - Audiobook id
///
/// ## Returns
/// * `NOT_FOUND` when the id is unknown
pub fn get_book_detail(
    catalog: &CatalogState,
    favorites: &FavoritesState,
    id: &str,
) -> Result<BookDetailResponse, ApiError> {
    debug!(id = %id, "get_book_detail command");

    let book = catalog.inner().get_by_id(id)?;
    let related = catalog.inner().related(id, RELATED_BOOKS_LIMIT);

    Ok(BookDetailResponse {
        is_favorite: favorites.contains(&book.id),
        book,
        related,
    })
}

/// Books flagged as featured, for the home page hero.
pub fn featured_books(catalog: &CatalogState) -> Vec<Audiobook> {
    debug!("featured_books command");
    catalog.inner().featured()
}

/// The "popular right now" strip.
pub fn popular_books(catalog: &CatalogState) -> Vec<Audiobook> {
    debug!("popular_books command");
    catalog.inner().popular(POPULAR_BOOKS_LIMIT)
}

/// Genre dropdown values, "All" first.
pub fn list_genres(catalog: &CatalogState) -> Vec<String> {
    debug!("list_genres command");
    catalog.inner().genres()
}
