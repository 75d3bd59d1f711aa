//! # Query Engine
//!
//! Search, genre filter, sort and "load more" pagination over the catalog.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Browse Page Query                                │
//! │                                                                         │
//! │  catalog (8 books)                                                      │
//! │       │                                                                 │
//! │       ▼  search "weir"  → title / author / narrator / genre, any case   │
//! │  [Project Hail Mary]                                                    │
//! │       │                                                                 │
//! │       ▼  genre "All" or ""  → no filter;  "Mystery" → exact label       │
//! │       │                                                                 │
//! │       ▼  sort newest / title / author / price / rating / duration       │
//! │       │  (stable: catalog order breaks ties)                            │
//! │       ▼                                                                 │
//! │  paginate(page 2, size 8) → first 16 results, has_more                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The input slice is never reordered; every step works on an owned copy.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Audiobook, GENRE_ALL};

/// Page size the browse page starts with.
pub const DEFAULT_PAGE_SIZE: usize = 8;

// =============================================================================
// Sort Key
// =============================================================================

/// Ordering criterion for the browse page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortKey {
    /// Title, A to Z.
    Title,
    /// Author, A to Z.
    Author,
    /// Cheapest first.
    Price,
    /// Best rated first.
    Rating,
    /// Shortest first; unparsed durations count as zero.
    Duration,
    /// Most recently published first.
    #[default]
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Price,
        SortKey::Rating,
        SortKey::Duration,
        SortKey::Newest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Price => "price",
            SortKey::Rating => "rating",
            SortKey::Duration => "duration",
            SortKey::Newest => "newest",
        }
    }

    /// Comparator for this key. Callers must use a stable sort.
    fn compare(&self, a: &Audiobook, b: &Audiobook) -> Ordering {
        match self {
            SortKey::Title => compare_text(&a.title, &b.title),
            SortKey::Author => compare_text(&a.author, &b.author),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Duration => a.duration.cmp(&b.duration),
            SortKey::Newest => b.published_date.cmp(&a.published_date),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::invalid_argument("sort key", format!("unknown value '{wanted}'"))
            })
    }
}

/// Case-insensitive ordering with the raw text as tie-breaker, so "dune" and
/// "Dune" still have a deterministic order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// Query
// =============================================================================

/// A parsed browse-page query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudiobookQuery {
    /// Free-text search; trimmed before use.
    pub search: String,
    /// Genre label, or `"All"` / empty for no restriction.
    pub genre: String,
    pub sort: SortKey,
}

impl AudiobookQuery {
    /// Builds a query from raw UI values, rejecting an unknown sort key.
    pub fn parse(search: &str, genre: &str, sort_key: &str) -> CoreResult<Self> {
        Ok(AudiobookQuery {
            search: search.to_string(),
            genre: genre.to_string(),
            sort: sort_key.parse()?,
        })
    }

    /// The genre label to filter on, or `None` for the sentinels.
    fn genre_filter(&self) -> Option<&str> {
        let genre = self.genre.trim();
        if genre.is_empty() || genre == GENRE_ALL {
            None
        } else {
            Some(genre)
        }
    }

    /// Applies search, genre filter and sort to `books`.
    pub fn apply(&self, books: &[Audiobook]) -> Vec<Audiobook> {
        let needle = self.search.trim().to_lowercase();
        let genre = self.genre_filter();

        let mut result: Vec<Audiobook> = books
            .iter()
            .filter(|b| needle.is_empty() || b.matches_search(&needle))
            .filter(|b| genre.map_or(true, |g| b.genre.label() == g))
            .cloned()
            .collect();

        // Vec::sort_by is stable: equal keys keep catalog order.
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

/// Filters and sorts `books` from raw UI values.
///
/// ## Errors
/// `InvalidArgument` when `sort_key` is not one of
/// `title | author | price | rating | duration | newest`.
pub fn query(
    books: &[Audiobook],
    search: &str,
    genre: &str,
    sort_key: &str,
) -> CoreResult<Vec<Audiobook>> {
    Ok(AudiobookQuery::parse(search, genre, sort_key)?.apply(books))
}

// =============================================================================
// Pagination
// =============================================================================

/// A cumulative "load more" page.
///
/// Page `n` holds the first `n * page_size` results, not a disjoint window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_more: bool,
}

/// Slices `filtered` into the cumulative page `page` (1-based).
///
/// ## Errors
/// `InvalidArgument` when `page` or `page_size` is zero.
pub fn paginate<T: Clone>(filtered: &[T], page: usize, page_size: usize) -> CoreResult<Page<T>> {
    if page == 0 {
        return Err(CoreError::invalid_argument("page", "pages start at 1"));
    }
    if page_size == 0 {
        return Err(CoreError::invalid_argument("page size", "must be positive"));
    }

    let total_count = filtered.len();
    let visible = page.saturating_mul(page_size);

    Ok(Page {
        items: filtered[..visible.min(total_count)].to_vec(),
        total_count,
        total_pages: total_count.div_ceil(page_size),
        current_page: page,
        has_more: visible < total_count,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
