//! # Catalog
//!
//! The fixed set of audiobooks the storefront sells, plus the lookups the
//! book detail and home pages need.
//!
//! ## Lookups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_by_id("4")      ──► Dune                 (or NotFound)             │
//! │  featured()          ──► every book with featured = true                │
//! │  popular(4)          ──► first 4 books, catalog order                   │
//! │  related("4", 4)     ──► same genre OR same author, excluding "4"       │
//! │  genres()            ──► ["All", "Fiction", "Science Fiction", ...]     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All lookups preserve catalog order and return owned copies; the catalog
//! itself is never mutated after construction.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Audiobook, Genre, ListeningTime, GENRE_ALL};

/// Default number of related books on the detail page.
pub const RELATED_BOOKS_LIMIT: usize = 4;

/// Default number of books in the home page "popular" strip.
pub const POPULAR_BOOKS_LIMIT: usize = 4;

/// An immutable, ordered collection of audiobooks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Audiobook>,
}

impl Catalog {
    /// Wraps an existing list of books. Order is significant: it is the
    /// tie-breaker for every sort and the order of every lookup.
    pub fn new(books: Vec<Audiobook>) -> Self {
        Catalog { books }
    }

    /// The built-in storefront catalog.
    pub fn builtin() -> Self {
        Catalog::new(seed_books())
    }

    /// All books, catalog order.
    pub fn books(&self) -> &[Audiobook] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Looks a book up by id.
    pub fn get_by_id(&self, id: &str) -> CoreResult<Audiobook> {
        self.find(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Audiobook", id))
    }

    fn find(&self, id: &str) -> Option<&Audiobook> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Featured books, catalog order.
    pub fn featured(&self) -> Vec<Audiobook> {
        self.books.iter().filter(|b| b.featured).cloned().collect()
    }

    /// The first `limit` books.
    pub fn popular(&self, limit: usize) -> Vec<Audiobook> {
        self.books.iter().take(limit).cloned().collect()
    }

    /// Books sharing a genre or an author with `id`, excluding `id` itself.
    ///
    /// An unknown id yields an empty list rather than an error: the detail
    /// page has already rendered its own "not found" state by then.
    pub fn related(&self, id: &str, limit: usize) -> Vec<Audiobook> {
        let Some(target) = self.find(id) else {
            return Vec::new();
        };

        self.books
            .iter()
            .filter(|b| b.id != target.id)
            .filter(|b| b.genre == target.genre || b.author == target.author)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Filter dropdown values: the "All" sentinel, then every genre label.
    pub fn genres(&self) -> Vec<String> {
        std::iter::once(GENRE_ALL)
            .chain(Genre::ALL.iter().map(Genre::label))
            .map(str::to_string)
            .collect()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn book(
    id: &str,
    title: &str,
    author: &str,
    narrator: &str,
    description: &str,
    slug: &str,
    price_cents: i64,
    duration: &str,
    genre: Genre,
    rating: f32,
    review_count: u32,
    published_date: NaiveDate,
    featured: bool,
) -> Audiobook {
    Audiobook {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        narrator: narrator.to_string(),
        description: description.to_string(),
        cover: format!("/covers/{slug}.jpg"),
        price: Money::from_cents(price_cents),
        duration: ListeningTime::parse(duration),
        genre,
        rating,
        review_count,
        sample: format!("sample-{slug}.mp3"),
        published_date,
        featured,
    }
}

fn seed_books() -> Vec<Audiobook> {
    vec![
        book(
            "1",
            "The Midnight Library",
            "Matt Haig",
            "Carey Mulligan",
            "Between life and death there is a library, and within that library, the shelves \
             go on forever. Every book provides a chance to try another life you could have lived.",
            "midnight-library",
            1999,
            "8h 32m",
            Genre::Fiction,
            4.8,
            12847,
            date(2020, 8, 13),
            true,
        ),
        book(
            "2",
            "Atomic Habits",
            "James Clear",
            "James Clear",
            "An easy and proven way to build good habits and break bad ones. A framework for \
             improving every day.",
            "atomic-habits",
            2499,
            "5h 35m",
            Genre::SelfHelp,
            4.9,
            28492,
            date(2018, 10, 16),
            true,
        ),
        book(
            "3",
            "The Seven Husbands of Evelyn Hugo",
            "Taylor Jenkins Reid",
            "Alma Cuervo, Julia Whelan, Robin Miles",
            "Reclusive Hollywood icon Evelyn Hugo is finally ready to tell the truth about her \
             glamorous and scandalous life.",
            "evelyn-hugo",
            2199,
            "12h 10m",
            Genre::Romance,
            4.7,
            15673,
            date(2017, 6, 13),
            false,
        ),
        book(
            "4",
            "Dune",
            "Frank Herbert",
            "Scott Brick, Orlagh Cassidy, Euan Morton",
            "Set on the desert planet Arrakis, Dune is the story of Paul Atreides, heir to a \
             noble family tasked with ruling an inhospitable world.",
            "dune",
            2999,
            "21h 2m",
            Genre::ScienceFiction,
            4.6,
            8924,
            date(1965, 8, 1),
            true,
        ),
        book(
            "5",
            "Educated",
            "Tara Westover",
            "Julia Whelan",
            "A memoir about a young girl who, kept out of school, leaves her survivalist family \
             and goes on to earn a PhD from Cambridge University.",
            "educated",
            2299,
            "12h 10m",
            Genre::Biography,
            4.8,
            19847,
            date(2018, 2, 20),
            false,
        ),
        book(
            "6",
            "The Thursday Murder Club",
            "Richard Osman",
            "Lesley Manville",
            "In a peaceful retirement village, four unlikely friends meet weekly to investigate \
             cold cases, until a local developer is found dead.",
            "thursday-murder-club",
            1899,
            "9h 25m",
            Genre::Mystery,
            4.5,
            11234,
            date(2020, 9, 3),
            false,
        ),
        book(
            "7",
            "Sapiens",
            "Yuval Noah Harari",
            "Derek Perkins",
            "A brief history of humankind. How did our species succeed in the battle for \
             dominance, and why did our foraging ancestors come together to create cities?",
            "sapiens",
            2699,
            "15h 17m",
            Genre::History,
            4.7,
            22183,
            date(2014, 9, 4),
            false,
        ),
        book(
            "8",
            "Project Hail Mary",
            "Andy Weir",
            "Ray Porter",
            "Ryland Grace is the sole survivor on a desperate, last-chance mission, and if he \
             fails, humanity and the earth itself will perish.",
            "project-hail-mary",
            2399,
            "16h 10m",
            Genre::ScienceFiction,
            4.9,
            16742,
            date(2021, 5, 4),
            true,
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(books: &[Audiobook]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog_is_well_formed() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);

        let mut seen: Vec<&str> = ids(catalog.books());
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 8, "catalog ids must be unique");

        assert!(catalog
            .books()
            .iter()
            .all(|b| b.duration.minutes() > 0 && (0.0..=5.0).contains(&b.rating)));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::builtin();
        let dune = catalog.get_by_id("4").unwrap();
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.duration.minutes(), 21 * 60 + 2);

        let err = catalog.get_by_id("missing").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn test_featured_preserves_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.featured()), vec!["1", "2", "4", "8"]);
    }

    #[test]
    fn test_popular_takes_prefix() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.popular(POPULAR_BOOKS_LIMIT)), vec!["1", "2", "3", "4"]);
        assert_eq!(catalog.popular(100).len(), 8);
    }

    #[test]
    fn test_related_by_genre() {
        let catalog = Catalog::builtin();
        // Dune and Project Hail Mary are both Science Fiction.
        assert_eq!(ids(&catalog.related("4", RELATED_BOOKS_LIMIT)), vec!["8"]);
        assert_eq!(ids(&catalog.related("8", RELATED_BOOKS_LIMIT)), vec!["4"]);
    }

    #[test]
    fn test_related_by_author_and_limit() {
        let base = Catalog::builtin().books()[0].clone();
        let mut books = Vec::new();
        for (i, genre) in [Genre::Fiction, Genre::Thriller, Genre::Fantasy, Genre::Fiction]
            .into_iter()
            .enumerate()
        {
            let mut b = base.clone();
            b.id = format!("b{i}");
            b.genre = genre;
            books.push(b);
        }
        let mut other = base.clone();
        other.id = "other".to_string();
        other.author = "Someone Else".to_string();
        other.genre = Genre::History;
        books.push(other);

        let catalog = Catalog::new(books);
        // Same author covers b1/b2 even though the genre differs.
        assert_eq!(ids(&catalog.related("b0", 4)), vec!["b1", "b2", "b3"]);
        assert_eq!(ids(&catalog.related("b0", 2)), vec!["b1", "b2"]);
        assert!(catalog.related("other", 4).is_empty());
    }

    #[test]
    fn test_related_unknown_id_is_empty() {
        assert!(Catalog::builtin().related("nope", 4).is_empty());
    }

    #[test]
    fn test_genres_start_with_sentinel() {
        let genres = Catalog::builtin().genres();
        assert_eq!(genres.first().map(String::as_str), Some(GENRE_ALL));
        assert_eq!(genres.len(), Genre::ALL.len() + 1);
        assert!(genres.contains(&"Science Fiction".to_string()));
    }
}
