//! # Domain Types
//!
//! Core domain types used throughout AudioBook Nexus.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Audiobook     │   │     Genre       │   │  ListeningTime  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Fiction        │   │  minutes (u32)  │       │
//! │  │  title/author   │   │  Science Fiction│   │  "8h 32m" text  │       │
//! │  │  price (Money)  │   │  Self-Help ...  │   │  parsed once    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      User       │   │  AuthProvider   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id / email     │   │  Email          │                             │
//! │  │  name / avatar  │   │  Google         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog records are immutable once built. Everything that was free text in
//! the storefront's data files (duration, genre, published date) is parsed
//! into a typed value at ingestion.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

/// Sentinel genre value meaning "no genre restriction".
pub const GENRE_ALL: &str = "All";

// =============================================================================
// Genre
// =============================================================================

/// The enumerated set of catalog genres.
///
/// Serialized with the same display labels the filter dropdown uses, so a
/// snapshot or a query string can carry `"Science Fiction"` verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Romance,
    Mystery,
    Biography,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    History,
    Fantasy,
    Thriller,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Genre {
    /// Every genre, in the order the filter dropdown lists them.
    pub const ALL: [Genre; 10] = [
        Genre::Fiction,
        Genre::ScienceFiction,
        Genre::Romance,
        Genre::Mystery,
        Genre::Biography,
        Genre::SelfHelp,
        Genre::History,
        Genre::Fantasy,
        Genre::Thriller,
        Genre::NonFiction,
    ];

    /// Display label, also the exact-match key for genre filtering.
    pub const fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Romance => "Romance",
            Genre::Mystery => "Mystery",
            Genre::Biography => "Biography",
            Genre::SelfHelp => "Self-Help",
            Genre::History => "History",
            Genre::Fantasy => "Fantasy",
            Genre::Thriller => "Thriller",
            Genre::NonFiction => "Non-Fiction",
        }
    }

    /// Looks a genre up by its exact label.
    pub fn from_label(label: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::from_label(s.trim())
            .ok_or_else(|| CoreError::invalid_argument("genre", format!("unknown genre '{s}'")))
    }
}

// =============================================================================
// Listening Time
// =============================================================================

/// Length of an audiobook in whole minutes.
///
/// ## Parsing
/// ```text
/// "8h 32m"  ──► 512
/// "21h 2m"  ──► 1262
/// "5h35m"   ──► 335   (whitespace between parts is optional)
/// "approx." ──► 0     (unparseable text sorts first)
/// ```
///
/// Serialized back as `"<H>h <M>m"` text so snapshots stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ListeningTime(u32);

impl ListeningTime {
    /// Creates a listening time from minutes.
    #[inline]
    pub const fn from_minutes(minutes: u32) -> Self {
        ListeningTime(minutes)
    }

    /// Parses the first `<digits>h<spaces><digits>m` occurrence in `text`.
    ///
    /// Returns zero minutes when no such occurrence exists.
    pub fn parse(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if !bytes[i].is_ascii_digit() {
                i += 1;
                continue;
            }

            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }

            if let Some(minutes) = Self::hours_then_minutes(&text[start..i], &text[i..]) {
                return ListeningTime(minutes);
            }
        }

        ListeningTime(0)
    }

    /// `hours` is a run of digits, `rest` is whatever follows it.
    fn hours_then_minutes(hours: &str, rest: &str) -> Option<u32> {
        let rest = rest.strip_prefix('h')?.trim_start();
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || !rest[digits..].starts_with('m') {
            return None;
        }

        let hours: u32 = hours.parse().ok()?;
        let minutes: u32 = rest[..digits].parse().ok()?;
        Some(hours.saturating_mul(60).saturating_add(minutes))
    }

    /// Total minutes.
    #[inline]
    pub const fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ListeningTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ListeningTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ListeningTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(ListeningTime::parse(&text))
    }
}

// =============================================================================
// Audiobook
// =============================================================================

/// A catalog record.
///
/// Owned by the catalog and never mutated after construction. Carts hold a
/// cloned snapshot so a persisted cart still renders if the catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Audiobook {
    /// Unique catalog identifier.
    pub id: String,
    pub title: String,
    pub author: String,
    /// One or more narrators, comma separated.
    pub narrator: String,
    pub description: String,
    /// Cover image reference.
    pub cover: String,
    pub price: Money,
    #[ts(type = "string")]
    pub duration: ListeningTime,
    pub genre: Genre,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    pub review_count: u32,
    /// Audio sample reference.
    pub sample: String,
    pub published_date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
}

impl Audiobook {
    /// Whether `needle` (already lowercased) occurs in title, author,
    /// narrator or genre label, ignoring case.
    pub fn matches_search(&self, needle: &str) -> bool {
        [
            self.title.as_str(),
            self.author.as_str(),
            self.narrator.as_str(),
            self.genre.label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

// =============================================================================
// Users
// =============================================================================

/// How a user signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AuthProvider {
    Email,
    Google,
}

/// A signed-in storefront user.
///
/// Opaque to the cart and catalog; only the session cares about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub provider: AuthProvider,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_labels_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_label(genre.label()), Some(genre));
        }
        assert_eq!(Genre::from_label("science fiction"), None);
        assert!("Self-Help".parse::<Genre>().is_ok());
        assert!("Poetry".parse::<Genre>().is_err());
    }

    #[test]
    fn test_genre_serializes_as_label() {
        let json = serde_json::to_string(&Genre::ScienceFiction).unwrap();
        assert_eq!(json, "\"Science Fiction\"");
        let back: Genre = serde_json::from_str("\"Non-Fiction\"").unwrap();
        assert_eq!(back, Genre::NonFiction);
    }

    #[test]
    fn test_listening_time_parse() {
        assert_eq!(ListeningTime::parse("8h 32m").minutes(), 512);
        assert_eq!(ListeningTime::parse("21h 2m").minutes(), 1262);
        assert_eq!(ListeningTime::parse("5h35m").minutes(), 335);
        assert_eq!(ListeningTime::parse("about 12h 10m total").minutes(), 730);
    }

    #[test]
    fn test_listening_time_unparseable_is_zero() {
        assert_eq!(ListeningTime::parse("").minutes(), 0);
        assert_eq!(ListeningTime::parse("8 hours").minutes(), 0);
        assert_eq!(ListeningTime::parse("8h").minutes(), 0);
        assert_eq!(ListeningTime::parse("h 30m").minutes(), 0);
    }

    #[test]
    fn test_listening_time_skips_non_matching_prefix() {
        // "2024" is not followed by 'h', so parsing continues to "3h 5m".
        assert_eq!(ListeningTime::parse("2024 edition, 3h 5m").minutes(), 185);
    }

    #[test]
    fn test_listening_time_serde() {
        let time = ListeningTime::from_minutes(512);
        assert_eq!(time.to_string(), "8h 32m");
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"8h 32m\"");
        let back: ListeningTime = serde_json::from_str("\"16h 10m\"").unwrap();
        assert_eq!(back.minutes(), 970);
    }
}
