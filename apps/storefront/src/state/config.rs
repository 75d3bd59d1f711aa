//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. CLI flags (`--db`)
//! 2. Environment variables (`NEXUS_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use directories::ProjectDirs;
use nexus_core::{Money, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// File name of the snapshot database inside the data directory.
pub const DATABASE_FILE: &str = "nexus.db";

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Store name shown in headers and the CLI banner.
    pub store_name: String,

    /// Snapshot database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Books per "load more" step on the browse page.
    pub page_size: usize,

    /// Whether logging out empties the cart and favorites.
    pub clear_cart_on_logout: bool,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Page size: 8
    /// - Logout clears cart and favorites
    /// - Currency: `$`
    fn default() -> Self {
        StorefrontConfig {
            store_name: "AudioBook Nexus".to_string(),
            database_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            clear_cart_on_logout: true,
            currency_symbol: "$".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `NEXUS_DB_PATH`: snapshot database file
    /// - `NEXUS_PAGE_SIZE`: positive integer
    /// - `NEXUS_CLEAR_CART_ON_LOGOUT`: `true`/`false`/`1`/`0`
    /// - `NEXUS_CURRENCY_SYMBOL`: display symbol
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StorefrontConfig::default();

        if let Some(path) = lookup("NEXUS_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup("NEXUS_PAGE_SIZE") {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => warn!(value = %raw, "Ignoring invalid NEXUS_PAGE_SIZE"),
            }
        }

        if let Some(raw) = lookup("NEXUS_CLEAR_CART_ON_LOGOUT") {
            match parse_flag(&raw) {
                Some(flag) => config.clear_cart_on_logout = flag,
                None => warn!(value = %raw, "Ignoring invalid NEXUS_CLEAR_CART_ON_LOGOUT"),
            }
        }

        if let Some(symbol) = lookup("NEXUS_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Overrides the database path (from `--db`).
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.database_path = path;
        }
        self
    }

    /// Resolves the snapshot database file.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.audiobook-nexus.nexus/nexus.db`
    /// - **Windows**: `%APPDATA%\audiobook-nexus\nexus\data\nexus.db`
    /// - **Linux**: `~/.local/share/nexus/nexus.db`
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn resolve_database_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.database_path {
            return Some(path.clone());
        }

        ProjectDirs::from("com", "audiobook-nexus", "nexus")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> StorefrontConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.page_size, 8);
        assert!(config.clear_cart_on_logout);
        assert_eq!(config.currency_symbol, "$");
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from(&[
            ("NEXUS_DB_PATH", "/tmp/nexus.db"),
            ("NEXUS_PAGE_SIZE", "12"),
            ("NEXUS_CLEAR_CART_ON_LOGOUT", "false"),
            ("NEXUS_CURRENCY_SYMBOL", "€"),
        ]);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/nexus.db")));
        assert_eq!(config.page_size, 12);
        assert!(!config.clear_cart_on_logout);
        assert_eq!(config.format_currency(Money::from_cents(1999)), "€19.99");
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = config_from(&[
            ("NEXUS_PAGE_SIZE", "0"),
            ("NEXUS_CLEAR_CART_ON_LOGOUT", "sometimes"),
        ]);
        assert_eq!(config.page_size, 8);
        assert!(config.clear_cart_on_logout);
    }

    #[test]
    fn test_cli_path_wins() {
        let config = config_from(&[("NEXUS_DB_PATH", "/tmp/env.db")])
            .with_database_path(Some(PathBuf::from("/tmp/flag.db")));
        assert_eq!(config.resolve_database_path(), Some(PathBuf::from("/tmp/flag.db")));

        let config = config_from(&[("NEXUS_DB_PATH", "/tmp/env.db")]).with_database_path(None);
        assert_eq!(config.resolve_database_path(), Some(PathBuf::from("/tmp/env.db")));
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(0)), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}
