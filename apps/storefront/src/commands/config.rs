//! # Config Commands
//!
//! Read-only access to the storefront configuration.

use tracing::debug;

use crate::state::StorefrontConfig;

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Startup (store name in the header)
/// - Currency formatting in the view
/// - `nexus config` for checking which database file is in use
pub fn get_config(config: &StorefrontConfig) -> StorefrontConfig {
    debug!("get_config command");
    let mut config = config.clone();
    config.database_path = config.resolve_database_path();
    config
}
