//! # Config Commands
//!
//! Host commands for retrieving application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (currency symbol, tax variant)
/// - Invoice preview (letterhead)
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
