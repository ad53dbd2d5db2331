//! Plugin registration metadata.
//!
//! The dispatcher this service registers against only needs a name and a
//! human-readable description; both are static.

use serde::Serialize;

/// This plugin's registered name.
pub const PLUGIN_NAME: &str = "owners-label";

/// Static help surface for the plugin.
#[derive(Debug, Clone, Serialize)]
pub struct PluginHelp {
    /// Registered plugin name
    pub name: &'static str,
    /// What the plugin does
    pub description: &'static str,
}

/// The plugin's registration metadata.
#[must_use]
pub const fn help() -> PluginHelp {
    PluginHelp {
        name: PLUGIN_NAME,
        description: "Automatically applies labels to pull requests based on the files they \
                      touch. The labels sections of OWNERS files determine which labels apply \
                      to the changes.",
    }
}
