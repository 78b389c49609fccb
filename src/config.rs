//! Store configuration.

use serde::{Deserialize, Serialize};

/// Options governing a [`FrameStore`](crate::FrameStore)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Purge a removed frame from every frameset's membership set.
    ///
    /// Off by default: membership is not referentially enforced, and a
    /// removed frame leaves stale entries behind until explicitly
    /// excluded.
    #[serde(default)]
    pub purge_members_on_remove: bool,

    /// Logging configuration applied by [`logging::init_logging`](crate::logging::init_logging).
    #[serde(default)]
    pub logging: crate::logging::LoggingConfig,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            purge_members_on_remove: false,
            logging: crate::logging::LoggingConfig::default(),
        }
    }
}

impl StoreOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}
