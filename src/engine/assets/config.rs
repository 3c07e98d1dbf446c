// Asset configuration

use log::warn;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the asset root directory
pub const ASSET_ROOT_ENV: &str = "KOF_ASSET_ROOT";

/// Environment variable overriding the load wait, in milliseconds
pub const LOAD_TIMEOUT_ENV: &str = "KOF_LOAD_TIMEOUT_MS";

const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Where sprite sequences live and how long the launcher waits for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Directory that server-style URLs (`/static/...`) resolve against
    pub asset_root: PathBuf,
    /// How long to wait for outstanding loads before giving up
    pub load_timeout: Duration,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

impl AssetConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ASSET_ROOT_ENV).ok(),
            std::env::var(LOAD_TIMEOUT_ENV).ok(),
        )
    }

    fn from_vars(asset_root: Option<String>, load_timeout_ms: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(root) = asset_root.filter(|r| !r.trim().is_empty()) {
            config.asset_root = PathBuf::from(root);
        }

        if let Some(raw) = load_timeout_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.load_timeout = Duration::from_millis(ms),
                Err(e) => warn!(
                    "Ignoring {}={:?} ({}), using {:?}",
                    LOAD_TIMEOUT_ENV, raw, e, config.load_timeout
                ),
            }
        }

        config
    }
}
