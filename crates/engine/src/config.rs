//! Store configuration via `eav.toml`
//!
//! A store reads its settings from an `eav.toml` in the data directory. A
//! missing file means defaults; a malformed file is a configuration error,
//! not a silent fallback.

use eav_core::{EavError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name placed in the store data directory.
pub const CONFIG_FILE_NAME: &str = "eav.toml";

/// Store configuration loaded from `eav.toml`.
///
/// # Example
///
/// ```toml
/// # When a relation declares an inverse attribute and the related object
/// # has never populated it, create the inverse value on the fly (default)
/// # instead of failing the write.
/// auto_create_inverse = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Create a missing inverse-side Value transparently when maintaining a
    /// bidirectional relation. With `false`, linking through an attribute
    /// whose inverse Value does not exist is a schema error.
    #[serde(default = "default_auto_create_inverse")]
    pub auto_create_inverse: bool,
}

fn default_auto_create_inverse() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            auto_create_inverse: default_auto_create_inverse(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from `eav.toml` in the given directory
    ///
    /// A missing file yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EavError::Config(e.to_string()))
    }
}
