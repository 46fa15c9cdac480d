//! Site and theme configuration.
//!
//! [`SiteConfig`] carries the handful of facts the renderers need from the
//! surrounding site: where the site lives, where the active theme's assets are
//! served from, which style assets were already printed, and the naming rules
//! that decide which blocks are first-party.
//!
//! Every field has a default, so a partial YAML document is enough:
//!
//! ```yaml
//! site_url: https://example.com
//! stylesheet_directory_uri: https://example.com/wp-content/themes/twentytwentytwo
//! emitted_styles:
//!   - wp-block-query
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Naming rules for block types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlockNaming {
    /// Prefix reserved for first-party blocks.
    pub core_prefix: String,
    /// Name of the paginated listing block.
    pub query_block: String,
    /// Name of the block that injects arbitrary post content.
    pub post_content_block: String,
    /// Style handle attached to the query block type while it is interactive.
    pub query_style_asset: String,
}

impl Default for BlockNaming {
    fn default() -> Self {
        Self {
            core_prefix: "core/".to_string(),
            query_block: "core/query".to_string(),
            post_content_block: "core/post-content".to_string(),
            query_style_asset: "wp-block-query".to_string(),
        }
    }
}

impl BlockNaming {
    /// Returns true if a block of this type may live inside an enhanced query
    /// without disabling its client-side navigation.
    pub fn is_compatible(&self, block_name: &str) -> bool {
        block_name.starts_with(&self.core_prefix) && block_name != self.post_content_block
    }
}

/// Configuration shared by the font and block renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public URL of the site, e.g. `https://example.com`.
    pub site_url: String,
    /// Public URL of the active theme's directory. `file:./` font sources
    /// resolve against it.
    pub stylesheet_directory_uri: String,
    /// Style handles the page has already printed.
    pub emitted_styles: BTreeSet<String>,
    pub blocks: BlockNaming,
}

impl SiteConfig {
    pub fn new(site_url: impl Into<String>, stylesheet_directory_uri: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            stylesheet_directory_uri: stylesheet_directory_uri.into(),
            ..Self::default()
        }
    }

    /// Marks a style handle as already printed, returning the updated config.
    pub fn with_emitted_style(mut self, handle: impl Into<String>) -> Self {
        self.emitted_styles.insert(handle.into());
        self
    }

    /// Returns true if the style handle was already printed on this page.
    pub fn is_style_emitted(&self, handle: &str) -> bool {
        self.emitted_styles.contains(handle)
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(source).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&source).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }
}

/// Error loading a [`SiteConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Read { path: PathBuf, message: String },
    /// The configuration text is not valid YAML for [`SiteConfig`].
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "failed to read config \"{}\": {}", path.display(), message)
            }
            ConfigError::Parse {
                path: Some(path),
                message,
            } => {
                write!(f, "invalid config \"{}\": {}", path.display(), message)
            }
            ConfigError::Parse {
                path: None,
                message,
            } => write!(f, "invalid config: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}
