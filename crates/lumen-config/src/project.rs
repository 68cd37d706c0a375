//! Project configuration file (`docs.toml`).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use lumen_content::{CollectionLoader, PatternError, DOCS_BASE, DOCS_COLLECTION, DOCS_PATTERN};

use crate::ConfigError;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "docs.toml";

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub content: ContentConfig,
}

/// Where the docs collection lives and what it picks up.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentConfig {
    /// Collection base directory
    #[serde(default = "default_base")]
    pub base: String,

    /// Glob selecting collection files
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Include draft pages in the sidebar
    #[serde(default)]
    pub include_drafts: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            pattern: default_pattern(),
            include_drafts: false,
        }
    }
}

fn default_base() -> String {
    DOCS_BASE.to_string()
}

fn default_pattern() -> String {
    DOCS_PATTERN.to_string()
}

impl ProjectConfig {
    /// Load configuration from `path` if it exists.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: CONFIG_FILENAME.into(),
            message: e.to_string(),
        })
    }

    /// Build the docs collection loader, resolving `base` against `root`.
    pub fn docs_loader(&self, root: &Path) -> Result<CollectionLoader, PatternError> {
        CollectionLoader::new(
            DOCS_COLLECTION,
            root.join(&self.content.base),
            &self.content.pattern,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = ProjectConfig::load(&temp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.content.base, "./src/docs/data/docs");
        assert_eq!(config.content.pattern, "**/[^_]*{md,mdx}");
        assert!(!config.content.include_drafts);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config = ProjectConfig::parse("[content]\ninclude_drafts = true\n").unwrap();

        assert!(config.content.include_drafts);
        assert_eq!(config.content.pattern, DOCS_PATTERN);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[content\nbase = 3").unwrap();

        let err = ProjectConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { path: ref p, .. } if *p == path));
    }

    #[test]
    fn builds_loader_relative_to_root() {
        let config = ProjectConfig::parse("[content]\nbase = \"content\"\npattern = \"*.md\"").unwrap();

        let loader = config.docs_loader(Path::new("/site")).unwrap();

        assert_eq!(loader.name(), "docs");
        assert_eq!(loader.base(), Path::new("/site/content"));
        assert!(loader.pattern().matches("intro.md"));
        assert!(!loader.pattern().matches("guides/intro.md"));
    }
}
