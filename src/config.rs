//! Deck tooling configuration (mcdeck.yaml).
//!
//! Sets the column policy used when reading and writing decks, and extends
//! or overrides the setting keyword registry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};
use crate::parser::ReaderOptions;
use crate::registry::{KeywordRegistry, KeywordShape};
use crate::serializer::FormatOptions;

/// Shortest usable wrap width: the continuation indent plus one column.
const MIN_WRAP_COLUMNS: usize = 6;

/// Configuration loaded from mcdeck.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeckConfig {
    /// Longest line the reader accepts.
    #[serde(default = "default_read_columns")]
    pub read_columns: usize,

    /// Width at which the serializer wraps cards.
    #[serde(default = "default_wrap_columns")]
    pub wrap_columns: usize,

    /// Setting keywords added to (or replacing) the built-in table.
    #[serde(default)]
    pub keywords: Vec<KeywordShape>,
}

fn default_read_columns() -> usize {
    128
}

fn default_wrap_columns() -> usize {
    80
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            read_columns: default_read_columns(),
            wrap_columns: default_wrap_columns(),
            keywords: vec![],
        }
    }
}

impl DeckConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DeckError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| DeckError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check mcdeck.yaml syntax".to_string()),
        })?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.wrap_columns < MIN_WRAP_COLUMNS || self.wrap_columns > self.read_columns {
            return Err(DeckError::Config {
                message: format!(
                    "wrap-columns {} must be between {} and read-columns ({})",
                    self.wrap_columns, MIN_WRAP_COLUMNS, self.read_columns
                ),
                help: Some("Written decks must be readable with the same config".to_string()),
            });
        }
        Ok(())
    }

    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            max_columns: self.read_columns,
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            wrap_columns: self.wrap_columns,
            max_columns: self.read_columns,
        }
    }

    /// The built-in registry with this config's keywords applied on top.
    pub fn keyword_registry(&self) -> KeywordRegistry {
        let mut registry = KeywordRegistry::builtin();
        registry.extend(self.keywords.iter().cloned());
        registry
    }
}
