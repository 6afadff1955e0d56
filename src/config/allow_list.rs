//! Allow-list loading from disk.
//!
//! # Responsibilities
//! - Read the flat allow-list file (one address prefix per line)
//! - Skip blank lines and `#` comment lines
//! - Preserve entry order
//!
//! # Design Decisions
//! - The list is built once at startup and never mutated afterwards, so it
//!   is shared across handler tasks behind a plain `Arc` with no lock
//! - Entries are stored as the raw line text; comment/blank detection looks
//!   at the trimmed line, but no trimming is applied to kept entries

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for allow-list loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the allow-list file.
    #[error("failed to read allow-list file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered set of address prefixes permitted to issue proxied requests.
///
/// Matching against this list is lexical starts-with comparison, not CIDR
/// arithmetic; see [`crate::security::access_control::is_allowed`].
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    prefixes: Vec<String>,
}

impl AllowList {
    /// Load the allow-list from a flat text file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parse allow-list entries out of file content.
    pub fn parse(content: &str) -> Self {
        let prefixes = content
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .map(str::to_string)
            .collect();
        Self { prefixes }
    }

    /// Build an allow-list from pre-collected prefixes.
    pub fn from_prefixes(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// An empty allow-list: only the unconditional loopback bypass applies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The configured prefixes, in file order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }
}
