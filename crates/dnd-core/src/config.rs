//! Desired-state persistence
//!
//! The configured restriction lists live in a small JSON document under the
//! user's config directory. Every save bumps a version counter; a successful
//! commit snapshots the lists that were applied.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE_MODE;
use crate::kind::RestrictionKind;
use crate::list::List;
use crate::{Error, Result};

/// The user's desired restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// The configuration as of the latest commit
    #[serde(default, alias = "LastCommited", skip_serializing_if = "Option::is_none")]
    pub last_committed: Option<Box<Config>>,
    /// Incremented on every save
    #[serde(default)]
    pub version: i64,
    /// Currently stored restrictions
    #[serde(default)]
    pub restrictions: BTreeMap<RestrictionKind, List>,
}

impl Config {
    /// Load the configuration, or `None` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match dnd_fs::read_text(path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Load the configuration, falling back to an empty one.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    /// Bump the version and write the configuration atomically.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.version += 1;
        let content = serde_json::to_string_pretty(self)?;
        dnd_fs::write_atomic(path, content.as_bytes(), CONFIG_FILE_MODE)?;
        tracing::debug!(path = %path.display(), version = self.version, "Saved config");
        Ok(())
    }

    /// The desired list for a kind (empty if none is configured).
    pub fn list(&self, kind: RestrictionKind) -> List {
        self.restrictions.get(&kind).cloned().unwrap_or_default()
    }

    /// Append an item to a kind's list.
    pub fn add(&mut self, kind: RestrictionKind, item: &str) {
        let list = self.list(kind).append(item);
        self.restrictions.insert(kind, list);
    }

    /// Remove every occurrence of `item` from a kind's list, dropping the
    /// list when it becomes empty. Returns the number of removed occurrences.
    pub fn remove(&mut self, kind: RestrictionKind, item: &str) -> usize {
        let Some(mut current) = self.restrictions.get(&kind).cloned() else {
            return 0;
        };

        let mut removed = 0;
        loop {
            let (next, deleted) = current.remove(item);
            if !deleted {
                break;
            }
            removed += 1;
            current = next;
        }

        if current.is_empty() {
            self.restrictions.remove(&kind);
        } else {
            self.restrictions.insert(kind, current);
        }
        removed
    }

    /// Record the current restrictions as the last committed state.
    pub fn mark_committed(&mut self) {
        self.last_committed = Some(Box::new(Config {
            last_committed: None,
            version: self.version,
            restrictions: self.restrictions.clone(),
        }));
    }
}
