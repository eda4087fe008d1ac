//! Desired restriction lists

use std::fmt;

use serde::{Deserialize, Serialize};

/// A comma separated list of restriction tokens (domains or application
/// patterns). Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct List(String);

impl List {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// The tokens of the list, trimmed, with empty tokens skipped.
    pub fn items(&self) -> Vec<String> {
        self.0
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// A new list with `value` appended.
    pub fn append(&self, value: &str) -> List {
        let mut items = self.items();
        let value = value.trim();
        if !value.is_empty() {
            items.push(value.to_string());
        }
        List(items.join(","))
    }

    /// A new list without the first occurrence of `value`, and whether
    /// anything was removed.
    pub fn remove(&self, value: &str) -> (List, bool) {
        let mut items = self.items();
        match items.iter().position(|item| item == value.trim()) {
            Some(idx) => {
                items.remove(idx);
                (List(items.join(",")), true)
            }
            None => (self.clone(), false),
        }
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for List {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for List {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
