//! The per-kind adapter seam
//!
//! Each restriction kind implements the same small capability set: render a
//! desired token, read the actual state back from the OS, and commit a diff.
//! The engine stays kind-agnostic by driving adapters through this trait.

use std::fmt;

use crate::diff::Diff;
use crate::error::{Error, Failures, Result};
use crate::kind::RestrictionKind;

/// Reads and mutates the OS resource behind one restriction kind.
pub trait Adapter {
    /// The rendered restriction; equality drives the diff.
    type Entry: Clone + PartialEq + fmt::Debug;

    /// The kind this adapter serves.
    const KIND: RestrictionKind;

    /// Render a desired token into the entry it would produce on disk.
    fn render(&self, token: &str) -> Self::Entry;

    /// Read the actual entries from the OS.
    ///
    /// Unreadable sources are reported in [`Synced::failures`] as long as at
    /// least one entry was recovered; otherwise the call fails.
    fn sync(&self) -> Result<Synced<Self::Entry>>;

    /// Apply a diff: deletions first, then missing entries.
    fn commit(&self, diff: &Diff<Self::Entry>) -> Result<CommitReport>;
}

/// Actual state recovered by an adapter sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Synced<T> {
    /// Entries found, in discovery order
    pub entries: Vec<T>,
    /// Sources that could not be read or parsed
    pub failures: Failures,
}

impl<T> Synced<T> {
    /// A sync where every source was readable.
    pub fn complete(entries: Vec<T>) -> Self {
        Self {
            entries,
            failures: Failures::new(),
        }
    }

    /// Escalate to a hard failure when nothing was recovered from failing sources.
    pub fn into_result(self) -> Result<Self> {
        if !self.failures.is_empty() && self.entries.is_empty() {
            return Err(Error::Unreadable(self.failures));
        }
        Ok(self)
    }
}

/// What a commit did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Number of entries successfully applied
    pub committed: usize,
    /// Human-readable description of each applied change
    pub actions: Vec<String>,
}

impl CommitReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one applied change.
    pub fn applied(&mut self, action: impl Into<String>) {
        self.committed += 1;
        self.actions.push(action.into());
    }

    /// Turn the per-entry failures into the commit's overall outcome.
    ///
    /// No failures is success. Failures alongside at least one applied change
    /// is a partial commit; failures with nothing applied is a plain failure.
    pub fn conclude(self, failures: Failures) -> Result<CommitReport> {
        if failures.is_empty() {
            Ok(self)
        } else if self.committed > 0 {
            Err(Error::PartialCommit {
                committed: self.committed,
                failures,
            })
        } else {
            Err(Error::Commit(failures))
        }
    }
}
