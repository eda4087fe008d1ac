//! Error types for dnd-core

use std::fmt;
use std::path::PathBuf;

use crate::kind::RestrictionKind;

/// Result type for dnd-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// One thing that went wrong while syncing or committing a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// What failed: a file, a label, a pattern
    pub subject: String,
    /// Why it failed
    pub reason: String,
}

impl Failure {
    pub fn new(subject: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            subject: subject.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.reason)
    }
}

/// A joined list of per-entry failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failures(Vec<Failure>);

impl Failures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: Failure) {
        self.0.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.0.iter()
    }
}

impl fmt::Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl FromIterator<Failure> for Failures {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Failures {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors that can occur in dnd-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The current platform lacks a facility the operation needs
    #[error("{operation} is not implemented on this platform")]
    NotImplemented { operation: &'static str },

    /// The actual state could not be determined; diffing must not proceed
    #[error("failed to synchronize actual state of {kind} restrictions: {source}")]
    SyncFailed {
        kind: RestrictionKind,
        #[source]
        source: Box<Error>,
    },

    /// Every source of actual state failed and nothing was recovered
    #[error("no restriction could be recovered: {0}")]
    Unreadable(Failures),

    /// Some sources of actual state were unreadable, the rest were recovered
    #[error("partially synchronized state: {0}")]
    PartialSync(Failures),

    /// Some entries were applied, others failed; commit may be re-run
    #[error("partially committed state, {committed} change(s) applied: {failures}")]
    PartialCommit { committed: usize, failures: Failures },

    /// No entry could be applied
    #[error("commit failed: {0}")]
    Commit(Failures),

    /// The OS scheduler rejected a request
    #[error("`{command}` failed: {output}")]
    Scheduler { command: String, output: String },

    /// Unknown restriction kind name
    #[error("invalid restriction kind: {0}")]
    InvalidKind(String),

    /// Configuration file exists but cannot be parsed
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// No home directory to anchor per-user paths
    #[error("could not determine the home directory")]
    HomeNotFound,

    /// Filesystem error from dnd-fs
    #[error(transparent)]
    Fs(#[from] dnd_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the warning-level condition that still comes with a usable result.
    pub fn is_partial_sync(&self) -> bool {
        matches!(self, Self::PartialSync(_))
    }

    /// True when a commit left the system in a mixed state.
    pub fn is_partial_commit(&self) -> bool {
        matches!(self, Self::PartialCommit { .. })
    }

    /// True for an environment capability gap, never worth retrying.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}
