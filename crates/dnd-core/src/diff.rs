//! Three-way diff between desired and actual restrictions
//!
//! One algorithm serves every kind: render each desired token, then bucket by
//! structural equality. Every desired entry lands in exactly one of matched or
//! missing; every actual entry in exactly one of matched or delete.

use std::fmt;

use crate::application::ApplicationRestriction;
use crate::domain::DomainRestriction;
use crate::error::{Error, Failures};
use crate::kind::RestrictionKind;

/// Diff of one kind's desired list against its actual state.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff<T> {
    /// Desired entries already present (the actual counterpart is kept, so
    /// OS-side metadata travels with it)
    pub matched: Vec<T>,
    /// Desired entries absent from the actual state
    pub missing: Vec<T>,
    /// Actual entries no longer desired
    pub delete: Vec<T>,
    /// Sources the sync could not read; non-empty means the diff was computed
    /// on a recovered subset
    pub sync_failures: Failures,
}

impl<T> Default for Diff<T> {
    fn default() -> Self {
        Self {
            matched: Vec::new(),
            missing: Vec::new(),
            delete: Vec::new(),
            sync_failures: Failures::new(),
        }
    }
}

impl<T> Diff<T> {
    /// True if committing would create or remove anything.
    pub fn has_changes(&self) -> bool {
        !self.missing.is_empty() || !self.delete.is_empty()
    }

    /// The partial-synchronization warning attached to this diff, if any.
    pub fn partial_sync(&self) -> Option<Error> {
        if self.sync_failures.is_empty() {
            None
        } else {
            Some(Error::PartialSync(self.sync_failures.clone()))
        }
    }
}

/// Compute the diff of `desired` tokens against `actual` entries.
///
/// `render` turns a token into its entry and `eq` decides structural equality.
/// Each desired entry claims an unclaimed equal actual entry when one is left;
/// repeated desired tokens share the entry claimed by the first. Actual entries
/// left unclaimed are deleted, including surplus copies of a desired entry.
/// Bucket order follows the desired list (matched, missing) and the discovery
/// order of the actual state (delete).
pub fn compute<T, R, E>(desired: &[String], actual: &[T], render: R, eq: E) -> Diff<T>
where
    T: Clone,
    R: Fn(&str) -> T,
    E: Fn(&T, &T) -> bool,
{
    let mut claimed = vec![false; actual.len()];
    let mut diff = Diff::default();

    for token in desired {
        let want = render(token);
        let equal: Vec<usize> = (0..actual.len()).filter(|&i| eq(&actual[i], &want)).collect();
        match equal.iter().find(|&&i| !claimed[i]).or(equal.first()) {
            Some(&i) => {
                claimed[i] = true;
                diff.matched.push(actual[i].clone());
            }
            None => diff.missing.push(want),
        }
    }

    diff.delete = actual
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(have, _)| have.clone())
        .collect();

    diff
}

/// A diff tagged with the kind it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffResult {
    Domain(Diff<DomainRestriction>),
    Application(Diff<ApplicationRestriction>),
}

impl DiffResult {
    pub fn kind(&self) -> RestrictionKind {
        match self {
            Self::Domain(_) => RestrictionKind::Domain,
            Self::Application(_) => RestrictionKind::Application,
        }
    }

    /// True if committing would change anything, including re-registering
    /// agents that are on disk but not running.
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Domain(diff) => diff.has_changes(),
            Self::Application(diff) => {
                diff.has_changes() || diff.matched.iter().any(|app| app.needs_registration())
            }
        }
    }

    pub fn partial_sync(&self) -> Option<Error> {
        match self {
            Self::Domain(diff) => diff.partial_sync(),
            Self::Application(diff) => diff.partial_sync(),
        }
    }

    /// Display strings of each bucket, for printing.
    pub fn summary(&self) -> DiffSummary {
        fn describe<T: fmt::Display>(kind: RestrictionKind, diff: &Diff<T>) -> DiffSummary {
            let lines = |entries: &[T]| entries.iter().map(|e| e.to_string()).collect::<Vec<String>>();
            DiffSummary {
                kind,
                matched: lines(&diff.matched),
                missing: lines(&diff.missing),
                delete: lines(&diff.delete),
            }
        }

        match self {
            Self::Domain(diff) => describe(self.kind(), diff),
            Self::Application(diff) => describe(self.kind(), diff),
        }
    }
}

/// Display strings of a [`DiffResult`]'s buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSummary {
    pub kind: RestrictionKind,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub delete: Vec<String>,
}
