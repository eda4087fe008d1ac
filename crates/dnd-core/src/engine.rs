//! Reconciliation engine
//!
//! Dispatches on [`RestrictionKind`] to the matching adapter, diffs the
//! desired list against the synced actual state and commits the result.

use crate::adapter::{Adapter, CommitReport};
use crate::application::ApplicationAdapter;
use crate::diff::{self, Diff, DiffResult};
use crate::domain::DomainAdapter;
use crate::error::{Error, Result};
use crate::kind::RestrictionKind;
use crate::list::List;
use crate::paths::SystemPaths;

/// Owns one adapter per restriction kind.
#[derive(Debug)]
pub struct Engine {
    domains: DomainAdapter,
    applications: ApplicationAdapter,
}

impl Engine {
    pub fn new(domains: DomainAdapter, applications: ApplicationAdapter) -> Self {
        Self {
            domains,
            applications,
        }
    }

    /// The engine for the current user, acting on the real OS state.
    pub fn system(paths: &SystemPaths) -> Result<Self> {
        Ok(Self::new(
            DomainAdapter::new(paths.hosts_file.clone()),
            ApplicationAdapter::system(paths)?,
        ))
    }

    pub fn domains(&self) -> &DomainAdapter {
        &self.domains
    }

    pub fn applications(&self) -> &ApplicationAdapter {
        &self.applications
    }

    /// Diff `desired` against the actual state of `kind`.
    ///
    /// A partial sync still yields a diff over the recovered entries; the
    /// condition is available from [`DiffResult::partial_sync`]. Any other
    /// sync failure aborts.
    pub fn diff(&self, kind: RestrictionKind, desired: &List) -> Result<DiffResult> {
        let desired = desired.items();
        let result = match kind {
            RestrictionKind::Domain => DiffResult::Domain(reconcile(&self.domains, &desired)?),
            RestrictionKind::Application => {
                DiffResult::Application(reconcile(&self.applications, &desired)?)
            }
        };

        if let Some(warning) = result.partial_sync() {
            tracing::warn!(%kind, %warning, "Diff computed on partially synced state");
        }
        Ok(result)
    }

    /// Apply a diff: deletions first, then missing entries.
    pub fn commit(&self, diff: &DiffResult) -> Result<CommitReport> {
        let kind = diff.kind();
        let report = match diff {
            DiffResult::Domain(diff) => self.domains.commit(diff),
            DiffResult::Application(diff) => self.applications.commit(diff),
        };

        match &report {
            Ok(report) => tracing::info!(%kind, committed = report.committed, "Committed"),
            Err(e) => tracing::warn!(%kind, error = %e, "Commit did not complete"),
        }
        report
    }
}

fn reconcile<A: Adapter>(adapter: &A, desired: &[String]) -> Result<Diff<A::Entry>> {
    let synced = adapter.sync().map_err(|e| {
        if e.is_not_implemented() {
            e
        } else {
            Error::SyncFailed {
                kind: A::KIND,
                source: Box::new(e),
            }
        }
    })?;

    let mut diff = diff::compute(desired, &synced.entries, |token| adapter.render(token), |a, b| a == b);
    diff.sync_failures = synced.failures;

    tracing::debug!(
        kind = %A::KIND,
        matched = diff.matched.len(),
        missing = diff.missing.len(),
        delete = diff.delete.len(),
        "Computed diff"
    );
    Ok(diff)
}
