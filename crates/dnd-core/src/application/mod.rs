//! Application restrictions: one kill agent per pattern
//!
//! Every blocked application pattern gets an agent definition in the per-user
//! agent directory. The agent kills matching processes on a fixed interval.
//! Labels and file names are derived from the pattern's content hash.

pub mod plist;
pub mod scheduler;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapter::{Adapter, CommitReport, Synced};
use crate::constants::{AGENT_FILE_MODE, APPLICATION_DIGEST_BYTES, APPLICATION_LABEL_PREFIX};
use crate::diff::Diff;
use crate::error::{Error, Failure, Failures, Result};
use crate::kind::RestrictionKind;
use crate::paths::SystemPaths;

pub use scheduler::{Launchctl, Scheduler, Unsupported};

/// A rendered or recovered kill agent.
#[derive(Debug, Clone)]
pub struct ApplicationRestriction {
    pattern: String,
    label: String,
    file: PathBuf,
    /// Whether the scheduler had the agent loaded at sync time; `None` when
    /// unknown (rendered entries, or the query failed)
    loaded: Option<bool>,
}

impl ApplicationRestriction {
    /// Render the agent for `pattern` inside `agent_dir`.
    pub fn new(pattern: &str, agent_dir: &Path) -> Self {
        let label = Self::label_for(pattern);
        Self {
            pattern: pattern.to_string(),
            file: agent_dir.join(format!("{}.plist", label)),
            label,
            loaded: None,
        }
    }

    /// The label derived from `pattern`: `com.dnd.pkill<12 hex chars>`.
    pub fn label_for(pattern: &str) -> String {
        format!(
            "{}pkill{}",
            APPLICATION_LABEL_PREFIX,
            dnd_fs::content_digest(pattern, APPLICATION_DIGEST_BYTES)
        )
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn loaded(&self) -> Option<bool> {
        self.loaded
    }

    /// On disk but known not to be running.
    pub fn needs_registration(&self) -> bool {
        self.loaded == Some(false)
    }
}

impl PartialEq for ApplicationRestriction {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.label == other.label
    }
}

impl fmt::Display for ApplicationRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pattern, self.label)?;
        if self.needs_registration() {
            write!(f, " [not loaded]")?;
        }
        Ok(())
    }
}

/// Reads and rewrites the kill agents in a per-user agent directory.
#[derive(Debug)]
pub struct ApplicationAdapter {
    agent_dir: PathBuf,
    log_file: PathBuf,
    scheduler: Box<dyn Scheduler>,
}

impl ApplicationAdapter {
    pub fn new(
        agent_dir: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        Self {
            agent_dir: agent_dir.into(),
            log_file: log_file.into(),
            scheduler,
        }
    }

    /// The adapter for the current user with the platform scheduler.
    pub fn system(paths: &SystemPaths) -> Result<Self> {
        Ok(Self::new(
            paths.agent_dir.clone(),
            paths.application_log(),
            scheduler::system()?,
        ))
    }

    pub fn agent_dir(&self) -> &Path {
        &self.agent_dir
    }

    fn ensure_available(&self) -> Result<()> {
        if self.scheduler.is_available() {
            Ok(())
        } else {
            Err(Error::NotImplemented {
                operation: "application restrictions",
            })
        }
    }

    /// Regular files in the agent directory, sorted by name. A missing
    /// directory holds no agents.
    fn agent_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.agent_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.agent_dir.display(), "Agent directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(dnd_fs::Error::io(&self.agent_dir, e).into()),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_agent(&self, path: &Path) -> std::result::Result<Option<ApplicationRestriction>, String> {
        let bytes = dnd_fs::read_bytes(path).map_err(|e| e.to_string())?;
        let fields = plist::parse(&String::from_utf8_lossy(&bytes)).map_err(|e| e.to_string())?;

        if !fields.label.starts_with(APPLICATION_LABEL_PREFIX) || fields.pattern.is_empty() {
            return Ok(None);
        }

        let loaded = match self.scheduler.is_registered(&fields.label) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                tracing::warn!(label = %fields.label, error = %e, "Could not query agent state");
                None
            }
        };

        Ok(Some(ApplicationRestriction {
            pattern: fields.pattern,
            label: fields.label,
            file: path.to_path_buf(),
            loaded,
        }))
    }

    fn delete(
        &self,
        app: &ApplicationRestriction,
        keep_loaded: bool,
        report: &mut CommitReport,
        failures: &mut Failures,
    ) {
        match fs::remove_file(&app.file) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %app.file.display(), "Agent file already absent");
            }
            Err(e) => {
                failures.push(Failure::new(
                    app.file.display().to_string(),
                    format!("failed to delete agent: {}", e),
                ));
                return;
            }
        }
        tracing::info!(label = %app.label, "Removed agent");
        report.applied(format!("Removed {}", app));

        if app.loaded == Some(false) {
            tracing::debug!(label = %app.label, "Agent not loaded, nothing to unload");
            return;
        }
        if keep_loaded {
            tracing::debug!(label = %app.label, "Label still matched by another agent, leaving it loaded");
            return;
        }
        if let Err(e) = self.scheduler.deregister(&app.label) {
            failures.push(Failure::new(
                app.label.clone(),
                format!("agent removed but still loaded, a retry may help: {}", e),
            ));
        }
    }

    fn create(&self, app: &ApplicationRestriction, report: &mut CommitReport, failures: &mut Failures) {
        let content = plist::render(&app.pattern, &app.label, &self.log_file);
        if let Err(e) = dnd_fs::write_atomic(&app.file, content.as_bytes(), AGENT_FILE_MODE) {
            failures.push(Failure::new(
                app.file.display().to_string(),
                format!("failed to write agent: {}", e),
            ));
            return;
        }
        tracing::info!(label = %app.label, path = %app.file.display(), "Wrote agent");
        report.applied(format!("Added {}", app));

        if let Err(e) = self.scheduler.register(&app.file) {
            failures.push(Failure::new(
                app.file.display().to_string(),
                format!("agent written but not loaded, a retry may help: {}", e),
            ));
        }
    }

    fn reload(&self, app: &ApplicationRestriction, report: &mut CommitReport, failures: &mut Failures) {
        match self.scheduler.register(&app.file) {
            Ok(()) => {
                tracing::info!(label = %app.label, "Re-registered agent");
                report.applied(format!("Loaded {}", app.pattern));
            }
            Err(e) => failures.push(Failure::new(
                app.file.display().to_string(),
                format!("failed to load agent: {}", e),
            )),
        }
    }
}

impl Adapter for ApplicationAdapter {
    type Entry = ApplicationRestriction;

    const KIND: RestrictionKind = RestrictionKind::Application;

    fn render(&self, token: &str) -> ApplicationRestriction {
        ApplicationRestriction::new(token, &self.agent_dir)
    }

    fn sync(&self) -> Result<Synced<ApplicationRestriction>> {
        self.ensure_available()?;

        let mut synced = Synced::complete(Vec::new());
        for path in self.agent_files()? {
            match self.read_agent(&path) {
                Ok(Some(app)) => synced.entries.push(app),
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "Skipping unreadable agent");
                    synced
                        .failures
                        .push(Failure::new(path.display().to_string(), reason));
                }
            }
        }

        tracing::debug!(
            path = %self.agent_dir.display(),
            agents = synced.entries.len(),
            failures = synced.failures.len(),
            "Synced application restrictions"
        );
        synced.into_result()
    }

    /// Deletes first, then creates, then reloads matched agents that are on
    /// disk but not running. Each agent is applied independently.
    fn commit(&self, diff: &Diff<ApplicationRestriction>) -> Result<CommitReport> {
        self.ensure_available()?;

        let mut report = CommitReport::new();
        let mut failures = Failures::new();

        // A stray copy shares its label with the matched agent it duplicates.
        let matched: HashSet<&str> = diff.matched.iter().map(|app| app.label.as_str()).collect();
        for app in &diff.delete {
            let keep_loaded = matched.contains(app.label.as_str());
            self.delete(app, keep_loaded, &mut report, &mut failures);
        }

        let mut seen = HashSet::new();
        for app in &diff.missing {
            if seen.insert(app.label.as_str()) {
                self.create(app, &mut report, &mut failures);
            }
        }

        let mut seen = HashSet::new();
        for app in diff.matched.iter().filter(|app| app.needs_registration()) {
            if seen.insert(app.label.as_str()) {
                self.reload(app, &mut report, &mut failures);
            }
        }

        report.conclude(failures)
    }
}
