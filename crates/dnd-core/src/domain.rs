//! Domain restrictions: marker blocks in the hosts file
//!
//! Each blocked domain occupies one block whose marker is derived from the
//! domain's content hash, so any process can re-derive the identity of a block
//! it did not write.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use dnd_blocks::{Block, insert_block, parse_blocks, remove_block};

use crate::adapter::{Adapter, CommitReport, Synced};
use crate::constants::{BLOCK_IP, DOMAIN_DIGEST_BYTES, DOMAIN_MARKER_PREFIX, HOSTS_FILE_MODE};
use crate::diff::Diff;
use crate::error::{Error, Failure, Failures, Result};
use crate::kind::RestrictionKind;

/// One `<ip> <domain> [<domain>...]` line inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsEntry {
    pub ip: String,
    pub domains: Vec<String>,
    /// The line as found on disk, without its terminator
    pub raw: String,
}

impl HostsEntry {
    /// Split a body line on whitespace. A blank line yields an entry with an
    /// empty ip and no domains.
    pub fn parse(line: &str) -> Self {
        let mut fields = line.split_whitespace().map(str::to_string);
        Self {
            ip: fields.next().unwrap_or_default(),
            domains: fields.collect(),
            raw: line.to_string(),
        }
    }
}

/// A rendered or recovered hosts-file block.
///
/// Equality compares the markers and each entry's ip and domains; the raw
/// line text is ignored, so whitespace differences do not cause churn.
#[derive(Debug, Clone)]
pub struct DomainRestriction {
    block: Block,
    entries: Vec<HostsEntry>,
}

impl DomainRestriction {
    /// Render the block that blocks `token`.
    pub fn new(token: &str) -> Self {
        let block = Block::new(&Self::marker_for(token), &[format!("{} {}", BLOCK_IP, token)]);
        Self::from_block(&block)
    }

    /// The marker line bracketing the block for `token`.
    pub fn marker_for(token: &str) -> String {
        format!(
            "{}{}",
            DOMAIN_MARKER_PREFIX,
            dnd_fs::content_digest(token, DOMAIN_DIGEST_BYTES)
        )
    }

    pub fn from_block(block: &Block) -> Self {
        Self {
            entries: block.lines.iter().map(|line| HostsEntry::parse(line)).collect(),
            block: block.clone(),
        }
    }

    pub fn header(&self) -> &str {
        &self.block.header
    }

    pub fn footer(&self) -> &str {
        &self.block.footer
    }

    pub fn entries(&self) -> &[HostsEntry] {
        &self.entries
    }

    /// The exact text this block occupies in the hosts file.
    pub fn text(&self) -> String {
        self.block.text()
    }
}

impl PartialEq for DomainRestriction {
    fn eq(&self, other: &Self) -> bool {
        self.header() == other.header()
            && self.footer() == other.footer()
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.ip == b.ip && a.domains == b.domains)
    }
}

impl fmt::Display for DomainRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                std::iter::once(e.ip.as_str())
                    .chain(e.domains.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "{}", lines.join(", "))
    }
}

/// Reads and rewrites the managed blocks of a hosts file.
#[derive(Debug, Clone)]
pub struct DomainAdapter {
    hosts_file: PathBuf,
}

impl DomainAdapter {
    pub fn new(hosts_file: impl Into<PathBuf>) -> Self {
        Self {
            hosts_file: hosts_file.into(),
        }
    }

    pub fn hosts_file(&self) -> &Path {
        &self.hosts_file
    }
}

impl Adapter for DomainAdapter {
    type Entry = DomainRestriction;

    const KIND: RestrictionKind = RestrictionKind::Domain;

    fn render(&self, token: &str) -> DomainRestriction {
        DomainRestriction::new(token)
    }

    fn sync(&self) -> Result<Synced<DomainRestriction>> {
        let content = dnd_fs::read_text(&self.hosts_file)?;
        let entries: Vec<DomainRestriction> = parse_blocks(&content, DOMAIN_MARKER_PREFIX)
            .iter()
            .map(DomainRestriction::from_block)
            .collect();

        tracing::debug!(
            path = %self.hosts_file.display(),
            blocks = entries.len(),
            "Synced domain restrictions"
        );
        Ok(Synced::complete(entries))
    }

    /// Edits the whole file in memory and replaces it with a single atomic
    /// write. A block to delete that is no longer present counts as done.
    fn commit(&self, diff: &Diff<DomainRestriction>) -> Result<CommitReport> {
        let original = dnd_fs::read_text(&self.hosts_file)?;
        let mut content = original.clone();
        let mut report = CommitReport::new();

        for restriction in &diff.delete {
            match remove_block(&content, &restriction.text()) {
                Ok(updated) => {
                    content = updated;
                    tracing::info!(marker = restriction.header(), "Removed domain block");
                    report.applied(format!("Removed {}", restriction));
                }
                Err(dnd_blocks::Error::BlockNotFound { marker }) => {
                    tracing::debug!(%marker, "Block already absent, skipping");
                }
            }
        }

        let mut seen = HashSet::new();
        for restriction in &diff.missing {
            if !seen.insert(restriction.header()) {
                continue;
            }
            content = insert_block(&content, &restriction.text());
            tracing::info!(marker = restriction.header(), "Appended domain block");
            report.applied(format!("Added {}", restriction));
        }

        if content == original {
            return Ok(report);
        }

        dnd_fs::write_atomic(&self.hosts_file, content.as_bytes(), HOSTS_FILE_MODE).map_err(
            |e| {
                let failures: Failures =
                    std::iter::once(Failure::new(self.hosts_file.display().to_string(), e))
                        .collect();
                Error::Commit(failures)
            },
        )?;
        Ok(report)
    }
}
