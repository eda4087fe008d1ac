//! Fuzzy lookup of installed applications
//!
//! Resolves a loose application name to candidates found in the application
//! directory, package-manager binary directories and every directory on
//! `PATH`. Scores are lower-is-better.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Most matches [`search`] returns.
pub const MAX_MATCHES: usize = 15;

/// Weight of each lexical-overlap bonus point.
const BONUS_WEIGHT: i64 = 10;

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub name: String,
    pub dir: PathBuf,
    pub score: i64,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.name, self.dir.display())
    }
}

/// Score `candidate` against `pattern`, case-insensitively.
///
/// The edit distance (unit costs) minus [`BONUS_WEIGHT`] for every
/// position-aligned equal character seen while filling the table and for
/// every pattern character present anywhere in the candidate.
pub fn score(candidate: &str, pattern: &str) -> i64 {
    let candidate: Vec<char> = candidate.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

    let mut bonus: i64 = 0;
    let mut prev: Vec<i64> = (0..=pattern.len() as i64).collect();
    let mut curr = vec![0i64; pattern.len() + 1];

    for i in 1..=candidate.len() {
        curr[0] = i as i64;
        for j in 1..=pattern.len() {
            curr[j] = if candidate[i - 1] == pattern[j - 1] {
                if i == j {
                    bonus += 1;
                }
                prev[j - 1]
            } else {
                1 + prev[j].min(curr[j - 1]).min(prev[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    bonus += pattern.iter().filter(|c| candidate.contains(c)).count() as i64;

    prev[pattern.len()] - BONUS_WEIGHT * bonus
}

/// Score every entry of every root directory and return the best
/// [`MAX_MATCHES`], ordered by score then name.
///
/// Directories that cannot be listed are skipped.
pub fn search<I, P>(roots: I, pattern: &str) -> Vec<Match>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for root in roots {
        let root = root.as_ref();
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(path = %root.display(), error = %e, "Skipping unreadable directory");
                continue;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !seen.insert((name.clone(), root.to_path_buf())) {
                continue;
            }
            matches.push(Match {
                score: score(&name, pattern),
                name,
                dir: root.to_path_buf(),
            });
        }
    }

    matches.sort_by(|a, b| {
        a.score
            .cmp(&b.score)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.dir.cmp(&b.dir))
    });
    matches.truncate(MAX_MATCHES);
    matches
}

/// The directories searched by default: `/Applications` on macOS,
/// `$GOPATH/bin`, cargo's bin directory and each `PATH` entry.
pub fn default_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if cfg!(target_os = "macos") {
        roots.push(PathBuf::from("/Applications"));
    }
    if let Some(gopath) = std::env::var_os("GOPATH") {
        roots.push(PathBuf::from(gopath).join("bin"));
    }
    match std::env::var_os("CARGO_HOME") {
        Some(cargo_home) => roots.push(PathBuf::from(cargo_home).join("bin")),
        None => {
            if let Some(home) = dirs::home_dir() {
                roots.push(home.join(".cargo").join("bin"));
            }
        }
    }
    if let Some(path) = std::env::var_os("PATH") {
        roots.extend(std::env::split_paths(&path).filter(|p| !p.as_os_str().is_empty()));
    }

    roots
}
