//! Well-known locations of the OS state dnd manages.

use std::path::{Path, PathBuf};

use crate::constants::{
    APPLICATION_LABEL_PREFIX, CONFIG_DIR, CONFIG_FILE, HOSTS_FILE, LAUNCH_AGENTS_DIR, LOCK_FILE,
};
use crate::{Error, Result};

/// Resolved filesystem locations for one user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    /// The hosts-style mapping file
    pub hosts_file: PathBuf,
    /// Directory holding per-user agent definitions
    pub agent_dir: PathBuf,
    /// Directory holding dnd's own config, lock and logs
    pub config_dir: PathBuf,
}

impl SystemPaths {
    /// Resolve the locations for the current user.
    ///
    /// # Errors
    ///
    /// Returns `Error::HomeNotFound` if no home directory can be determined.
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        Ok(Self::with_home(&home))
    }

    /// Locations anchored at an explicit home directory.
    pub fn with_home(home: &Path) -> Self {
        let agent_dir = LAUNCH_AGENTS_DIR
            .iter()
            .fold(home.to_path_buf(), |dir, segment| dir.join(segment));

        Self {
            hosts_file: PathBuf::from(HOSTS_FILE),
            agent_dir,
            config_dir: home.join(CONFIG_DIR),
        }
    }

    /// Override the hosts file location.
    pub fn with_hosts_file(mut self, hosts_file: impl Into<PathBuf>) -> Self {
        self.hosts_file = hosts_file.into();
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.config_dir.join(LOCK_FILE)
    }

    /// Log file the application agents redirect stdout/stderr to.
    pub fn application_log(&self) -> PathBuf {
        self.config_dir
            .join(format!("{}pkill.log", APPLICATION_LABEL_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_anchored_at_home() {
        let paths = SystemPaths::with_home(Path::new("/Users/alice"));
        assert_eq!(paths.hosts_file, PathBuf::from("/etc/hosts"));
        assert_eq!(paths.agent_dir, PathBuf::from("/Users/alice/Library/LaunchAgents"));
        assert_eq!(paths.config_file(), PathBuf::from("/Users/alice/.dnd_config/.config"));
        assert_eq!(
            paths.application_log(),
            PathBuf::from("/Users/alice/.dnd_config/com.dnd.pkill.log")
        );
    }

    #[test]
    fn hosts_file_can_be_overridden() {
        let paths = SystemPaths::with_home(Path::new("/home/bob")).with_hosts_file("/tmp/hosts");
        assert_eq!(paths.hosts_file, PathBuf::from("/tmp/hosts"));
    }
}
