//! Locations and state shared by every command

use std::path::PathBuf;

use dnd_core::{Config, Engine, SystemPaths};

use crate::error::Result;

/// Resolved paths for this invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: SystemPaths,
}

impl Context {
    pub fn detect(hosts_file: Option<PathBuf>) -> Result<Self> {
        let mut paths = SystemPaths::detect()?;
        if let Some(hosts_file) = hosts_file {
            paths = paths.with_hosts_file(hosts_file);
        }
        tracing::debug!(?paths, "Resolved system paths");
        Ok(Self { paths })
    }

    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load_or_default(&self.paths.config_file())?)
    }

    pub fn save_config(&self, config: &mut Config) -> Result<()> {
        Ok(config.save(&self.paths.config_file())?)
    }

    pub fn engine(&self) -> Result<Engine> {
        Ok(Engine::system(&self.paths)?)
    }
}
