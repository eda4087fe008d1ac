//! Shared fixtures for dnd-core integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use dnd_core::{ApplicationAdapter, DomainAdapter, Engine, Error, Result, Scheduler};
use tempfile::TempDir;

/// Recorded scheduler state, shared between a test and the adapter it built.
#[derive(Debug, Default)]
pub struct SchedulerState {
    pub loaded: BTreeSet<String>,
    pub calls: Vec<String>,
    pub fail_register: bool,
    pub fail_deregister: bool,
}

/// In-memory scheduler: loading an agent records its label.
#[derive(Debug, Clone, Default)]
pub struct FakeScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap()
    }

    pub fn loaded(&self) -> Vec<String> {
        self.state().loaded.iter().cloned().collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn set_fail_register(&self, fail: bool) {
        self.state().fail_register = fail;
    }

    pub fn set_fail_deregister(&self, fail: bool) {
        self.state().fail_deregister = fail;
    }

    /// Forget every loaded agent, as after a reboot without login.
    pub fn unload_all(&self) {
        self.state().loaded.clear();
    }
}

fn label_of(agent: &Path) -> String {
    agent
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Scheduler for FakeScheduler {
    fn is_available(&self) -> bool {
        true
    }

    fn register(&self, agent: &Path) -> Result<()> {
        let label = label_of(agent);
        let mut state = self.state();
        state.calls.push(format!("register {}", label));
        if state.fail_register {
            return Err(Error::Scheduler {
                command: format!("bootstrap {}", agent.display()),
                output: "Bootstrap failed: 5: Input/output error".to_string(),
            });
        }
        state.loaded.insert(label);
        Ok(())
    }

    fn deregister(&self, label: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(format!("deregister {}", label));
        if state.fail_deregister {
            return Err(Error::Scheduler {
                command: format!("bootout {}", label),
                output: "Boot-out failed: 3: No such process".to_string(),
            });
        }
        state.loaded.remove(label);
        Ok(())
    }

    fn is_registered(&self, label: &str) -> Result<bool> {
        Ok(self.state().loaded.contains(label))
    }
}

/// Permission checks do not apply to root.
pub fn is_root() -> bool {
    match std::process::Command::new("id").arg("-u").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
        Err(_) => false,
    }
}

/// A scratch hosts file, agent directory and fake scheduler.
pub struct Fixture {
    pub dir: TempDir,
    pub hosts: PathBuf,
    pub agents: PathBuf,
    pub log: PathBuf,
    pub scheduler: FakeScheduler,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_hosts("127.0.0.1 localhost\n")
    }

    pub fn with_hosts(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let hosts = dir.path().join("hosts");
        let agents = dir.path().join("LaunchAgents");
        let log = dir.path().join(".dnd_config").join("com.dnd.pkill.log");
        fs::write(&hosts, content).unwrap();
        fs::create_dir_all(&agents).unwrap();

        Self {
            dir,
            hosts,
            agents,
            log,
            scheduler: FakeScheduler::new(),
        }
    }

    pub fn hosts_content(&self) -> String {
        fs::read_to_string(&self.hosts).unwrap()
    }

    pub fn domain_adapter(&self) -> DomainAdapter {
        DomainAdapter::new(&self.hosts)
    }

    pub fn application_adapter(&self) -> ApplicationAdapter {
        ApplicationAdapter::new(&self.agents, &self.log, Box::new(self.scheduler.clone()))
    }

    pub fn engine(&self) -> Engine {
        Engine::new(self.domain_adapter(), self.application_adapter())
    }

    /// Agent file names in the agent directory, sorted.
    pub fn agent_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.agents)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
