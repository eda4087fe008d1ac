//! OS scheduler that runs agent definitions
//!
//! On macOS agents are loaded into the user's GUI session with `launchctl`,
//! so a new restriction takes effect immediately instead of at next login.

use std::fmt;
use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Loads and unloads agent definitions in the user's session.
pub trait Scheduler: fmt::Debug + Send + Sync {
    /// Whether this platform has a scheduler at all.
    fn is_available(&self) -> bool;

    /// Load the agent at `agent` and start it now.
    fn register(&self, agent: &Path) -> Result<()>;

    /// Stop and unload the agent with `label`.
    fn deregister(&self, label: &str) -> Result<()>;

    /// Whether an agent with `label` is currently loaded.
    fn is_registered(&self, label: &str) -> Result<bool>;
}

/// The scheduler for the current platform.
#[cfg(target_os = "macos")]
pub fn system() -> Result<Box<dyn Scheduler>> {
    Ok(Box::new(Launchctl::for_current_user()?))
}

/// The scheduler for the current platform.
#[cfg(not(target_os = "macos"))]
pub fn system() -> Result<Box<dyn Scheduler>> {
    Ok(Box::new(Unsupported))
}

/// `launchctl` driving the `gui/<uid>` domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launchctl {
    domain: String,
}

impl Launchctl {
    pub fn new(uid: impl fmt::Display) -> Self {
        Self {
            domain: format!("gui/{}", uid),
        }
    }

    /// Target the session of the invoking user. Under sudo that is the user
    /// who ran sudo, not root.
    pub fn for_current_user() -> Result<Self> {
        if let Ok(uid) = std::env::var("SUDO_UID")
            && !uid.trim().is_empty()
        {
            return Ok(Self::new(uid.trim()));
        }

        let output = run("id", &["-u"])?;
        let uid = String::from_utf8_lossy(&output.stdout).trim().to_string();
        check(output, || "id -u".to_string())?;
        Ok(Self::new(uid))
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn service(&self, label: &str) -> String {
        format!("{}/{}", self.domain, label)
    }
}

impl Scheduler for Launchctl {
    fn is_available(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn register(&self, agent: &Path) -> Result<()> {
        let agent = agent.display().to_string();
        check(run("launchctl", &["bootstrap", &self.domain, &agent])?, || {
            format!("launchctl bootstrap {} {}", self.domain, agent)
        })
    }

    fn deregister(&self, label: &str) -> Result<()> {
        let service = self.service(label);
        check(run("launchctl", &["bootout", &service])?, || {
            format!("launchctl bootout {}", service)
        })
    }

    fn is_registered(&self, label: &str) -> Result<bool> {
        let output = run("launchctl", &["print", &self.service(label)])?;
        Ok(output.status.success())
    }
}

/// Stand-in for platforms without a supported scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

const UNSUPPORTED: &str = "launch agent scheduling";

impl Scheduler for Unsupported {
    fn is_available(&self) -> bool {
        false
    }

    fn register(&self, _agent: &Path) -> Result<()> {
        Err(Error::NotImplemented {
            operation: UNSUPPORTED,
        })
    }

    fn deregister(&self, _label: &str) -> Result<()> {
        Err(Error::NotImplemented {
            operation: UNSUPPORTED,
        })
    }

    fn is_registered(&self, _label: &str) -> Result<bool> {
        Err(Error::NotImplemented {
            operation: UNSUPPORTED,
        })
    }
}

fn run(program: &str, args: &[&str]) -> Result<Output> {
    tracing::debug!(program, ?args, "Running scheduler command");
    Command::new(program)
        .args(args)
        .output()
        .map_err(|e| Error::Scheduler {
            command: format!("{} {}", program, args.join(" ")),
            output: e.to_string(),
        })
}

fn check(output: Output, command: impl FnOnce() -> String) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Err(Error::Scheduler {
        command: command(),
        output: combined.trim().to_string(),
    })
}
