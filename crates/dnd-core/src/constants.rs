//! Fixed names, prefixes and modes shared by the adapters.

/// Prefix of every marker line bracketing a managed hosts-file block.
pub const DOMAIN_MARKER_PREFIX: &str = "#dnd";

/// Namespace tag every managed agent label starts with.
pub const APPLICATION_LABEL_PREFIX: &str = "com.dnd.";

/// Digest bytes in a domain marker (32 hex chars).
pub const DOMAIN_DIGEST_BYTES: usize = 16;

/// Digest bytes in an agent label (12 hex chars). 2^24 patterns before a
/// collision becomes likely.
pub const APPLICATION_DIGEST_BYTES: usize = 6;

/// Address blocked domains are redirected to.
pub const BLOCK_IP: &str = "127.0.0.1";

/// The system hosts file.
pub const HOSTS_FILE: &str = "/etc/hosts";

/// Per-user agent directory, relative to the home directory.
pub const LAUNCH_AGENTS_DIR: [&str; 2] = ["Library", "LaunchAgents"];

/// Configuration directory, relative to the home directory.
pub const CONFIG_DIR: &str = ".dnd_config";

/// Configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = ".config";

/// Commit lock file inside [`CONFIG_DIR`].
pub const LOCK_FILE: &str = ".lock";

/// Seconds between two kill sweeps of an application agent.
pub const KILL_INTERVAL_SECS: u32 = 30;

pub const HOSTS_FILE_MODE: u32 = 0o644;
pub const AGENT_FILE_MODE: u32 = 0o644;
pub const CONFIG_FILE_MODE: u32 = 0o644;
