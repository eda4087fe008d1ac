//! Restriction reconciliation for dnd
//!
//! dnd blocks internet domains and local applications by reconciling the
//! user's desired restriction lists against what is actually enforced by the
//! operating system:
//!
//! - **Domains** are marker blocks in the hosts file redirecting each domain
//!   to the loopback address.
//! - **Applications** are per-pattern launch agents that periodically kill
//!   matching processes.
//!
//! [`Engine::diff`] syncs the actual state through the kind's [`Adapter`] and
//! buckets entries into matched, missing and delete; [`Engine::commit`]
//! applies the missing and delete buckets. The [`search`] module ranks
//! installed applications for a loose name.

pub mod adapter;
pub mod application;
pub mod config;
pub mod constants;
pub mod diff;
pub mod domain;
pub mod engine;
pub mod error;
pub mod kind;
pub mod list;
pub mod paths;
pub mod search;

pub use adapter::{Adapter, CommitReport, Synced};
pub use application::{ApplicationAdapter, ApplicationRestriction, Launchctl, Scheduler, Unsupported};
pub use config::Config;
pub use diff::{Diff, DiffResult, DiffSummary};
pub use domain::{DomainAdapter, DomainRestriction, HostsEntry};
pub use engine::Engine;
pub use error::{Error, Failure, Failures, Result};
pub use kind::RestrictionKind;
pub use list::List;
pub use paths::SystemPaths;
pub use search::Match;
