//! Filesystem primitives for dnd
//!
//! Provides the all-or-nothing file writer used for every piece of OS state the
//! tool owns, path-carrying read helpers, content digests used to derive stable
//! restriction identities, and the single-instance lock guarding commits.

pub mod checksum;
pub mod error;
pub mod io;
pub mod lock;

pub use checksum::content_digest;
pub use error::{Error, Result};
pub use io::{read_bytes, read_text, write_atomic};
pub use lock::LockGuard;
