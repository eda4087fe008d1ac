//! Marker-delimited blocks in line-oriented text files.
//!
//! A managed block is a run of lines bracketed by two marker lines that share
//! a fixed prefix:
//!
//! ```text
//! #dnd1f0c...
//! 127.0.0.1 example.com
//! #dnd1f0c...
//! ```
//!
//! The `parser` module recovers blocks from file content and renders them back
//! to text; the `writer` module appends and excises that text. Neither touches
//! the filesystem.

pub mod error;
pub mod parser;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{Block, parse_blocks};
pub use writer::{insert_block, remove_block};
