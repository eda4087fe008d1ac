//! Command implementations for dnd-cli

pub mod add;
pub mod commit;
pub mod del;
pub mod diff;
pub mod print;
pub mod search;
pub mod types;

pub use add::run_add;
pub use commit::run_commit;
pub use del::run_del;
pub use diff::run_diff;
pub use print::run_print;
pub use search::run_search;
pub use types::run_types;
