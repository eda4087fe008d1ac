//! Types command implementation

use colored::Colorize;
use dnd_core::RestrictionKind;

pub fn run_types() {
    for kind in RestrictionKind::ALL {
        println!("-{}: {}", kind.to_string().cyan(), kind.description());
    }
}
