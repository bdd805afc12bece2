//! Feature slices for the TUI (state/update/render per slice).

pub mod input;
pub mod saved;
pub mod search;
pub mod session;
pub mod statusline;
