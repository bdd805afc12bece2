//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. They perform
//! I/O through the core clients and never touch state; the runtime spawns
//! them and sends the result to the inbox.

pub mod news;
pub mod saved;
pub mod session;

pub use news::*;
pub use saved::*;
pub use session::*;

#[cfg(test)]
mod tests;
