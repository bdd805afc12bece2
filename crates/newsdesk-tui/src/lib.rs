//! Full-screen TUI for newsdesk.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use anyhow::Result;
pub use features::{input, saved, search, session, statusline};
use newsdesk_core::config::Config;
use newsdesk_core::services::Services;
pub use runtime::TuiRuntime;

/// Runs the interactive client until the user quits.
///
/// Must be called from within a Tokio runtime; handlers are spawned onto it.
///
/// # Errors
/// Returns an error if stdout is not a terminal, or if the terminal fails.
pub fn run_interactive(config: &Config, services: Services) -> Result<()> {
    terminal::ensure_interactive()?;

    let mut runtime = TuiRuntime::new(config, services)?;
    runtime.run()
}
