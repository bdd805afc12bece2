//! Terminal lifecycle management.
//!
//! The shell takes over the whole screen: raw mode, the alternate screen,
//! bracketed paste for the search box and forms, and mouse capture so a click
//! outside a modal can dismiss it. Terminal state is restored on:
//! - Normal exit (runtime `Drop`)
//! - Panic (hook installed before setup)

use std::io::{self, IsTerminal, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Fails unless stdout is an interactive terminal.
///
/// Piped or redirected output cannot host the full-screen shell; the CLI
/// subcommands cover that case.
///
/// # Errors
/// Returns an error naming the non-interactive alternative.
pub fn ensure_interactive() -> Result<()> {
    require_terminal(io::stdout().is_terminal())
}

fn require_terminal(is_terminal: bool) -> Result<()> {
    if !is_terminal {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `newsdesk search <keyword>` for non-interactive use."
        );
    }
    Ok(())
}

/// Sets up the terminal for the shell.
///
/// - Enables raw mode
/// - Enters the alternate screen
/// - Creates the ratatui terminal over stdout
///
/// Call `install_panic_hook()` first so a panic during setup or the event
/// loop still leaves the user's shell usable.
///
/// # Errors
/// Returns an error if raw mode, the alternate screen, or the backend fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Enables the input features the event loop relies on.
///
/// - Bracketed paste: pasted text arrives as one `Event::Paste` and goes to
///   the focused field instead of being replayed as keystrokes
/// - Mouse capture: backdrop clicks close a modal, the wheel moves the
///   article selection
///
/// Kept apart from `setup_terminal()` so the runtime can turn them off
/// before teardown; `restore_terminal()` disables them as well for the
/// panic path.
///
/// # Errors
/// Returns an error if the escape sequences cannot be written.
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste, EnableMouseCapture)
        .context("Failed to enable input features")?;
    Ok(())
}

/// Disables the features enabled by `enable_input_features()`.
///
/// # Errors
/// Returns an error if the escape sequences cannot be written.
pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste)
        .context("Failed to disable input features")?;
    Ok(())
}

/// Restores terminal state.
///
/// - Disables mouse capture and bracketed paste (harmless if never enabled)
/// - Leaves the alternate screen
/// - Disables raw mode
///
/// Idempotent: the runtime's `Drop` and the panic hook may both call it.
///
/// # Errors
/// Returns an error if the alternate screen or raw mode cannot be left.
pub fn restore_terminal() -> Result<()> {
    // Must happen before leaving raw mode.
    let _ = execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste);

    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this before `setup_terminal()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
