//! Saved articles feature slice.

mod render;
mod state;
mod update;

pub use render::render_saved_view;
pub use state::SavedState;
pub use update::{Toggle, handle_loaded, handle_removed, handle_saved, plan_toggle};
