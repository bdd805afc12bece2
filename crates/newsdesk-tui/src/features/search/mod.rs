//! Search feature slice (search box, results list).

mod render;
mod state;
mod update;

pub use render::render_home_view;
pub use state::{SearchFocus, SearchState};
pub use update::{SearchOutcome, handle_result, submit};
