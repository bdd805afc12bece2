//! Status line: transient notices, key hints, activity spinner.

mod render;
mod state;

pub use render::render_status_line;
pub use state::{NOTICE_DURATION, Notice, NoticeLevel, StatusLine};
