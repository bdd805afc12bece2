//! Session feature slice (restore, sign in/up/out, header).

mod render;
mod update;

pub use render::render_header;
pub use update::{
    AuthOutcome, AuthRequest, begin_auth, handle_auth_result, handle_mounted, handle_restored,
    load_saved, logout,
};
