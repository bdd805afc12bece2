//! Shared TUI utilities (task bookkeeping, request ordering, text helpers).

pub mod request_id;
pub mod task;
pub mod text;

pub use request_id::{RequestId, RequestTracker};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
