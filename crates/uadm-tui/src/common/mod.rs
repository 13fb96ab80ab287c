//! Shared helpers for the TUI.

pub mod task;
pub mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::{mask_secret, truncate_with_ellipsis};
