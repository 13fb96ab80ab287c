//! UI event types.
//!
//! All inputs to the TUI (terminal input, timer ticks, results of network
//! calls) are converted to `UiEvent` before the reducer sees them.
//!
//! ## Inbox Pattern
//!
//! The runtime spawns each network effect on tokio and the task sends its
//! result back through the runtime's inbox channel, wrapped in
//! `UiEvent::TaskCompleted`. The reducer unwraps it only if the task is still
//! the active one for its kind.

use crossterm::event::Event as CrosstermEvent;
use uadm_core::ApiError;
use uadm_core::api::UserRecord;
use uadm_core::session::SessionToken;

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, render cadence).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Admin credential exchange finished.
    LoginFinished(Result<SessionToken, ApiError>),

    /// `GET /admin/users` finished.
    UsersLoaded(Result<Vec<UserRecord>, ApiError>),

    /// Create or update finished.
    UserSaved(Result<UserRecord, ApiError>),

    /// Delete finished.
    UserDeleted(Result<(), ApiError>),
}
