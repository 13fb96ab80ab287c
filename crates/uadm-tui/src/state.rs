//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── view: View              (login or users)
//! │   ├── session: SessionStore   (shared with the ApiClient)
//! │   ├── auth: AuthState         (login form)
//! │   ├── users: UsersState       (table body, selection)
//! │   ├── task_seq: TaskSeq
//! │   └── tasks: Tasks
//! └── overlay: Option<Overlay>    (user form, delete confirmation, notice)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay key
//! handlers can hold `&mut` to the overlay while reading `&TuiState`.

use uadm_core::session::SessionStore;

use crate::auth::AuthState;
use crate::common::{TaskSeq, Tasks};
use crate::overlays::Overlay;
use crate::users::UsersState;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Creates the state for a fresh run. The first view is always the login
    /// form.
    pub fn new(session: SessionStore, api_base_url: impl Into<String>) -> Self {
        Self {
            tui: TuiState::new(session, api_base_url.into()),
            overlay: None,
        }
    }
}

/// Full-screen views. Overlays sit on top of whichever is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Users,
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Active full-screen view.
    pub view: View,
    /// Session token slot, shared with the API client.
    pub session: SessionStore,
    /// Login form state.
    pub auth: AuthState,
    /// User table state.
    pub users: UsersState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Backend shown in the status line.
    pub api_base_url: String,
}

impl TuiState {
    pub fn new(session: SessionStore, api_base_url: String) -> Self {
        Self {
            should_quit: false,
            view: View::Login,
            session,
            auth: AuthState::default(),
            users: UsersState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            api_base_url,
        }
    }
}
