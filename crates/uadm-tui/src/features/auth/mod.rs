//! Admin login feature slice.
//!
//! - `state.rs`: login form fields and the `Idle -> Submitting ->
//!   Authenticated | Failed` phase
//! - `update.rs`: submit, result handling, and the session-ending paths
//!   (logout, rejected token, missing token)
//! - `render.rs`: the login view

mod render;
mod state;
mod update;

pub use render::render_login_view;
pub use state::{AuthState, LoginField, LoginPhase};
pub use update::{
    EMPTY_CREDENTIALS_MESSAGE, NOT_LOGGED_IN_MESSAGE, SessionEnd, end_session,
    handle_key, handle_login_result, handle_paste, login_error_message, submit,
};
