//! Auth feature reducer.
//!
//! Handles the login form, the credential exchange result, and every path
//! that ends a session.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uadm_core::api::{ApiError, Credentials, SESSION_EXPIRED_MESSAGE, TRANSPORT_MESSAGE};
use uadm_core::session::SessionToken;

use super::state::LoginPhase;
use crate::effects::UiEffect;
use crate::state::{AppState, View};
use crate::users::{self, UsersState};

pub const EMPTY_CREDENTIALS_MESSAGE: &str = "Please enter username and password.";
pub const NOT_LOGGED_IN_MESSAGE: &str = "You are not logged in. Please log in.";

/// Why a session is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator chose to log out.
    Logout,
    /// Backend answered 401 to an authenticated call.
    Expired,
    /// A protected view was entered without a token.
    NotLoggedIn,
}

impl SessionEnd {
    fn message(self) -> Option<String> {
        match self {
            SessionEnd::Logout => None,
            SessionEnd::Expired => Some(SESSION_EXPIRED_MESSAGE.to_string()),
            SessionEnd::NotLoggedIn => Some(NOT_LOGGED_IN_MESSAGE.to_string()),
        }
    }
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let auth = &mut app.tui.auth;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => return submit(app),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            auth.focus = auth.focus.toggle();
        }
        KeyCode::Backspace => {
            auth.focused_mut().pop();
        }
        KeyCode::Char(c) if !ctrl => {
            auth.focused_mut().push(c);
        }
        _ => {}
    }
    vec![]
}

/// Appends pasted text to the focused field. Line breaks are dropped.
pub fn handle_paste(app: &mut AppState, text: &str) {
    let field = app.tui.auth.focused_mut();
    field.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
}

/// Submits the login form.
///
/// Blank input fails locally without a request. The password is cleared on
/// every submit, successful or not. A submit while an exchange is in flight is
/// ignored.
pub fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.tasks.login.is_running() {
        return vec![];
    }

    let auth = &mut app.tui.auth;
    let credentials = Credentials::from_input(&auth.username, &auth.password);
    auth.password.clear();

    match credentials {
        None => {
            auth.phase = LoginPhase::Failed;
            auth.message = Some(EMPTY_CREDENTIALS_MESSAGE.to_string());
            vec![]
        }
        Some(credentials) => {
            tracing::info!(username = credentials.username(), "submitting admin login");
            auth.phase = LoginPhase::Submitting;
            auth.message = None;
            vec![UiEffect::SubmitLogin {
                task: None,
                credentials,
            }]
        }
    }
}

/// Applies the result of the credential exchange.
///
/// On success the token goes into the session store and the users view is
/// activated (which issues the first fetch).
pub fn handle_login_result(
    app: &mut AppState,
    result: Result<SessionToken, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(token) => {
            tracing::info!("admin login succeeded");
            app.tui.session.set(token);
            app.tui.auth.phase = LoginPhase::Authenticated;
            app.tui.auth.message = None;
            users::activate(app)
        }
        Err(err) => {
            tracing::warn!(error = %err, "admin login failed");
            app.tui.auth.phase = LoginPhase::Failed;
            app.tui.auth.message = Some(login_error_message(&err));
            vec![]
        }
    }
}

/// Message shown under the login form for a failed exchange.
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => TRANSPORT_MESSAGE.to_string(),
        ApiError::Remote {
            detail: Some(detail),
            ..
        } => format!("Server error: {detail}"),
        ApiError::Remote { detail: None, .. } | ApiError::Unauthorized => {
            "Server error: Unknown error".to_string()
        }
    }
}

/// Ends the current session and returns to the login view.
///
/// The token is cleared first and unconditionally; in-flight tasks are
/// abandoned so their results are dropped, and any overlay is closed. Only an
/// explicit logout tells the backend.
pub fn end_session(app: &mut AppState, reason: SessionEnd) -> Vec<UiEffect> {
    let token = app.tui.session.clear();
    tracing::info!(?reason, had_token = token.is_some(), "session ended");

    app.tui.tasks.clear_all();
    app.overlay = None;
    app.tui.users = UsersState::default();
    app.tui.view = View::Login;
    app.tui.auth.reset(reason.message());

    match (reason, token) {
        (SessionEnd::Logout, Some(token)) => vec![UiEffect::RevokeSession { token }],
        _ => vec![],
    }
}
