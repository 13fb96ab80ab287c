//! User list reducer.

use crossterm::event::{KeyCode, KeyEvent};
use uadm_core::api::{ApiError, UserRecord};

use super::state::{RowAction, TableBody, UserRow};
use crate::auth::{self, SessionEnd};
use crate::effects::UiEffect;
use crate::overlays::{ConfirmDeleteState, Overlay, UserFormState};
use crate::state::{AppState, View};

/// Shows the users view and starts a fetch.
///
/// Without a token nothing is requested; the operator is sent back to the
/// login view instead.
pub fn activate(app: &mut AppState) -> Vec<UiEffect> {
    if !app.tui.session.is_active() {
        return auth::end_session(app, SessionEnd::NotLoggedIn);
    }

    app.tui.view = View::Users;
    app.tui.users.body = TableBody::Loading;
    vec![UiEffect::FetchUsers { task: None }]
}

pub fn handle_users_loaded(
    app: &mut AppState,
    result: Result<Vec<UserRecord>, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(records) => {
            tracing::debug!(count = records.len(), "users loaded");
            app.tui.users.set_records(records);
            vec![]
        }
        Err(ApiError::Unauthorized) => auth::end_session(app, SessionEnd::Expired),
        Err(err) => {
            tracing::warn!(error = %err, "failed to load users");
            app.tui.users.body = TableBody::Failed(err.message_or("Unknown error"));
            vec![]
        }
    }
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let users = &mut app.tui.users;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => users.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => users.select_next(),
        KeyCode::Char('a') => {
            app.overlay = Some(Overlay::UserForm(UserFormState::open_create()));
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(action) = users.selected_row().map(UserRow::edit) {
                return apply_row_action(app, action);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            // One delete at a time.
            if app.tui.tasks.user_delete.is_running() {
                return vec![];
            }
            if let Some(action) = users.selected_row().map(UserRow::delete) {
                return apply_row_action(app, action);
            }
        }
        KeyCode::Char('r') => return activate(app),
        KeyCode::Char('l') => return auth::end_session(app, SessionEnd::Logout),
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        _ => {}
    }
    vec![]
}

/// Opens the overlay for a row's action.
pub fn apply_row_action(app: &mut AppState, action: RowAction) -> Vec<UiEffect> {
    app.overlay = Some(match action {
        RowAction::Edit(record) => Overlay::UserForm(UserFormState::open_edit(&record)),
        RowAction::Delete { id, username } => {
            Overlay::ConfirmDelete(ConfirmDeleteState::new(id, username))
        }
    });
    vec![]
}
