//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use uadm_core::api::{ApiError, UserRecord};

use crate::auth::{self, SessionEnd};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::user_form::SAVE_FAILED_MESSAGE;
use crate::overlays::{NoticeState, Overlay, OverlayTransition};
use crate::state::{AppState, TuiState, View};
use crate::users;

/// Fallback when a failed delete carries no detail.
pub const DELETE_FAILED_FALLBACK: &str = "Delete failed";

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute. Tracked effects leave here with a task id
/// assigned and their task marked running.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let mut effects = match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::LoginFinished(result) => auth::handle_login_result(app, result),
        UiEvent::UsersLoaded(result) => users::handle_users_loaded(app, result),
        UiEvent::UserSaved(result) => handle_user_saved(app, result),
        UiEvent::UserDeleted(result) => handle_user_deleted(app, result),
    };
    assign_tasks(&mut app.tui, &mut effects);
    effects
}

/// Gives every tracked effect without an id a fresh one and marks it running.
fn assign_tasks(tui: &mut TuiState, effects: &mut [UiEffect]) {
    for effect in effects {
        if let Some((kind, slot)) = effect.task_slot()
            && slot.is_none()
        {
            let id = tui.task_seq.next_id();
            tui.tasks.state_mut(kind).start(id);
            *slot = Some(id);
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(form) = app.overlay.as_mut().and_then(Overlay::as_user_form_mut) {
                form.paste(&text);
            } else if app.overlay.is_none() && app.tui.view == View::Login {
                auth::handle_paste(app, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = &mut app.overlay {
        let update = overlay.handle_key(&app.tui, key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return update.effects;
    }

    match app.tui.view {
        View::Login => auth::handle_key(app, key),
        View::Users => users::handle_key(app, key),
    }
}

/// Create or update finished.
///
/// Success closes the modal and refetches. Other failures keep the modal open
/// with the draft intact.
fn handle_user_saved(app: &mut AppState, result: Result<UserRecord, ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(record) => {
            tracing::info!(id = %record.id, "user saved");
            if matches!(app.overlay, Some(Overlay::UserForm(_))) {
                app.overlay = None;
            }
            users::activate(app)
        }
        Err(ApiError::Unauthorized) => auth::end_session(app, SessionEnd::Expired),
        Err(err) => {
            tracing::warn!(error = %err, "saving user failed");
            if let Some(form) = app.overlay.as_mut().and_then(Overlay::as_user_form_mut) {
                form.error = Some(err.message_or(SAVE_FAILED_MESSAGE));
            }
            vec![]
        }
    }
}

/// Delete finished.
///
/// Success refetches. Other failures raise a blocking notice and leave the
/// table as it was.
fn handle_user_deleted(app: &mut AppState, result: Result<(), ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            tracing::info!("user deleted");
            users::activate(app)
        }
        Err(ApiError::Unauthorized) => auth::end_session(app, SessionEnd::Expired),
        Err(err) => {
            tracing::warn!(error = %err, "deleting user failed");
            let message = format!(
                "Failed to delete user: {}",
                err.message_or(DELETE_FAILED_FALLBACK)
            );
            app.overlay = Some(Overlay::Notice(NoticeState::new(message)));
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use uadm_core::api::UserId;
    use uadm_core::session::{SessionStore, SessionToken};

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind};
    use crate::overlays::UserFormState;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn logged_in() -> AppState {
        let session = SessionStore::new();
        session.set(SessionToken::new("t"));
        let mut app = AppState::new(session, "http://test");
        app.tui.view = View::Users;
        app
    }

    fn completed(kind: TaskKind, id: TaskId, event: UiEvent) -> UiEvent {
        UiEvent::TaskCompleted {
            kind,
            completed: TaskCompleted {
                id,
                result: Box::new(event),
            },
        }
    }

    fn record(id: &str, username: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            username: username.to_string(),
            email: format!("{username}@x.com"),
            is_active: true,
            type_of_user: None,
        }
    }

    fn fetch_task(effects: &[UiEffect]) -> TaskId {
        match effects {
            [UiEffect::FetchUsers { task: Some(id) }] => *id,
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_effects_get_task_ids_assigned() {
        let mut app = logged_in();
        let effects = update(&mut app, key(KeyCode::Char('r')));
        let id = fetch_task(&effects);
        assert_eq!(app.tui.tasks.user_list.active, Some(id));
    }

    #[test]
    fn test_stale_fetch_result_is_dropped() {
        let mut app = logged_in();
        let first = fetch_task(&update(&mut app, key(KeyCode::Char('r'))));
        let second = fetch_task(&update(&mut app, key(KeyCode::Char('r'))));

        let stale = completed(TaskKind::UserList, first, UiEvent::UsersLoaded(Ok(vec![])));
        update(&mut app, stale);
        assert_eq!(app.tui.users.body, users::TableBody::Loading);

        let fresh = completed(TaskKind::UserList, second, UiEvent::UsersLoaded(Ok(vec![])));
        update(&mut app, fresh);
        assert_eq!(app.tui.users.body, users::TableBody::Empty);
    }

    #[test]
    fn test_result_after_logout_is_dropped() {
        let mut app = logged_in();
        let id = fetch_task(&update(&mut app, key(KeyCode::Char('r'))));
        update(&mut app, key(KeyCode::Char('l')));

        let late = completed(
            TaskKind::UserList,
            id,
            UiEvent::UsersLoaded(Err(ApiError::Unauthorized)),
        );
        update(&mut app, late);

        // Logout message stays; the late 401 did not rewrite it.
        assert!(app.tui.auth.message.is_none());
        assert_eq!(app.tui.view, View::Login);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_view() {
        let mut app = logged_in();
        app.overlay = Some(Overlay::UserForm(UserFormState::open_create()));
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_save_failure_keeps_modal_and_draft() {
        let mut app = logged_in();
        let mut form = UserFormState::open_create();
        form.draft.username = "ann".to_string();
        app.overlay = Some(Overlay::UserForm(form));

        let err = ApiError::Remote {
            status: 409,
            detail: None,
        };
        let effects = update(&mut app, UiEvent::UserSaved(Err(err)));

        assert!(effects.is_empty());
        let Some(Overlay::UserForm(form)) = &app.overlay else {
            panic!("form should stay open");
        };
        assert_eq!(form.error.as_deref(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(form.draft.username, "ann");
    }

    #[test]
    fn test_save_success_closes_modal_and_refetches_once() {
        let mut app = logged_in();
        app.overlay = Some(Overlay::UserForm(UserFormState::open_create()));
        let record = UserRecord {
            id: UserId::new("7"),
            username: "ann".to_string(),
            email: "ann@x.com".to_string(),
            is_active: true,
            type_of_user: None,
        };

        let effects = update(&mut app, UiEvent::UserSaved(Ok(record)));

        assert!(app.overlay.is_none());
        fetch_task(&effects);
    }

    #[test]
    fn test_save_unauthorized_ends_session() {
        let mut app = logged_in();
        app.overlay = Some(Overlay::UserForm(UserFormState::open_create()));

        update(&mut app, UiEvent::UserSaved(Err(ApiError::Unauthorized)));

        assert!(app.overlay.is_none());
        assert!(!app.tui.session.is_active());
        assert_eq!(app.tui.view, View::Login);
    }

    #[test]
    fn test_delete_failure_shows_notice_without_refetch() {
        let mut app = logged_in();
        let err = ApiError::Remote {
            status: 404,
            detail: Some("not found".to_string()),
        };

        let effects = update(&mut app, UiEvent::UserDeleted(Err(err)));

        assert!(effects.is_empty());
        let Some(Overlay::Notice(notice)) = &app.overlay else {
            panic!("expected a notice");
        };
        assert_eq!(notice.message, "Failed to delete user: not found");

        // Any key dismisses it.
        update(&mut app, key(KeyCode::Char('x')));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_delete_failure_without_detail_uses_fallback() {
        let mut app = logged_in();
        let err = ApiError::Remote {
            status: 500,
            detail: None,
        };
        update(&mut app, UiEvent::UserDeleted(Err(err)));
        let Some(Overlay::Notice(notice)) = &app.overlay else {
            panic!("expected a notice");
        };
        assert_eq!(notice.message, "Failed to delete user: Delete failed");
    }

    #[test]
    fn test_paste_goes_to_focused_form_field() {
        let mut app = logged_in();
        app.overlay = Some(Overlay::UserForm(UserFormState::open_create()));
        update(&mut app, UiEvent::Terminal(Event::Paste("ann\n".to_string())));
        let Some(Overlay::UserForm(form)) = &app.overlay else {
            panic!("form should stay open");
        };
        assert_eq!(form.draft.username, "ann");
    }

    #[test]
    fn test_second_delete_refused_until_first_reports() {
        let mut app = logged_in();
        app.tui.users.set_records(vec![record("7", "ann"), record("8", "bob")]);

        update(&mut app, key(KeyCode::Char('d')));
        let effects = update(&mut app, key(KeyCode::Char('y')));
        let [UiEffect::DeleteUser { task: Some(first), id }] = effects.as_slice() else {
            panic!("expected one delete, got {effects:?}");
        };
        assert_eq!(id.as_str(), "7");
        let first = *first;

        update(&mut app, key(KeyCode::Down));
        let effects = update(&mut app, key(KeyCode::Char('d')));
        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.tasks.user_delete.active, Some(first));

        let done = completed(TaskKind::UserDelete, first, UiEvent::UserDeleted(Ok(())));
        fetch_task(&update(&mut app, done));
        assert!(!app.tui.tasks.user_delete.is_running());
    }

    #[test]
    fn test_form_stays_open_until_its_save_reports() {
        let mut app = logged_in();
        app.tui.users.set_records(vec![record("7", "ann")]);

        update(&mut app, key(KeyCode::Char('e')));
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::UpdateUser { task: Some(save), .. }] = effects.as_slice() else {
            panic!("expected one update, got {effects:?}");
        };
        let save = *save;

        assert!(update(&mut app, key(KeyCode::Esc)).is_empty());
        let Some(Overlay::UserForm(form)) = &app.overlay else {
            panic!("form should stay open");
        };
        assert_eq!(form.draft.username, "ann");

        let done = completed(
            TaskKind::UserSave,
            save,
            UiEvent::UserSaved(Ok(record("7", "ann"))),
        );
        fetch_task(&update(&mut app, done));
        assert!(app.overlay.is_none());
    }
}
