//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform one request and return the
//! result as a `UiEvent`. They never touch `AppState`; the runtime spawns
//! them and forwards what they return to the inbox.

use uadm_core::ApiClient;
use uadm_core::api::{CreateUserRequest, Credentials, UpdateUserRequest, UserId};
use uadm_core::session::SessionToken;

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;

/// Runs the I/O behind an effect and returns the event to feed back into the
/// reducer.
///
/// Tracked effects come back wrapped in `UiEvent::TaskCompleted`. A tracked
/// effect without a task id was never started by the reducer and is skipped.
/// `Quit` is not I/O and yields nothing here.
pub async fn run_effect(api: &ApiClient, effect: UiEffect) -> Option<UiEvent> {
    match effect {
        UiEffect::Quit => None,
        UiEffect::SubmitLogin { task, credentials } => {
            let task = task?;
            Some(completed(TaskKind::Login, task, login(api, credentials).await))
        }
        UiEffect::FetchUsers { task } => {
            let task = task?;
            Some(completed(TaskKind::UserList, task, fetch_users(api).await))
        }
        UiEffect::CreateUser { task, request } => {
            let task = task?;
            Some(completed(
                TaskKind::UserSave,
                task,
                create_user(api, request).await,
            ))
        }
        UiEffect::UpdateUser { task, id, request } => {
            let task = task?;
            Some(completed(
                TaskKind::UserSave,
                task,
                update_user(api, id, request).await,
            ))
        }
        UiEffect::DeleteUser { task, id } => {
            let task = task?;
            Some(completed(
                TaskKind::UserDelete,
                task,
                delete_user(api, id).await,
            ))
        }
        UiEffect::RevokeSession { token } => {
            revoke_session(api, token).await;
            None
        }
    }
}

fn completed(kind: TaskKind, id: TaskId, inner: UiEvent) -> UiEvent {
    UiEvent::TaskCompleted {
        kind,
        completed: TaskCompleted {
            id,
            result: Box::new(inner),
        },
    }
}

pub async fn login(api: &ApiClient, credentials: Credentials) -> UiEvent {
    tracing::info!(username = credentials.username(), "logging in");
    UiEvent::LoginFinished(api.admin_login(&credentials).await)
}

pub async fn fetch_users(api: &ApiClient) -> UiEvent {
    UiEvent::UsersLoaded(api.list_users().await)
}

pub async fn create_user(api: &ApiClient, request: CreateUserRequest) -> UiEvent {
    UiEvent::UserSaved(api.create_user(&request).await)
}

pub async fn update_user(api: &ApiClient, id: UserId, request: UpdateUserRequest) -> UiEvent {
    UiEvent::UserSaved(api.update_user(&id, &request).await)
}

pub async fn delete_user(api: &ApiClient, id: UserId) -> UiEvent {
    UiEvent::UserDeleted(api.delete_user(&id).await)
}

/// Best effort. The local session is already gone, so failures are only
/// logged.
pub async fn revoke_session(api: &ApiClient, token: SessionToken) {
    match api.admin_logout(&token).await {
        Ok(()) => tracing::info!("session revoked"),
        Err(err) => tracing::warn!(error = %err, "session revoke failed"),
    }
}
