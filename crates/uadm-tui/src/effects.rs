//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer never performs a request itself.
//!
//! Effects that start a tracked task carry `task: Option<TaskId>`. Feature
//! code emits them with `task: None` and the reducer assigns the id (and marks
//! the task running) before handing them to the runtime.

use uadm_core::api::{CreateUserRequest, Credentials, UpdateUserRequest, UserId};
use uadm_core::session::SessionToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Exchange credentials for a session token.
    SubmitLogin {
        task: Option<TaskId>,
        credentials: Credentials,
    },

    /// Load the user collection.
    FetchUsers { task: Option<TaskId> },

    /// Create a user.
    CreateUser {
        task: Option<TaskId>,
        request: CreateUserRequest,
    },

    /// Update an existing user.
    UpdateUser {
        task: Option<TaskId>,
        id: UserId,
        request: UpdateUserRequest,
    },

    /// Delete a user.
    DeleteUser { task: Option<TaskId>, id: UserId },

    /// Tell the backend an explicitly ended session is over. Untracked; the
    /// outcome is only logged.
    RevokeSession { token: SessionToken },
}

impl UiEffect {
    /// The task slot of a tracked effect, with the kind it belongs to.
    pub fn task_slot(&mut self) -> Option<(TaskKind, &mut Option<TaskId>)> {
        match self {
            UiEffect::SubmitLogin { task, .. } => Some((TaskKind::Login, task)),
            UiEffect::FetchUsers { task } => Some((TaskKind::UserList, task)),
            UiEffect::CreateUser { task, .. } | UiEffect::UpdateUser { task, .. } => {
                Some((TaskKind::UserSave, task))
            }
            UiEffect::DeleteUser { task, .. } => Some((TaskKind::UserDelete, task)),
            UiEffect::Quit | UiEffect::RevokeSession { .. } => None,
        }
    }
}
