//! Async task bookkeeping.
//!
//! Every network call started by the reducer gets a `TaskId`. The matching
//! `TaskState` remembers the id that is currently in flight; a completion whose
//! id is no longer active (superseded by a newer call, or cleared on logout)
//! is dropped without touching the UI.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    UserList,
    UserSave,
    UserDelete,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` as the live task, superseding any earlier one.
    pub fn start(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub user_list: TaskState,
    pub user_save: TaskState,
    pub user_delete: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::UserList => &self.user_list,
            TaskKind::UserSave => &self.user_save,
            TaskKind::UserDelete => &self.user_delete,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::UserList => &mut self.user_list,
            TaskKind::UserSave => &mut self.user_save,
            TaskKind::UserDelete => &mut self.user_delete,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.user_list.is_running()
            || self.user_save.is_running()
            || self.user_delete.is_running()
    }

    /// Abandons everything in flight.
    pub fn clear_all(&mut self) {
        self.login.clear();
        self.user_list.clear();
        self.user_save.clear();
        self.user_delete.clear();
    }
}
