use uadm_core::api::{UserId, UserRecord};

/// Table header, in display order.
pub const COLUMNS: [&str; 5] = ["Username", "Email", "Type", "Active", "Actions"];

pub const LOADING_MESSAGE: &str = "Loading users...";
pub const NO_USERS_MESSAGE: &str = "No users found.";
pub const NOT_SPECIFIED: &str = "Not specified";
const ROW_ACTIONS: &str = "[e] Edit  [d] Delete";

/// What a row's action buttons do. Both carry the cached record data, so
/// opening the editor needs no extra fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit(UserRecord),
    Delete { id: UserId, username: String },
}

/// One table row, backed by the record it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    record: UserRecord,
}

impl UserRow {
    pub fn new(record: UserRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &UserRecord {
        &self.record
    }

    /// Display text per column, aligned with [`COLUMNS`].
    pub fn cells(&self) -> [String; COLUMNS.len()] {
        [
            self.record.username.clone(),
            self.record.email.clone(),
            self.record
                .type_of_user
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(NOT_SPECIFIED)
                .to_string(),
            if self.record.is_active { "Yes" } else { "No" }.to_string(),
            ROW_ACTIONS.to_string(),
        ]
    }

    pub fn edit(&self) -> RowAction {
        RowAction::Edit(self.record.clone())
    }

    pub fn delete(&self) -> RowAction {
        RowAction::Delete {
            id: self.record.id.clone(),
            username: self.record.username.clone(),
        }
    }
}

/// A single message row spanning the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub text: String,
    pub colspan: usize,
}

impl Placeholder {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colspan: COLUMNS.len(),
        }
    }
}

/// What the table body currently shows. Always derived from the latest fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableBody {
    #[default]
    Loading,
    Failed(String),
    Empty,
    Rows(Vec<UserRow>),
}

impl TableBody {
    pub fn from_records(records: Vec<UserRecord>) -> Self {
        if records.is_empty() {
            TableBody::Empty
        } else {
            TableBody::Rows(records.into_iter().map(UserRow::new).collect())
        }
    }

    /// The spanning message row, or `None` when data rows are shown.
    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            TableBody::Loading => Some(Placeholder::new(LOADING_MESSAGE)),
            TableBody::Failed(message) => {
                Some(Placeholder::new(format!("Failed to load users: {message}")))
            }
            TableBody::Empty => Some(Placeholder::new(NO_USERS_MESSAGE)),
            TableBody::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> &[UserRow] {
        match self {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsersState {
    pub body: TableBody,
    pub selected: usize,
}

impl UsersState {
    pub fn set_records(&mut self, records: Vec<UserRecord>) {
        self.body = TableBody::from_records(records);
        let len = self.body.rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn selected_row(&self) -> Option<&UserRow> {
        self.body.rows().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.body.rows().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
