//! Create/edit user modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use uadm_core::api::{CreateUserRequest, UpdateUserRequest, UserId, UserRecord};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};
use crate::common::{Tasks, mask_secret, truncate_with_ellipsis};
use crate::effects::UiEffect;
use crate::state::TuiState;

pub const CREATE_TITLE: &str = "Add new user";
pub const CREATE_HELP: &str = "Password must be at least 6 characters.";
pub const EDIT_HELP: &str =
    "Enter a new password to change it. Leave blank to keep the current one.";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "Password is required for a new user.";
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: UserId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Username,
    Email,
    Password,
    TypeOfUser,
    Active,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Username,
        FormField::Email,
        FormField::Password,
        FormField::TypeOfUser,
        FormField::Active,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Username => "Username",
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::TypeOfUser => "Type",
            FormField::Active => "Active",
        }
    }
}

/// Editable copy of a user while the modal is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub type_of_user: String,
    pub is_active: bool,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            type_of_user: String::new(),
            is_active: true,
        }
    }
}

impl FormDraft {
    /// Pre-fills from a cached record. The password always starts blank.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
            password: String::new(),
            type_of_user: record.type_of_user.clone().unwrap_or_default(),
            is_active: record.is_active,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Username => Some(&mut self.username),
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::TypeOfUser => Some(&mut self.type_of_user),
            FormField::Active => None,
        }
    }
}

/// A validated form, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(CreateUserRequest),
    Update {
        id: UserId,
        request: UpdateUserRequest,
    },
}

impl Submission {
    pub fn into_effect(self) -> UiEffect {
        match self {
            Submission::Create(request) => UiEffect::CreateUser {
                task: None,
                request,
            },
            Submission::Update { id, request } => UiEffect::UpdateUser {
                task: None,
                id,
                request,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserFormState {
    pub mode: FormMode,
    pub draft: FormDraft,
    pub focus: FormField,
    /// Username at open time, for the edit title.
    original_username: String,
    /// Inline error (local validation or a failed save).
    pub error: Option<String>,
}

impl UserFormState {
    pub fn open_create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: FormDraft::default(),
            focus: FormField::Username,
            original_username: String::new(),
            error: None,
        }
    }

    pub fn open_edit(record: &UserRecord) -> Self {
        Self {
            mode: FormMode::Edit {
                id: record.id.clone(),
            },
            draft: FormDraft::from_record(record),
            focus: FormField::Username,
            original_username: record.username.clone(),
            error: None,
        }
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create => CREATE_TITLE.to_string(),
            FormMode::Edit { .. } => format!("Edit: {}", self.original_username),
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self.mode {
            FormMode::Create => CREATE_HELP,
            FormMode::Edit { .. } => EDIT_HELP,
        }
    }

    pub fn password_required(&self) -> bool {
        self.mode == FormMode::Create
    }

    /// Validates the draft and builds the request body.
    ///
    /// A password that is blank after trimming counts as "not supplied": a
    /// create is rejected, an update omits the field. A supplied password is
    /// sent exactly as typed. A blank type is omitted.
    pub fn build_submission(&self) -> Result<Submission, String> {
        let draft = &self.draft;
        let password =
            (!draft.password.trim().is_empty()).then(|| draft.password.clone());
        let type_of_user = Some(draft.type_of_user.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        match &self.mode {
            FormMode::Create => {
                let password = password.ok_or_else(|| PASSWORD_REQUIRED_MESSAGE.to_string())?;
                Ok(Submission::Create(CreateUserRequest {
                    username: draft.username.clone(),
                    email: draft.email.clone(),
                    password,
                    is_active: draft.is_active,
                    type_of_user,
                }))
            }
            FormMode::Edit { id } => Ok(Submission::Update {
                id: id.clone(),
                request: UpdateUserRequest {
                    username: draft.username.clone(),
                    email: draft.email.clone(),
                    password,
                    is_active: draft.is_active,
                    type_of_user,
                },
            }),
        }
    }

    /// Appends pasted text to the focused text field.
    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.draft.text_mut(self.focus) {
            field.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks) {
        render_user_form(frame, self, area, tasks.user_save.is_running());
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // The form stays until its pending save reports back.
            KeyCode::Esc if tui.tasks.user_save.is_running() => OverlayUpdate::stay(),
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if tui.tasks.user_save.is_running() {
                    return OverlayUpdate::stay();
                }
                match self.build_submission() {
                    Ok(submission) => {
                        self.error = None;
                        OverlayUpdate::stay().with_ui_effects(vec![submission.into_effect()])
                    }
                    Err(message) => {
                        self.error = Some(message);
                        OverlayUpdate::stay()
                    }
                }
            }
            KeyCode::Char(' ') if self.focus == FormField::Active => {
                self.draft.is_active = !self.draft.is_active;
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                if let Some(field) = self.draft.text_mut(self.focus) {
                    field.pop();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.draft.text_mut(self.focus) {
                    field.push(c);
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_user_form(frame: &mut Frame, state: &UserFormState, area: Rect, saving: bool) {
    let hints = [
        InputHint::new("Tab", "next"),
        InputHint::new("Space", "toggle"),
        InputHint::new("Enter", "save"),
        InputHint::new("Esc", "cancel"),
    ];
    let title = state.title();
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: &title,
            border_color: Color::Cyan,
            width: 64,
            height: 14,
            hints: &hints,
        },
    );
    let body = layout.body;
    let value_width = body.width.saturating_sub(12) as usize;

    let lines: Vec<Line> = FormField::ORDER
        .iter()
        .map(|field| {
            let focused = *field == state.focus;
            let value = match field {
                FormField::Username => state.draft.username.clone(),
                FormField::Email => state.draft.email.clone(),
                FormField::Password => mask_secret(&state.draft.password),
                FormField::TypeOfUser => state.draft.type_of_user.clone(),
                FormField::Active => {
                    if state.draft.is_active { "[x]" } else { "[ ]" }.to_string()
                }
            };
            field_line(*field, &truncate_with_ellipsis(&value, value_width), focused, state)
        })
        .collect();
    let fields_area = Rect::new(body.x, body.y + 1, body.width, FormField::ORDER.len() as u16);
    frame.render_widget(Paragraph::new(lines), fields_area);

    render_separator(frame, body, FormField::ORDER.len() as u16 + 2);

    let (status, style) = if saving {
        ("Saving...".to_string(), Style::default().fg(Color::Yellow))
    } else if let Some(error) = &state.error {
        (error.clone(), Style::default().fg(Color::Red))
    } else {
        (
            state.help_text().to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };
    let status_y = FormField::ORDER.len() as u16 + 3;
    let status_area = Rect::new(
        body.x,
        body.y + status_y,
        body.width,
        body.height.saturating_sub(status_y),
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(status, style))).wrap(Wrap { trim: true }),
        status_area,
    );
}

fn field_line(
    field: FormField,
    value: &str,
    focused: bool,
    state: &UserFormState,
) -> Line<'static> {
    let required = field == FormField::Password && state.password_required();
    let label = if required {
        format!("{}*", field.label())
    } else {
        field.label().to_string()
    };
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ];
    if focused && field != FormField::Active {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use uadm_core::session::SessionStore;

    use super::*;
    use crate::common::{TaskId, TaskKind};
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn tui() -> TuiState {
        TuiState::new(SessionStore::new(), "http://test".to_string())
    }

    fn type_text(form: &mut UserFormState, tui: &TuiState, text: &str) {
        for c in text.chars() {
            form.handle_key(tui, key(KeyCode::Char(c)));
        }
    }

    fn ann() -> UserRecord {
        UserRecord {
            id: UserId::new("7"),
            username: "ann".to_string(),
            email: "ann@x.com".to_string(),
            is_active: false,
            type_of_user: Some("manager".to_string()),
        }
    }

    #[test]
    fn test_create_mode_texts() {
        let form = UserFormState::open_create();
        assert_eq!(form.title(), "Add new user");
        assert_eq!(form.help_text(), CREATE_HELP);
        assert!(form.password_required());
        assert!(form.draft.is_active);
    }

    #[test]
    fn test_edit_mode_prefills_without_password() {
        let form = UserFormState::open_edit(&ann());
        assert_eq!(form.title(), "Edit: ann");
        assert_eq!(form.help_text(), EDIT_HELP);
        assert!(!form.password_required());
        assert_eq!(form.draft.email, "ann@x.com");
        assert_eq!(form.draft.type_of_user, "manager");
        assert!(!form.draft.is_active);
        assert!(form.draft.password.is_empty());
    }

    #[test]
    fn test_create_without_password_is_rejected_locally() {
        let tui = tui();
        let mut form = UserFormState::open_create();
        type_text(&mut form, &tui, "ann");

        let update = form.handle_key(&tui, key(KeyCode::Enter));

        assert!(update.effects.is_empty());
        assert_eq!(form.error.as_deref(), Some(PASSWORD_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_create_builds_full_request() {
        let tui = tui();
        let mut form = UserFormState::open_create();
        type_text(&mut form, &tui, "ann");
        form.handle_key(&tui, key(KeyCode::Tab));
        type_text(&mut form, &tui, "ann@x.com");
        form.handle_key(&tui, key(KeyCode::Tab));
        type_text(&mut form, &tui, "secret");

        let update = form.handle_key(&tui, key(KeyCode::Enter));

        let [UiEffect::CreateUser { request, .. }] = update.effects.as_slice() else {
            panic!("expected a create effect");
        };
        assert_eq!(request.username, "ann");
        assert_eq!(request.email, "ann@x.com");
        assert_eq!(request.password, "secret");
        assert!(request.is_active);
        assert_eq!(request.type_of_user, None);
    }

    #[test]
    fn test_edit_with_blank_password_omits_it() {
        let mut form = UserFormState::open_edit(&ann());
        form.draft.password = "   ".to_string();

        let Ok(Submission::Update { id, request }) = form.build_submission() else {
            panic!("expected an update");
        };
        assert_eq!(id, UserId::new("7"));
        assert_eq!(request.password, None);
        assert_eq!(request.type_of_user.as_deref(), Some("manager"));
    }

    #[test]
    fn test_edit_with_new_password_sends_it_verbatim() {
        let mut form = UserFormState::open_edit(&ann());
        form.draft.password = " n3w pass".to_string();

        let Ok(Submission::Update { request, .. }) = form.build_submission() else {
            panic!("expected an update");
        };
        assert_eq!(request.password.as_deref(), Some(" n3w pass"));
    }

    #[test]
    fn test_space_toggles_active_only_on_checkbox() {
        let tui = tui();
        let mut form = UserFormState::open_create();
        form.handle_key(&tui, key(KeyCode::Char(' ')));
        assert_eq!(form.draft.username, " ");
        assert!(form.draft.is_active);

        form.focus = FormField::Active;
        form.handle_key(&tui, key(KeyCode::Char(' ')));
        assert!(!form.draft.is_active);
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        assert_eq!(FormField::Active.next(), FormField::Username);
        assert_eq!(FormField::Username.prev(), FormField::Active);
    }

    #[test]
    fn test_submit_ignored_while_save_in_flight() {
        let mut tui = tui();
        tui.tasks.state_mut(TaskKind::UserSave).start(TaskId(1));
        let mut form = UserFormState::open_edit(&ann());

        let update = form.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_escape_ignored_while_save_in_flight() {
        let mut tui = tui();
        let mut form = UserFormState::open_edit(&ann());
        assert!(matches!(
            form.handle_key(&tui, key(KeyCode::Esc)).transition,
            OverlayTransition::Close
        ));

        tui.tasks.state_mut(TaskKind::UserSave).start(TaskId(1));
        let update = form.handle_key(&tui, key(KeyCode::Esc));

        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(update.effects.is_empty());
    }
}
