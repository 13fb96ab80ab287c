//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function.
//!
//! - `user_form.rs`: create/edit user modal
//! - `confirm_delete.rs`: delete confirmation
//! - `notice.rs`: blocking error notice
//! - `render_utils.rs`: shared rendering helpers

pub mod confirm_delete;
pub mod notice;
pub mod render_utils;
pub mod user_form;

pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
pub use notice::NoticeState;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use user_form::{FormDraft, FormField, FormMode, Submission, UserFormState};

use crate::common::Tasks;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    UserForm(UserFormState),
    ConfirmDelete(ConfirmDeleteState),
    Notice(NoticeState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks) {
        match self {
            Overlay::UserForm(f) => f.render(frame, area, tasks),
            Overlay::ConfirmDelete(c) => c.render(frame, area),
            Overlay::Notice(n) => n.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::UserForm(f) => f.handle_key(tui, key),
            Overlay::ConfirmDelete(c) => c.handle_key(tui, key),
            Overlay::Notice(n) => n.handle_key(key),
        }
    }

    pub fn as_user_form_mut(&mut self) -> Option<&mut UserFormState> {
        match self {
            Overlay::UserForm(f) => Some(f),
            _ => None,
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tasks);
        }
    }
}
