//! Delete confirmation overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use uadm_core::api::UserId;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::effects::UiEffect;
use crate::state::TuiState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDeleteState {
    pub id: UserId,
    pub username: String,
}

impl ConfirmDeleteState {
    pub fn new(id: UserId, username: String) -> Self {
        Self { id, username }
    }

    pub fn prompt(&self) -> String {
        format!("Delete user \"{}\"?", self.username)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("y", "delete"), InputHint::new("n/Esc", "cancel")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Confirm delete",
                border_color: Color::Red,
                width: 56,
                height: 7,
                hints: &hints,
            },
        );

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.prompt(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "This cannot be undone.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), layout.body);
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                if tui.tasks.user_delete.is_running() {
                    return OverlayUpdate::stay();
                }
                tracing::info!(id = %self.id, "delete confirmed");
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::DeleteUser {
                    task: None,
                    id: self.id.clone(),
                }])
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }
}
