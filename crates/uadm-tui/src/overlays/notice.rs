//! Blocking notice. Any key dismisses it.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeState {
    pub message: String,
}

impl NoticeState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("any key", "dismiss")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Error",
                border_color: Color::Red,
                width: 60,
                height: 7,
                hints: &hints,
            },
        );
        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default().fg(Color::White),
            )),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(body, layout.body);
    }

    pub fn handle_key(&mut self, _key: KeyEvent) -> OverlayUpdate {
        OverlayUpdate::close()
    }
}
