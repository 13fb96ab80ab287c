//! Auth feature view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{AuthState, LoginField, LoginPhase};
use crate::common::{mask_secret, truncate_with_ellipsis};
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_overlay_container,
};
use crate::render::SPINNER_FRAMES;

/// Renders the full-screen login form.
pub fn render_login_view(frame: &mut Frame, auth: &AuthState, area: Rect, spinner_frame: usize) {
    let popup_width = 54;
    let popup_height = 11;
    let popup = calculate_overlay_area(area, area.height, popup_width, popup_height);
    render_overlay_container(frame, popup, "Admin Login", Color::Cyan);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );
    let value_width = inner.width.saturating_sub(12) as usize;

    let masked = mask_secret(&auth.password);
    let mut lines = vec![
        Line::from(""),
        field_line(
            "Username",
            &truncate_with_ellipsis(&auth.username, value_width),
            auth.focus == LoginField::Username,
        ),
        field_line(
            "Password",
            &truncate_with_ellipsis(&masked, value_width),
            auth.focus == LoginField::Password,
        ),
        Line::from(""),
    ];

    match (auth.phase, auth.message.as_deref()) {
        (LoginPhase::Submitting, _) => {
            let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                format!("{spinner} Signing in..."),
                Style::default().fg(Color::Yellow),
            )));
        }
        (LoginPhase::Failed, Some(message)) => {
            lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        (_, Some(message)) => {
            lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }
        (_, None) => {}
    }

    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);

    let hints = [
        InputHint::new("Enter", "log in"),
        InputHint::new("Tab", "switch field"),
        InputHint::new("Ctrl+C", "quit"),
    ];
    render_hints(frame, inner, &hints, Color::Cyan);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}
