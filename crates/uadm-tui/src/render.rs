//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never mutate
//! state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::auth::render_login_view;
use crate::common::{TaskKind, truncate_with_ellipsis};
use crate::overlays::OverlayExt;
use crate::state::{AppState, TuiState, View};
use crate::users::render_users_view;

/// Height of the title bar.
const HEADER_HEIGHT: u16 = 1;

/// Height of the status line.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for status line animation.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(state, frame, chunks[0]);

    match state.view {
        View::Login => render_login_view(frame, &state.auth, chunks[1], state.spinner_frame),
        View::Users => render_users_view(frame, &state.users, chunks[1]),
    }

    render_status_line(state, frame, chunks[2]);

    // Overlay last so it sits on top.
    app.overlay.render(frame, chunks[1], &state.tasks);
}

fn render_header(state: &TuiState, frame: &mut Frame, area: Rect) {
    let session = if state.session.is_active() {
        Span::styled("● signed in", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ signed out", Style::default().fg(Color::DarkGray))
    };
    let line = Line::from(vec![
        Span::styled(
            " User Admin ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        session,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the status line: activity, key hints, and the backend URL.
fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];

    let activity = [
        (TaskKind::Login, "Signing in..."),
        (TaskKind::UserList, "Loading users..."),
        (TaskKind::UserSave, "Saving..."),
        (TaskKind::UserDelete, "Deleting..."),
    ]
    .into_iter()
    .find(|(kind, _)| state.tasks.state(*kind).is_running())
    .map(|(_, label)| label);

    let mut spans: Vec<Span> = if let Some(label) = activity {
        vec![
            Span::styled(spinner, Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(Color::Yellow)),
        ]
    } else {
        match state.view {
            View::Login => vec![
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::raw(" log in  "),
                Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)),
                Span::raw(" quit"),
            ],
            View::Users => vec![
                Span::styled("a", Style::default().fg(Color::DarkGray)),
                Span::raw(" add  "),
                Span::styled("e", Style::default().fg(Color::DarkGray)),
                Span::raw(" edit  "),
                Span::styled("d", Style::default().fg(Color::DarkGray)),
                Span::raw(" delete  "),
                Span::styled("r", Style::default().fg(Color::DarkGray)),
                Span::raw(" refresh  "),
                Span::styled("l", Style::default().fg(Color::DarkGray)),
                Span::raw(" logout  "),
                Span::styled("q", Style::default().fg(Color::DarkGray)),
                Span::raw(" quit"),
            ],
        }
    };

    let used: usize = spans.iter().map(Span::width).sum();
    let room = (area.width as usize).saturating_sub(used + 2);
    if room > 4 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            truncate_with_ellipsis(&state.api_base_url, room),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(status, area);
}
