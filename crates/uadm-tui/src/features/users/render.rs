//! Users table view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::state::{COLUMNS, UsersState};
use crate::common::truncate_with_ellipsis;

const WIDTHS: [Constraint; COLUMNS.len()] = [
    Constraint::Percentage(20),
    Constraint::Percentage(30),
    Constraint::Percentage(16),
    Constraint::Length(8),
    Constraint::Min(20),
];

pub fn render_users_view(frame: &mut Frame, users: &UsersState, area: Rect) {
    let count = users.body.rows().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Users ({count}) "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    if let Some(placeholder) = users.body.placeholder() {
        // Header plus one message line spanning every column.
        let table = Table::new(Vec::<Row>::new(), WIDTHS).header(header);
        frame.render_widget(table, inner);

        if inner.height > 1 {
            let style = if placeholder.text.starts_with("Failed") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let line_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            let text = truncate_with_ellipsis(&placeholder.text, inner.width as usize);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(text, style)))
                    .alignment(Alignment::Center),
                line_area,
            );
        }
        return;
    }

    let rows = users.body.rows().iter().map(|row| {
        let [username, email, kind, active, actions] = row.cells();
        let active_style = if row.record().is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        Row::new(vec![
            Cell::from(username),
            Cell::from(email),
            Cell::from(kind),
            Cell::from(active).style(active_style),
            Cell::from(actions).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(users.selected));
    frame.render_stateful_widget(table, inner, &mut state);
}
