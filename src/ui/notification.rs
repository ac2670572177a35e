use super::common::centered_rect;
use crate::app::{App, Notification};
use crate::utils::format_file_size;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the oldest pending notification as a modal
pub fn render_notification(f: &mut Frame, app: &App) {
    let queue = app.notifications();
    let notification = match queue.current() {
        Some(n) => n,
        None => return,
    };

    let (title, color, lines) = match notification {
        Notification::Error { path, message } => (
            " 错误 Error ",
            Color::Red,
            vec![
                Line::from(Span::styled(
                    path.display().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(message.clone()),
            ],
        ),
        Notification::Success { reports } => {
            let saved: u64 = reports.iter().map(|r| r.saved_bytes()).sum();
            let mut lines: Vec<Line> = reports
                .iter()
                .map(|r| Line::from(r.output.display().to_string()))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Saved {}", format_file_size(saved)),
                Style::default().fg(Color::Green),
            )));
            (" 成功 Success ", Color::Green, lines)
        }
    };

    let area = centered_rect(70, 50, f.area());
    f.render_widget(Clear, area);

    let block_title = if queue.len() > 1 {
        format!("{}(1/{}) ", title, queue.len())
    } else {
        title.to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(block_title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    let body = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[0]);

    let hint = Paragraph::new(Span::styled(" OK ", Style::default().fg(Color::Black).bg(color)))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[1]);
}
