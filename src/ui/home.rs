use crate::app::{App, HistoryEntry};
use crate::utils::format_file_size;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn render_home(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .margin(1)
        .split(f.area());

    // Title
    let title = Paragraph::new("PNG瘦身工具 · PNG Slimmer")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(title, chunks[0]);

    // Drop zone
    let busy = !app.coordinator.is_idle();
    let border_color = if busy { Color::Yellow } else { Color::DarkGray };
    let drop_zone = Paragraph::new(app.status_text())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(" Drop zone "),
        );
    f.render_widget(drop_zone, chunks[1]);

    // History
    let items: Vec<ListItem> = app.history.iter().map(create_history_item).collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recent "),
    );
    f.render_widget(list, chunks[2]);

    // Help
    let help_text = Line::from(vec![
        Span::styled("Drop files", Style::default().fg(Color::Yellow)),
        Span::raw(" Queue  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Dismiss  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(help, chunks[3]);
}

fn create_history_item(entry: &HistoryEntry) -> ListItem<'static> {
    let time = entry.finished_at.format("%H:%M:%S").to_string();
    let name = entry.result.filename();

    let (icon, color, detail) = match &entry.result.outcome {
        Ok(report) => {
            let mut detail = format!(
                "saved {} ({} -> {})",
                format_file_size(report.saved_bytes()),
                format_file_size(report.input_size),
                format_file_size(report.output_size)
            );
            if !report.metadata_kept {
                detail.push_str(", metadata dropped");
            }
            ("✓", Color::Green, detail)
        }
        Err(e) => ("✗", Color::Red, e.to_string()),
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("{} ", time), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} ", icon), Style::default().fg(color)),
        Span::styled(name, Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(detail, Style::default().fg(Color::Gray)),
    ]))
}
