//! Search-confirm notice popup

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// One-shot message echoing the submitted search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    /// Query exactly as it was typed
    pub query: String,
}

impl Notice {
    pub fn search_query(query: &str) -> Self {
        Self {
            title: "Search query".to_string(),
            message: format!("The searched query was: {}", query),
            query: query.to_string(),
        }
    }

    /// Render centred over `area`
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 7, area);
        let body = vec![
            Line::from(""),
            Line::from(self.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to close",
                Style::default().fg(Color::Yellow),
            )),
        ];

        let paragraph = Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.as_str())
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
