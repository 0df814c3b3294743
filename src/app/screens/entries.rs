//! Weekly entries screen
//!
//! Holds the loaded weeks, the search query and the selected week. The
//! visible rows are recomputed from scratch whenever the list or the query
//! changes, so they always reflect the latest state of both.

use super::notice::Notice;
use super::stats::StatsPanel;
use crate::error::user_friendly_message;
use crate::filter::compute_filtered_view;
use crate::models::WeekEntry;
use crate::util::format::format_hours;
use crate::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::{debug, info, warn};

pub const EMPTY_TABLE_TEXT: &str = "No data available";

/// Progress of the entry list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Entries screen component
#[derive(Debug)]
pub struct EntriesScreen {
    entries: Vec<WeekEntry>,
    query: String,
    filtered: Vec<WeekEntry>,
    selected: Option<WeekEntry>,
    load_state: LoadState,
    delimiter: char,
    table_state: TableState,
    /// Table area of the last frame, for mouse hit-testing
    table_area: Rect,
}

impl EntriesScreen {
    /// Create an empty screen waiting for its first load
    pub fn new(delimiter: char) -> Self {
        Self {
            entries: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
            selected: None,
            load_state: LoadState::Loading,
            delimiter,
            table_state: TableState::default(),
            table_area: Rect::default(),
        }
    }

    /// Apply the outcome of a load
    pub fn apply_load(&mut self, result: Result<Vec<WeekEntry>>) {
        match result {
            Ok(entries) => self.set_entries(entries),
            Err(err) => {
                warn!("weekly entries failed to load: {}", err);
                self.load_state = LoadState::Failed(user_friendly_message(&err));
            }
        }
    }

    /// Replace the entry list wholesale; the newest week becomes selected
    pub fn set_entries(&mut self, entries: Vec<WeekEntry>) {
        info!(count = entries.len(), "entry list replaced");
        self.selected = entries.last().cloned();
        self.entries = entries;
        self.load_state = LoadState::Ready;
        self.refresh_filter();
    }

    /// Mark a reload in progress; the current list stays visible
    pub fn begin_reload(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn entries(&self) -> &[WeekEntry] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows matching the current query, in list order
    pub fn filtered(&self) -> &[WeekEntry] {
        &self.filtered
    }

    pub fn selected(&self) -> Option<&WeekEntry> {
        self.selected.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Replace the search query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_filter();
    }

    /// Append one typed character
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh_filter();
    }

    /// Remove the last character
    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refresh_filter();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refresh_filter();
        }
    }

    fn refresh_filter(&mut self) {
        self.filtered = compute_filtered_view(&self.entries, &self.query);
        debug!(query = %self.query, visible = self.filtered.len(), "filter recomputed");

        let highlight = match self.table_state.selected() {
            _ if self.filtered.is_empty() => None,
            Some(i) => Some(i.min(self.filtered.len() - 1)),
            None => Some(0),
        };
        self.table_state.select(highlight);
    }

    /// Make `entry` the selected week; it need not come from the list
    pub fn select_row(&mut self, entry: WeekEntry) {
        debug!(start = %entry.start_date, end = %entry.end_date, "week selected");
        self.selected = Some(entry);
    }

    /// Row under the keyboard highlight
    pub fn highlighted(&self) -> Option<&WeekEntry> {
        self.table_state.selected().and_then(|i| self.filtered.get(i))
    }

    /// Select the highlighted row; false when nothing is highlighted
    pub fn select_highlighted(&mut self) -> bool {
        match self.highlighted().cloned() {
            Some(entry) => {
                self.select_row(entry);
                true
            }
            None => false,
        }
    }

    /// Move highlight down, wrapping to the top
    pub fn highlight_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < self.filtered.len() => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(next));
    }

    /// Move highlight up, wrapping to the bottom
    pub fn highlight_previous(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let previous = match self.table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.filtered.len() - 1,
        };
        self.table_state.select(Some(previous));
    }

    pub fn highlight_first(&mut self) {
        if !self.filtered.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn highlight_last(&mut self) {
        if !self.filtered.is_empty() {
            self.table_state.select(Some(self.filtered.len() - 1));
        }
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Index of the visible row drawn at terminal cell (`column`, `row`)
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.table_area;
        // Border and header row sit above the first entry
        let first_row = area.y.saturating_add(2);
        let last_row = area.bottom().saturating_sub(1);
        if column <= area.x
            || column >= area.right().saturating_sub(1)
            || row < first_row
            || row >= last_row
        {
            return None;
        }

        let index = self.table_state.offset() + usize::from(row - first_row);
        (index < self.filtered.len()).then_some(index)
    }

    /// Select the row under a mouse click
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        match self.row_at(column, row) {
            Some(index) => {
                self.table_state.select(Some(index));
                self.select_highlighted()
            }
            None => false,
        }
    }

    /// Notice for the search-confirm control; `None` when the query is empty
    pub fn submit_search(&self) -> Option<Notice> {
        if self.query.is_empty() {
            return None;
        }
        info!(query = %self.query, "search submitted");
        Some(Notice::search_query(&self.query))
    }

    /// Date range shown above the stats panel
    pub fn header_text(&self) -> String {
        match (&self.selected, &self.load_state) {
            (Some(entry), _) => entry.date_range(self.delimiter),
            (None, LoadState::Loading) => "Loading screen time...".to_string(),
            (None, LoadState::Failed(_)) => "Screen time unavailable".to_string(),
            (None, LoadState::Ready) => "No week selected".to_string(),
        }
    }

    /// Render the whole screen into `area`
    /// Load progress for a list that is already on screen.
    ///
    /// With no list loaded, the table placeholder carries this instead.
    pub fn status_text(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        match &self.load_state {
            LoadState::Ready => None,
            LoadState::Loading => Some("Reloading...".to_string()),
            LoadState::Failed(message) => {
                Some(format!("Reload failed: {}  Press r to retry", message))
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, search_focused: bool) {
        let devices = self
            .selected
            .as_ref()
            .map(|e| e.devices.as_slice())
            .unwrap_or(&[]);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Selected range
                Constraint::Length(StatsPanel::height(devices)),
                Constraint::Length(1), // Table title
                Constraint::Length(3), // Search box
                Constraint::Min(4),    // Weekly table
                Constraint::Length(3), // Help text
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        StatsPanel::new(devices).render(f, chunks[1]);

        let title = Paragraph::new("Screen time per week")
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(title, chunks[2]);

        self.render_search(f, chunks[3], search_focused);
        self.render_table(f, chunks[4]);
        self.render_help(f, chunks[5], search_focused);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(self.header_text())
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_search(&self, f: &mut Frame, area: Rect, focused: bool) {
        let text = if self.query.is_empty() && !focused {
            Span::styled("Search", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.query.as_str())
        };
        let border = if focused { Color::Yellow } else { Color::White };

        let search = Paragraph::new(Line::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(search, area);

        if focused {
            let width = self.query.chars().count() as u16;
            let x = area.x + 1 + width.min(area.width.saturating_sub(3));
            f.set_cursor(x, area.y + 1);
        }
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        self.table_area = area;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        if let Some(status) = self.status_text() {
            let color = match self.load_state {
                LoadState::Failed(_) => Color::Red,
                _ => Color::Yellow,
            };
            block = block.title(Span::styled(status, Style::default().fg(color)));
        }

        let placeholder = match &self.load_state {
            LoadState::Failed(message) if self.entries.is_empty() => Some(vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
                Line::from(Span::styled(
                    "Press r to retry",
                    Style::default().fg(Color::Yellow),
                )),
            ]),
            LoadState::Loading if self.entries.is_empty() => Some(vec![Line::from("Loading...")]),
            _ if self.filtered.is_empty() => Some(vec![Line::from(EMPTY_TABLE_TEXT)]),
            _ => None,
        };

        if let Some(lines) = placeholder {
            f.render_widget(Paragraph::new(lines).block(block), area);
            return;
        }

        let header = Row::new(vec!["Day range", "Total screen time"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|entry| {
                let style = if self.selected.as_ref() == Some(entry) {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    entry.date_range(self.delimiter),
                    format_hours(entry.total_hours),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(26), Constraint::Length(18)])
            .header(header)
            .block(block)
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ")
            .column_spacing(2);

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, search_focused: bool) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let spans = if search_focused {
            vec![
                Span::styled("Type", key),
                Span::raw(" Filter  "),
                Span::styled("Enter", key),
                Span::raw(" Confirm  "),
                Span::styled("Ctrl+U", key),
                Span::raw(" Clear  "),
                Span::styled("Esc", key),
                Span::raw(" Done"),
            ]
        } else {
            vec![
                Span::styled("↑↓", key),
                Span::raw(" Navigate  "),
                Span::styled("Enter", key),
                Span::raw(" Select  "),
                Span::styled("/", key),
                Span::raw(" Search  "),
                Span::styled("r", key),
                Span::raw(" Reload  "),
                Span::styled("Q", key),
                Span::raw(" Quit"),
            ]
        };

        let help = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }
}

impl Default for EntriesScreen {
    fn default() -> Self {
        Self::new(crate::models::DEFAULT_DATE_DELIMITER)
    }
}
