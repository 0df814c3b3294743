//! Per-device breakdown panel
//!
//! Only ever sees the device list of the selected week.

use crate::models::DeviceUsage;
use crate::util::format::{format_hours, format_share, share, share_bar};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MAX_VISIBLE_DEVICES: usize = 6;
const NAME_WIDTH: usize = 10;
const BAR_WIDTH: usize = 20;

/// Stats panel over a borrowed device list
#[derive(Debug, Clone, Copy)]
pub struct StatsPanel<'a> {
    devices: &'a [DeviceUsage],
}

impl<'a> StatsPanel<'a> {
    pub fn new(devices: &'a [DeviceUsage]) -> Self {
        Self { devices }
    }

    /// Rows needed to show every device plus the border
    pub fn height(devices: &[DeviceUsage]) -> u16 {
        (devices.len().clamp(1, MAX_VISIBLE_DEVICES) + 2) as u16
    }

    fn lines(&self) -> Vec<Line<'static>> {
        if self.devices.is_empty() {
            return vec![Line::from(Span::styled(
                "No device data",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let total: f64 = self
            .devices
            .iter()
            .map(|d| d.hours)
            .filter(|h| h.is_finite() && *h > 0.0)
            .sum();

        self.devices
            .iter()
            .take(MAX_VISIBLE_DEVICES)
            .map(|device| {
                let name: String = device.name.chars().take(NAME_WIDTH).collect();
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$} ", name, width = NAME_WIDTH),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        share_bar(share(device.hours, total), BAR_WIDTH),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(format!(
                        " {:>8} {:>4}",
                        format_hours(Some(device.hours)),
                        format_share(device.hours, total)
                    )),
                ])
            })
            .collect()
    }

    /// Render the panel into `area`
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let panel = Paragraph::new(self.lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Devices")
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(panel, area);
    }
}
