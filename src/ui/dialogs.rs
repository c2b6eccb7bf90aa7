//! Dialog rendering module
//!
//! This module handles the blocking notification popup and the static
//! banner shown when the catalog cannot be loaded.

use crate::app::{AppMode, CATALOG_ERROR_BANNER, Popup};
use crate::components::help_overlay::centered_rect;
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the catalog error banner in place of the dish grid
pub fn render_catalog_error(f: &mut Frame, area: Rect) {
    let banner_area = Rect::new(area.x, area.y, area.width, area.height.min(5));
    let banner = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(CATALOG_ERROR_BANNER, Styles::banner_danger())),
    ])
    .alignment(Alignment::Center)
    .style(Styles::banner_danger())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Colors::ERROR)),
    );
    f.render_widget(banner, banner_area);
}

/// Render a blocking popup with an OK button
pub fn render_popup(f: &mut Frame, popup: &Popup, mode: AppMode) {
    let width = popup
        .lines
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .max(popup.title.chars().count() as u16)
        .saturating_add(8)
        .max(30);
    let height = popup.lines.len() as u16 + 6;
    let area = centered_rect(f.area(), width, height);

    let border = match mode {
        AppMode::OrderPlaced => Style::default().fg(Colors::SUCCESS),
        _ => Style::default().fg(Colors::WARNING),
    };

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(popup.lines.iter().map(|l| Line::from(l.as_str())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  OK  ", Styles::button_active())));

    f.render_widget(Clear, area);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Styles::panel_bg())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", popup.title)),
        );
    f.render_widget(widget, area);
}
