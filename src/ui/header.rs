//! Title, status line and navigation bar

use crate::components::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render a title section
pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title_widget = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title_widget, area);
}

/// Render the one-line status message
pub fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {}", message),
        Styles::text_secondary(),
    )]));
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, area: Rect, items: &[NavBarItem]) {
    let mut spans: Vec<Span> = Vec::with_capacity(items.len() * 3);
    for item in items {
        spans.push(Span::styled(format!(" {}", item.key_display), Styles::nav_key()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
        spans.push(Span::styled(" │", Styles::nav_hint()));
    }
    spans.pop();

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
