//! Order summary panel
//!
//! Shows the five fixed category rows, the total (only once something is
//! selected) and the current value of each locked form control.

use crate::app::AppState;
use crate::theme::Styles;
use crate::types::format_price;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the summary and the form side by side vertically
pub fn render_order_panel(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(area);

    render_summary(f, state, chunks[0]);
    render_form(f, state, chunks[1]);
}

fn render_summary(f: &mut Frame, state: &AppState, area: Rect) {
    let summary = &state.controller.view().summary;
    let currency = &state.config.currency;
    let mut lines: Vec<Line> = Vec::new();

    if summary.total_visible() {
        for row in &summary.rows {
            lines.push(Line::from(Span::styled(row.category.label(), Styles::title())));
            lines.push(match row.choice {
                Some((ref name, price)) => Line::from(vec![
                    Span::styled(format!("  {}", name), Styles::text()),
                    Span::styled(
                        format!(" {} {}", format_price(price), currency),
                        Styles::price(),
                    ),
                ]),
                None => Line::from(Span::styled("  Not selected", Styles::text_muted())),
            });
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Total: ", Styles::title()),
            Span::styled(
                format!("{} {}", format_price(summary.total), currency),
                Styles::price(),
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled("Nothing selected", Styles::text_muted())));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Your order "))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_form(f: &mut Frame, state: &AppState, area: Rect) {
    let lines: Vec<Line> = state
        .controller
        .form()
        .selects()
        .iter()
        .map(|select| {
            let option = select.current();
            let value_style = if option.value.is_empty() {
                Styles::text_muted()
            } else {
                Styles::text()
            };
            Line::from(vec![
                Span::styled(format!("{:<10}", select.name()), Styles::text_secondary()),
                Span::styled(option.label.clone(), value_style),
            ])
        })
        .collect();

    let title = if state.controller.form().is_locked() {
        " Order form (locked) "
    } else {
        " Order form "
    };
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}
