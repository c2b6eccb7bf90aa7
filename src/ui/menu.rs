//! Category panel rendering
//!
//! One bordered panel per category: a filter bar on top, the visible dish
//! cards below. The focused panel gets the active border and shows the
//! keyboard cursor.

use crate::app::{AppState, CatalogStatus};
use crate::controller::DishCard;
use crate::theme::Styles;
use crate::types::{Category, KindFilter, format_price};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render all five category panels stacked vertically
pub fn render_category_panels(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, Category::COUNT as u32); Category::COUNT])
        .split(area);

    for category in Category::ALL {
        render_category_panel(f, state, category, chunks[category.index()]);
    }
}

fn render_category_panel(f: &mut Frame, state: &AppState, category: Category, area: Rect) {
    let focused = state.focused == category;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", category.panel_title()))
        .border_style(if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let view = state.controller.view();
    let filter_bar = filter_bar_line(view.kinds(category), state.controller.filter(category));
    f.render_widget(Paragraph::new(filter_bar), chunks[0]);

    let cards = view.cards(category);
    if cards.is_empty() {
        let text = match state.catalog_status {
            CatalogStatus::Loading => "",
            _ => "No dishes available at the moment",
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, Styles::text_muted())),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| card_item(card, state))
        .collect();

    let mut list = List::new(items);
    if focused {
        list = list.highlight_style(Styles::highlighted()).highlight_symbol("> ");
    }

    let mut list_state = ListState::default().with_selected(focused.then(|| state.cursor()));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

/// Filter buttons: `[0 all] [1 fish] [2 meat]`, the active one highlighted
fn filter_bar_line(kinds: &[String], active: &KindFilter) -> Line<'static> {
    let mut spans = vec![filter_button(0, "all", active.is_all())];
    for (i, kind) in kinds.iter().enumerate() {
        let is_active = matches!(active, KindFilter::Kind(k) if k == kind);
        spans.push(Span::raw(" "));
        spans.push(filter_button(i + 1, kind, is_active));
    }
    Line::from(spans)
}

fn filter_button(number: usize, label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Styles::filter_active()
    } else {
        Styles::filter_inactive()
    };
    Span::styled(format!("[{} {}]", number, label), style)
}

/// A dish card as a single list row
fn card_item(card: &DishCard, state: &AppState) -> ListItem<'static> {
    let dish = &card.dish;
    let name_style = if card.selected {
        Styles::chosen()
    } else {
        Styles::text()
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("[{:<8}] ", card.button_label()), name_style),
        Span::styled(dish.name.clone(), name_style),
        Span::styled(
            format!("  {} {}", format_price(dish.price), state.config.currency),
            Styles::price(),
        ),
        Span::styled(format!("  {}", dish.count), Styles::text_secondary()),
        Span::styled(
            format!("  {}", state.config.image_for(&dish.image)),
            Styles::text_muted(),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_filter_bar_lists_all_then_kinds() {
        let kinds = vec!["fish".to_string(), "meat".to_string()];
        let line = filter_bar_line(&kinds, &KindFilter::All);
        assert_eq!(text(&line), "[0 all] [1 fish] [2 meat]");
        assert_eq!(line.spans[0].style, Styles::filter_active());
    }

    #[test]
    fn test_filter_bar_highlights_active_kind() {
        let kinds = vec!["fish".to_string(), "meat".to_string()];
        let line = filter_bar_line(&kinds, &KindFilter::Kind("meat".to_string()));
        assert_eq!(line.spans[0].style, Styles::filter_inactive());
        assert_eq!(line.spans[4].style, Styles::filter_active());
    }
}
