use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{
    focus_border, format_name, Component, ACCENT_GOLD, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM,
    TEXT_MAIN,
};
use crate::action::Action;
use crate::pokemon::PokemonEntry;
use crate::wishlist::WishlistFilter;

/// The filtered wishlist with capture markers.
pub struct WishlistPanel {
    list: SelectList,
}

pub struct WishlistPanelProps<'a> {
    pub entries: &'a [&'a PokemonEntry],
    pub filter: WishlistFilter,
    pub selected: usize,
    pub is_focused: bool,
}

impl Default for WishlistPanel {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl WishlistPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WishlistPanel {
    type Props<'a> = WishlistPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Char(' ') => vec![Action::WishlistToggleSelected],
            KeyCode::Char('d') | KeyCode::Delete => vec![Action::WishlistRemoveSelected],
            _ => {
                let items = entry_items(props.entries);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::WishlistSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("MY LIST · {}", props.filter.label()))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.entries.is_empty() {
            let hint = match props.filter {
                WishlistFilter::All => "No Pokémon yet. Search with / or add from the catalog.",
                WishlistFilter::Captured => "Nothing captured yet.",
                WishlistFilter::Pending => "Nothing pending.",
            };
            let line = Line::from(Span::styled(hint, Style::default().fg(TEXT_DIM)));
            frame.render_widget(Paragraph::new(line), inner);
            return;
        }

        let items = entry_items(props.entries);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::WishlistSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}

fn entry_items(entries: &[&PokemonEntry]) -> Vec<Line<'static>> {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.is_captured { "[x]" } else { "[ ]" };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT_GOLD)),
                Span::raw(format!(" #{:03} {}", entry.id, format_name(&entry.name))),
                Span::styled(
                    format!("  {}", entry.type_label()),
                    Style::default().fg(TEXT_DIM),
                ),
            ])
        })
        .collect()
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}
