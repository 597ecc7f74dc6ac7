use std::collections::HashMap;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{
    focus_border, format_name, Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_HIGHLIGHT,
    BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::catalog::PageDirection;
use crate::pokemon::PokemonEntry;

pub const LOADING_LABEL: &str = "Who is that Pokémon?";
pub const FAILED_LABEL: &str = "failed to load";

/// The current catalog window, one row per card.
pub struct CatalogPanel {
    list: SelectList,
}

pub struct CatalogPanelProps<'a> {
    pub ids: &'a [u32],
    pub cards: &'a HashMap<u32, DataResource<PokemonEntry>>,
    pub selected: usize,
    pub can_page_back: bool,
    pub is_focused: bool,
}

impl Default for CatalogPanel {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl CatalogPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CatalogPanel {
    type Props<'a> = CatalogPanelProps<'a>;

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
            KeyCode::Enter | KeyCode::Char('a') => vec![Action::CatalogAddSelected],
            KeyCode::Char('n') | KeyCode::Right => {
                vec![Action::CatalogPage(PageDirection::Forward)]
            }
            KeyCode::Char('p') | KeyCode::Left if props.can_page_back => {
                vec![Action::CatalogPage(PageDirection::Backward)]
            }
            KeyCode::Char('p') | KeyCode::Left => Vec::new(),
            KeyCode::Char('r') => vec![Action::CatalogPage(PageDirection::Refresh)],
            _ => {
                let items = card_items(props.ids, props.cards);
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
                    on_select: Action::CatalogSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = match (props.ids.first(), props.ids.last()) {
            (Some(first), Some(last)) => format!("CATALOG #{first:03}-#{last:03}"),
            _ => "CATALOG".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        if props.ids.is_empty() {
            let hint = Line::from(vec![
                Span::styled("Press ", Style::default().fg(TEXT_DIM)),
                Span::styled(
                    "r",
                    Style::default()
                        .fg(ACCENT_TEAL)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to discover more Pokémon", Style::default().fg(TEXT_DIM)),
            ]);
            frame.render_widget(Paragraph::new(hint), chunks[0]);
            return;
        }

        let items = card_items(props.ids, props.cards);
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
            on_select: Action::CatalogSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, chunks[0], list_props);

        frame.render_widget(Paragraph::new(pager_line(props.can_page_back)), chunks[1]);
    }
}

fn pager_line(can_page_back: bool) -> Line<'static> {
    let back = if can_page_back {
        Style::default().fg(ACCENT_TEAL)
    } else {
        Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
    };
    let back_label = if can_page_back { "< prev" } else { "< prev (start)" };
    Line::from(vec![
        Span::styled(back_label, back),
        Span::raw("   "),
        Span::styled("next >", Style::default().fg(ACCENT_TEAL)),
    ])
}

fn card_items(ids: &[u32], cards: &HashMap<u32, DataResource<PokemonEntry>>) -> Vec<Line<'static>> {
    ids.iter()
        .map(|id| {
            let number = Span::styled(format!("#{id:03} "), Style::default().fg(ACCENT_GOLD));
            match cards.get(id) {
                Some(DataResource::Loaded(entry)) => Line::from(vec![
                    number,
                    Span::raw(format_name(&entry.name)),
                    Span::styled(
                        format!("  {}", entry.type_label()),
                        Style::default().fg(TEXT_DIM),
                    ),
                ]),
                Some(DataResource::Failed(_)) => Line::from(vec![
                    number,
                    Span::styled(format!("! {FAILED_LABEL}"), Style::default().fg(ACCENT_RED)),
                ]),
                _ => Line::from(vec![
                    number,
                    Span::styled(LOADING_LABEL, Style::default().fg(TEXT_DIM)),
                ]),
            }
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
