use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::{Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::components::wishlist_header::HEADER_HEIGHT;
use crate::components::{
    CatalogPanel, CatalogPanelProps, WishlistHeader, WishlistHeaderProps, WishlistPanel,
    WishlistPanelProps, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_BASE, BG_PANEL, TEXT_DIM,
    TEXT_MAIN,
};
use crate::state::{AppState, FocusArea, Severity};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WishComponentId {
    Header,
    Wishlist,
    Catalog,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishContext {
    Wishlist,
    Catalog,
    Search,
}

impl EventRoutingState<WishComponentId, WishContext> for AppState {
    fn focused(&self) -> Option<WishComponentId> {
        if self.search.active {
            return Some(WishComponentId::Search);
        }
        match self.focus {
            FocusArea::Wishlist => Some(WishComponentId::Wishlist),
            FocusArea::Catalog => Some(WishComponentId::Catalog),
        }
    }

    fn modal(&self) -> Option<WishComponentId> {
        if self.search.active {
            Some(WishComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WishComponentId) -> WishContext {
        match id {
            WishComponentId::Header | WishComponentId::Search => WishContext::Search,
            WishComponentId::Wishlist => WishContext::Wishlist,
            WishComponentId::Catalog => WishContext::Catalog,
        }
    }

    fn default_context(&self) -> WishContext {
        WishContext::Wishlist
    }
}

pub struct WishUi {
    header: WishlistHeader,
    wishlist: WishlistPanel,
    catalog: CatalogPanel,
    status_bar: StatusBar,
}

impl Default for WishUi {
    fn default() -> Self {
        Self::new()
    }
}

impl WishUi {
    pub fn new() -> Self {
        Self {
            header: WishlistHeader,
            wishlist: WishlistPanel::new(),
            catalog: CatalogPanel::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<WishComponentId>,
    ) {
        let areas = self.render_screen(frame, area, state);
        event_ctx.set_component_area(WishComponentId::Header, areas.header);
        if state.search.active {
            event_ctx.set_component_area(WishComponentId::Search, areas.header);
        } else {
            event_ctx.component_areas.remove(&WishComponentId::Search);
        }
        event_ctx.set_component_area(WishComponentId::Wishlist, areas.wishlist);
        event_ctx.set_component_area(WishComponentId::Catalog, areas.catalog);
    }

    /// Draws the whole screen without touching event routing.
    pub fn render_screen(&mut self, frame: &mut Frame, area: Rect, state: &AppState) -> ScreenAreas {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(layout[1]);

        self.header.render(
            frame,
            layout[0],
            WishlistHeaderProps {
                stats: state.wishlist.stats(),
                filter: state.filter,
                search: &state.search,
            },
        );

        let visible = state.visible_wishlist();
        self.wishlist.render(
            frame,
            body[0],
            WishlistPanelProps {
                entries: &visible,
                filter: state.filter,
                selected: state.wishlist_selected,
                is_focused: !state.search.active && state.focus == FocusArea::Wishlist,
            },
        );

        self.catalog.render(
            frame,
            body[1],
            CatalogPanelProps {
                ids: state.catalog.ids(),
                cards: &state.cards,
                selected: state.catalog_selected,
                can_page_back: state.can_page_back(),
                is_focused: !state.search.active && state.focus == FocusArea::Catalog,
            },
        );

        render_footer(frame, layout[2], state, &mut self.status_bar);

        ScreenAreas {
            header: layout[0],
            wishlist: body[0],
            catalog: body[1],
        }
    }

    pub fn handle_wishlist_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let visible = state.visible_wishlist();
        let props = WishlistPanelProps {
            entries: &visible,
            filter: state.filter,
            selected: state.wishlist_selected,
            is_focused: true,
        };
        let actions: Vec<_> = self.wishlist.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }

    pub fn handle_catalog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = CatalogPanelProps {
            ids: state.catalog.ids(),
            cards: &state.cards,
            selected: state.catalog_selected,
            can_page_back: state.can_page_back(),
            is_focused: true,
        };
        let actions: Vec<_> = self.catalog.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScreenAreas {
    pub header: Rect,
    pub wishlist: Rect,
    pub catalog: Rect,
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    // Modal: swallow everything else too.
    if actions.is_empty() {
        return HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        };
    }
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let (text, color) = match state.notification.as_ref() {
        Some(notification) => (
            notification.text.as_str(),
            match notification.severity {
                Severity::Success => ACCENT_TEAL,
                Severity::Warning => ACCENT_GOLD,
                Severity::Error => ACCENT_RED,
            },
        ),
        None if state.search.loading => ("Searching...", TEXT_DIM),
        None => ("", TEXT_DIM),
    };
    let status_span = Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD));
    let status_items = [StatusBarItem::span(status_span)];
    let (left_hints, center_hints) = status_hints(state);

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Search"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        return (left, Vec::new());
    }

    let left = match state.focus {
        FocusArea::Wishlist => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("space", "Captured"),
            StatusBarHint::new("d", "Remove"),
        ],
        FocusArea::Catalog => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("a", "Add"),
            StatusBarHint::new("n/p", "Page"),
            StatusBarHint::new("r", "Refresh"),
        ],
    };
    let mut center = vec![
        StatusBarHint::new("Tab", "Focus"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("f", "Filter"),
    ];
    if state.search.result.is_some() {
        center.push(StatusBarHint::new("+", "Add result"));
    }
    center.push(StatusBarHint::new("q", "Quit"));
    (left, center)
}
