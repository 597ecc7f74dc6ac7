use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{
    focus_border, format_name, Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_PANEL,
    TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::SearchState;
use crate::wishlist::{WishlistFilter, WishlistStats};

/// Rows taken by the header, borders included.
pub const HEADER_HEIGHT: u16 = 5;

/// Title bar with stats, filter tabs and the search line.
pub struct WishlistHeader;

pub struct WishlistHeaderProps<'a> {
    pub stats: WishlistStats,
    pub filter: WishlistFilter,
    pub search: &'a SearchState,
}

impl Component<Action> for WishlistHeader {
    type Props<'a> = WishlistHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let text = Text::from(vec![
            stats_line(props.stats),
            filter_line(props.stats, props.filter),
            search_line(props.search),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKÉMON WISHLIST")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.search.active));
        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}

fn stats_line(stats: WishlistStats) -> Line<'static> {
    Line::from(vec![
        Span::raw("Total: "),
        Span::styled(stats.total.to_string(), Style::default().fg(ACCENT_TEAL)),
        Span::raw("  Captured: "),
        Span::styled(stats.captured.to_string(), Style::default().fg(ACCENT_GOLD)),
        Span::raw("  Pending: "),
        Span::styled(stats.pending.to_string(), Style::default().fg(ACCENT_TEAL)),
    ])
}

fn filter_line(stats: WishlistStats, active: WishlistFilter) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, filter) in WishlistFilter::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!("{} ({})", filter.label(), stats.count(*filter));
        if *filter == active {
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(TEXT_DIM)));
        }
    }
    Line::from(spans)
}

fn search_line(search: &SearchState) -> Line<'static> {
    if search.active {
        return Line::from(vec![
            Span::raw("Search: "),
            Span::styled(
                format!("/{}_", search.query),
                Style::default().fg(ACCENT_TEAL),
            ),
        ]);
    }
    if search.loading {
        return Line::from(Span::styled(
            "Searching...",
            Style::default().fg(TEXT_DIM),
        ));
    }
    if let Some(entry) = search.result.as_ref() {
        return Line::from(vec![
            Span::styled(
                format!("#{:03} {}", entry.id, format_name(&entry.name)),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  {}  {:.1} m  {:.1} kg  ",
                entry.type_label(),
                entry.height_m(),
                entry.weight_kg()
            )),
            Span::styled("+ add", Style::default().fg(ACCENT_GOLD)),
            Span::styled(format!("  {}", entry.image), Style::default().fg(TEXT_DIM)),
        ]);
    }
    if let Some(error) = search.error.as_ref() {
        return Line::from(Span::styled(
            error.clone(),
            Style::default().fg(ACCENT_RED),
        ));
    }
    Line::from(Span::styled(
        "Press / to search a Pokémon by name or number",
        Style::default().fg(TEXT_DIM),
    ))
}
