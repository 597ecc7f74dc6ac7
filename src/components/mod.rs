pub mod catalog_panel;
pub mod wishlist_header;
pub mod wishlist_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_panel::{CatalogPanel, CatalogPanelProps};
pub use wishlist_header::{WishlistHeader, WishlistHeaderProps};
pub use wishlist_panel::{WishlistPanel, WishlistPanelProps};

use ratatui::style::{Color, Modifier, Style};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_RED: Color = Color::Rgb(220, 96, 96);

pub fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

/// "mr-mime" -> "Mr Mime"
pub fn format_name(name: &str) -> String {
    name.split(['-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
