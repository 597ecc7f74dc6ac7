//! Pokemon wishlist TUI
//!
//! The library exposes the wishlist core, the catalog paginator and the
//! tui-dispatch pieces (actions, reducer, components) so they can be tested
//! without a terminal.

pub mod action;
pub mod api;
pub mod catalog;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod pokemon;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod ui;
pub mod wishlist;

pub use error::Error;
