//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// TO DO section accent.
pub const TODO_GREEN: Color = Color::Rgb(21, 128, 61);
/// DONE section accent and completed rows.
pub const DONE_PURPLE: Color = Color::Rgb(124, 58, 237);
/// Background of completed rows in the focus view.
pub const DONE_LAVENDER: Color = Color::Rgb(237, 233, 254);
/// Memo panel background.
pub const MEMO_AMBER: Color = Color::Rgb(255, 249, 230);
/// Memo panel heading.
pub const MEMO_BROWN: Color = Color::Rgb(180, 83, 9);
/// Blocking notifications.
pub const ALERT_RED: Color = Color::Rgb(114, 0, 0);
