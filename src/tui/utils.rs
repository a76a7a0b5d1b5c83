//! Layout helpers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::input::InputField;

/// A rectangle of `percent_x` by `percent_y` centered inside `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Spans for an input value with a reversed-video cursor when `active`.
pub fn input_spans(field: &InputField, active: bool) -> Vec<Span<'_>> {
    if !active {
        return vec![Span::raw(field.value.as_str())];
    }
    let (before, at, after) = field.split_at_cursor();
    let cursor = Style::default().add_modifier(Modifier::REVERSED);
    vec![
        Span::raw(before),
        Span::styled(at.map_or_else(|| " ".to_string(), |c| c.to_string()), cursor),
        Span::raw(after),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, parent);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
        assert_eq!(inner.y, 10);
    }

    #[test]
    fn input_spans_mark_cursor_only_when_active() {
        let field = InputField::with_value("ab");
        assert_eq!(input_spans(&field, false).len(), 1);
        let spans = input_spans(&field, true);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, " ");
    }
}
