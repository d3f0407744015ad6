use ratatui::layout::Alignment;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::theme;

pub(crate) fn wrapped_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    Paragraph::new(text).wrap(Wrap { trim: false })
}

pub(crate) fn key_hint_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    wrapped_paragraph(text).alignment(Alignment::Center)
}

pub(crate) fn key_hint_height(total_width: u16, text: &str) -> u16 {
    let content_width = total_width.saturating_sub(2).max(1) as usize;
    let lines = wrapped_line_count(text, content_width);
    lines.saturating_add(2).max(3)
}

pub(crate) fn compact_hint<'a>(
    width: u16,
    full: &'a str,
    medium: &'a str,
    compact: &'a str,
) -> &'a str {
    if width >= 110 {
        full
    } else if width >= 78 {
        medium
    } else {
        compact
    }
}

pub(crate) fn focus_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::focus_prompt()))
}

pub(crate) fn secondary_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::secondary_text()))
}

pub(crate) fn error_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::error_prompt()))
}

pub(crate) fn label_value_line(
    label: impl Into<String>,
    value: impl Into<String>,
) -> Line<'static> {
    let label = label.into();
    let value = value.into();
    Line::from(vec![
        Span::styled(format!("{label}: "), theme::secondary_text()),
        Span::raw(value),
    ])
}

/// `[ Cancel ]  [ Continue ]` with the whole row dimmed while a request runs.
pub(crate) fn button_row(labels: &[&str], disabled: bool) -> Line<'static> {
    let style = if disabled {
        theme::disabled_text()
    } else {
        theme::focus_prompt()
    };
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (index, label) in labels.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("[ {label} ]"), style));
    }
    Line::from(spans)
}

fn wrapped_line_count(text: &str, width: usize) -> u16 {
    if text.is_empty() {
        return 1;
    }

    let mut total = 0u16;
    for line in text.split('\n') {
        total = total.saturating_add(wrapped_line_count_single(line, width));
    }

    total.max(1)
}

fn wrapped_line_count_single(line: &str, width: usize) -> u16 {
    if line.is_empty() {
        return 1;
    }

    let mut lines = 1u16;
    let mut used = 0usize;
    for ch in line.chars() {
        let mut remaining = if ch == '\t' { 4 } else { 1 };
        while remaining > 0 {
            let space_left = width.saturating_sub(used);
            if space_left == 0 {
                lines = lines.saturating_add(1);
                used = 0;
                continue;
            }
            if remaining > space_left {
                remaining -= space_left;
                lines = lines.saturating_add(1);
                used = 0;
            } else {
                used += remaining;
                remaining = 0;
            }
        }
    }

    lines.max(1)
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{
        button_row, compact_hint, error_line, focus_line, key_hint_height, label_value_line,
        wrapped_line_count_single,
    };

    #[test]
    fn compact_hint_selects_variant_by_width() {
        assert_eq!(compact_hint(120, "full", "medium", "compact"), "full");
        assert_eq!(compact_hint(90, "full", "medium", "compact"), "medium");
        assert_eq!(compact_hint(60, "full", "medium", "compact"), "compact");
    }

    #[test]
    fn key_hint_height_is_single_line_when_hint_fits() {
        let height = key_hint_height(80, "Enter: save    Esc: back");
        assert_eq!(height, 3);
    }

    #[test]
    fn key_hint_height_grows_when_hint_wraps() {
        let height = key_hint_height(20, "Enter: save    Ctrl+D: delete store    Esc: back");
        assert!(height > 3);
    }

    #[test]
    fn focus_line_uses_blue_bold_style() {
        let line = focus_line("Stores");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn error_line_is_red() {
        let line = error_line("Store name must be at least 4 characters");
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn label_value_line_formats_with_colon() {
        let line = label_value_line("Store id", "abc123");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content.as_ref(), "Store id: ");
        assert_eq!(line.spans[1].content.as_ref(), "abc123");
    }

    #[test]
    fn button_row_dims_every_button_when_disabled() {
        let enabled = button_row(&["Cancel", "Continue"], false);
        assert_eq!(enabled.spans.len(), 3);
        assert_eq!(enabled.spans[0].content.as_ref(), "[ Cancel ]");
        assert_eq!(enabled.spans[2].style.fg, Some(Color::Blue));

        let disabled = button_row(&["Cancel", "Continue"], true);
        assert_eq!(disabled.spans[0].style.fg, Some(Color::DarkGray));
        assert_eq!(disabled.spans[2].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn wrapped_line_count_preserves_repeated_spaces() {
        assert_eq!(wrapped_line_count_single("a    b", 3), 2);
        assert_eq!(wrapped_line_count_single("a b", 3), 1);
    }
}
