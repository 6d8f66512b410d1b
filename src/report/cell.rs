//! Fixed-width table cells and their coloring.

use colored::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::formatting::{paint, CoverageBucket};

/// Columns consumed by one level of tree indent.
pub const TAB_SIZE: usize = 1;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Terminal columns occupied by `text`.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Pad or truncate `text` to exactly `width` columns.
///
/// `indent` levels are rendered as leading spaces and come out of the same
/// width. Text that does not fit keeps its trailing characters behind a
/// `...` marker, so the deepest path segment stays visible.
pub fn fill(text: &str, width: usize, align: Align, indent: usize) -> String {
    let leading = (indent * TAB_SIZE).min(width);
    let leader = " ".repeat(leading);
    let remaining = width - leading;
    if remaining == 0 {
        return leader;
    }

    let text_width = display_width(text);
    if text_width <= remaining {
        let pad = " ".repeat(remaining - text_width);
        return match align {
            Align::Left => format!("{leader}{text}{pad}"),
            Align::Right => format!("{leader}{pad}{text}"),
        };
    }

    if remaining <= ELLIPSIS.len() {
        return format!("{leader}{}", &ELLIPSIS[..remaining]);
    }

    let budget = remaining - ELLIPSIS.len();
    let tail = trailing_within(text, budget);
    // A wide character that straddles the cut leaves one column to pad.
    let pad = " ".repeat(budget - display_width(tail));
    format!("{leader}{ELLIPSIS}{tail}{pad}")
}

/// Longest suffix of `text` that fits in `max_width` columns.
fn trailing_within(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display text of a percentage: shortest decimal form, always with a
/// fractional part (`100.0`, `95.5`, `66.67`).
pub fn format_percent(pct: f64) -> String {
    let text = pct.to_string();
    if text.contains('.') || !pct.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// Applies coverage colors to already padded cells.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn apply(&self, text: &str, color: Color) -> String {
        if self.enabled {
            paint(text, color)
        } else {
            text.to_string()
        }
    }

    /// Green, yellow or red depending on the coverage bucket of `pct`.
    pub fn by_coverage(&self, text: &str, pct: f64) -> String {
        self.apply(text, CoverageBucket::from_percent(pct).color())
    }

    /// Red unless the file is fully covered.
    #[allow(clippy::float_cmp)]
    pub fn uncovered(&self, text: &str, pct: f64) -> String {
        if pct == 100.0 {
            text.to_string()
        } else {
            self.apply(text, Color::Red)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_left_aligned() {
        assert_eq!(fill("test", 10, Align::Left, 0), "test      ");
    }

    #[test]
    fn test_fill_right_aligned() {
        assert_eq!(fill("test", 10, Align::Right, 0), "      test");
    }

    #[test]
    fn test_fill_with_indent() {
        assert_eq!(fill("test", 10, Align::Left, 2), "  test    ");
    }

    #[test]
    fn test_fill_truncates_long_text() {
        assert_eq!(fill("verylongtext", 8, Align::Left, 0), "...gtext");
    }

    #[test]
    fn test_fill_truncates_after_indent() {
        assert_eq!(fill("user_profile.rb", 10, Align::Left, 2), "  ...le.rb");
    }

    #[test]
    fn test_fill_percent_text() {
        assert_eq!(fill(&format_percent(95.5), 7, Align::Right, 0), "   95.5");
    }

    #[test]
    fn test_fill_degenerate_widths() {
        assert_eq!(fill("test", 2, Align::Left, 4), "  ");
        assert_eq!(fill("test", 0, Align::Left, 0), "");
        assert_eq!(fill("verylong", 3, Align::Left, 0), "...");
        assert_eq!(fill("verylong", 2, Align::Left, 0), "..");
        assert_eq!(fill("verylong", 3, Align::Left, 1), " ..");
    }

    #[test]
    fn test_fill_wide_characters() {
        assert_eq!(fill("日本", 6, Align::Left, 0), "日本  ");
        assert_eq!(fill("日本語のファイル", 8, Align::Left, 0), "...イル ");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(100.0), "100.0");
        assert_eq!(format_percent(0.0), "0.0");
        assert_eq!(format_percent(95.5), "95.5");
        assert_eq!(format_percent(round2(200.0 / 3.0)), "66.67");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(99.996), 100.0);
    }

    #[test]
    fn test_painter_by_coverage() {
        let painter = Painter::new(true);
        assert_eq!(painter.by_coverage("test", 85.0), "\x1b[32mtest\x1b[0m");
        assert_eq!(painter.by_coverage("test", 65.0), "\x1b[33mtest\x1b[0m");
        assert_eq!(painter.by_coverage("test", 45.0), "\x1b[31mtest\x1b[0m");
    }

    #[test]
    fn test_painter_uncovered() {
        let painter = Painter::new(true);
        assert_eq!(painter.uncovered("test", 100.0), "test");
        assert_eq!(painter.uncovered("test", 85.0), "\x1b[31mtest\x1b[0m");
    }

    #[test]
    fn test_painter_disabled() {
        let painter = Painter::new(false);
        assert_eq!(painter.by_coverage("test", 10.0), "test");
        assert_eq!(painter.uncovered("test", 10.0), "test");
    }

    proptest! {
        #[test]
        fn fill_output_has_requested_width(
            text in "[a-z/._]{0,40}",
            width in 0usize..60,
            indent in 0usize..8,
            right in any::<bool>(),
        ) {
            let align = if right { Align::Right } else { Align::Left };
            let cell = fill(&text, width, align, indent);
            prop_assert_eq!(display_width(&cell), width);
        }
    }
}
