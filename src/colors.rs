//! Color helpers for change logging.

use owo_colors::{AnsiColors, DynColors, OwoColorize, Style};

use crate::field::Field;

/// Palette for subscription tags, standard and bright variants interleaved so
/// neighbouring hashes land on visibly different colors.
const TAG_COLORS: [AnsiColors; 12] = [
    AnsiColors::Red,
    AnsiColors::BrightGreen,
    AnsiColors::Yellow,
    AnsiColors::BrightBlue,
    AnsiColors::Magenta,
    AnsiColors::BrightCyan,
    AnsiColors::BrightRed,
    AnsiColors::Green,
    AnsiColors::BrightYellow,
    AnsiColors::Blue,
    AnsiColors::BrightMagenta,
    AnsiColors::Cyan,
];

/// Deterministically maps a subscription tag to a palette color.
pub fn color_for_tag(tag: &str) -> AnsiColors {
    let hash = tag
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_mul(31).wrapping_add(c as u32));
    TAG_COLORS[(hash as usize) % TAG_COLORS.len()]
}

/// Formats a subscription tag as `[tag]` in its color.
pub fn colored_tag(tag: &str) -> String {
    let style = Style::new().color(DynColors::Ansi(color_for_tag(tag)));
    format!("[{}]", tag).style(style).to_string()
}

/// Each field always prints in the same color.
pub fn field_color(field: Field) -> AnsiColors {
    match field {
        Field::BackendUrl => AnsiColors::Cyan,
        Field::TimeSpanMinutes => AnsiColors::Yellow,
        Field::ShowOrigins => AnsiColors::Magenta,
    }
}

/// Field name in its fixed color, bold.
pub fn colored_field(field: Field) -> String {
    field.name().color(field_color(field)).bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_color_determinism() {
        let first = color_for_tag("x1_Yq");
        let second = color_for_tag("x1_Yq");
        assert!(std::mem::discriminant(&first) == std::mem::discriminant(&second));
    }

    #[test]
    fn test_colored_tag_format() {
        let result = colored_tag("abcde");
        assert!(result.contains("[abcde]"));
    }

    #[test]
    fn test_colored_field_keeps_name() {
        for field in Field::ALL {
            assert!(colored_field(field).contains(field.name()));
        }
    }
}
