//! Shared rendering utilities and helpers.
//!
//! Cursor placement, search-match highlighting, and the small text
//! transformations the view model applies (truncation, fixed-width cells,
//! accent colour selection). All text operations work on character indices,
//! never byte indices.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` with the character range `highlight` marked as a match.
///
/// Selected rows skip match highlighting so the selection background stays
/// intact.
pub fn render_highlighted_text(
    text: &str,
    highlight: Option<(usize, usize)>,
    theme: &Theme,
    is_selected: bool,
) {
    let Some((start, end)) = highlight.filter(|_| !is_selected) else {
        print!("{text}");
        return;
    };

    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    let before: String = chars[..start].iter().collect();
    let matched: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    print!("{before}");
    print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
    print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
    print!("{matched}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{after}");
}

/// Shortens `text` to `max` characters followed by `...` when it is longer.
///
/// ```rust
/// use shlichus_board::ui::helpers::truncate_text;
///
/// assert_eq!(truncate_text("Kitchen helper", 7), "Kitchen...");
/// assert_eq!(truncate_text("Cook", 7), "Cook");
/// ```
#[must_use]
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max).collect();
    short.push_str("...");
    short
}

/// Left-aligns `text` in a cell of exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

/// Index into a palette of `palette_len` colours for a job title.
///
/// Uses the 32-bit string hash `h = c + (h << 5) - h` over UTF-16 code
/// units, so the same title always lands on the same colour.
///
/// ```rust
/// use shlichus_board::ui::helpers::accent_index;
///
/// assert_eq!(accent_index("", 7), 0);
/// assert_eq!(accent_index("Camp", 7), accent_index("Camp", 7));
/// ```
#[must_use]
pub fn accent_index(title: &str, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let hash = title.encode_utf16().fold(0_i64, |hash, unit| {
        let shifted = i64::from((hash as i32) << 5);
        i64::from(unit) + (shifted - hash)
    });
    let len = i64::try_from(palette_len).unwrap_or(i64::MAX);
    usize::try_from(hash.abs() % len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_text("ééééé", 3), "ééé...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }

    #[test]
    fn fit_pads_and_cuts() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abcd");
    }

    #[test]
    fn accent_matches_reference_hashes() {
        // "a": 97 -> 97 % 7 = 6
        assert_eq!(accent_index("a", 7), 6);
        // "ab": 98 + (97 << 5) - 97 = 3105 -> 3105 % 7 = 4
        assert_eq!(accent_index("ab", 7), 4);
    }

    #[test]
    fn accent_is_stable_for_long_titles() {
        let title = "Summer camp counselor for the Upper West Side program ".repeat(20);
        let first = accent_index(&title, 7);
        assert!(first < 7);
        assert_eq!(first, accent_index(&title, 7));
    }

    #[test]
    fn empty_palette_is_index_zero() {
        assert_eq!(accent_index("anything", 0), 0);
    }
}
