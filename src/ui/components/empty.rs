//! Empty state component renderer.
//!
//! Shown in place of the table while the first listings read is pending, or
//! when no listing matches the filters.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line empty state message centered from `row`.
///
/// The message uses the `empty_state_fg` theme color, and the subtitle uses
/// `text_dim` with dim styling.
///
/// # Example
///
/// ```rust
/// use shlichus_board::ui::components::render_empty_state;
/// use shlichus_board::ui::viewmodel::EmptyState;
/// use shlichus_board::ui::Theme;
///
/// let empty = EmptyState {
///     message: "No listings match your filters.".to_string(),
///     subtitle: "Press c to clear filters".to_string(),
/// };
/// render_empty_state(10, &empty, &Theme::default(), 80);
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let msg_len = empty.message.chars().count();
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let sub_len = empty.subtitle.chars().count();
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    row + 2
}
