//! Filter bar component renderer.
//!
//! Renders the five filter controls inside a bordered frame, with the field
//! being edited drawn in the active color and followed by a cursor.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Horizontal margin for the filter box (spaces on left and right).
const FILTER_BOX_MARGIN: usize = 2;

/// Renders the filter box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since the box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────────────────────┐ [margin]
/// [margin] │ Search: camp▏ Gender: All Genders  Start Date: ... │ [margin]
/// [margin] └──────────────────────────────────────────────────┘ [margin]
/// ```
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.filter_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.filter_bar_border));
    print!("│");

    let mut used = 0;
    for field in &bar.fields {
        let cursor = if field.is_editing { "▏" } else { "" };
        let cell = format!(" {}: {}{cursor} ", field.label, field.value);
        let cell_len = cell.chars().count();
        if used + cell_len > inner_width {
            break;
        }
        if field.is_editing {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.filter_active_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{cell}");
        print!("{}", Theme::reset());
        used += cell_len;
    }

    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}", Theme::fg(&theme.colors.filter_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.filter_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
