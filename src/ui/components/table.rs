//! Table component renderer.
//!
//! Renders the visible listings as a table with TITLE, ORGANIZATION, FOR,
//! DATES and status columns. Each row starts with a bar in its accent color;
//! the selected row gets the selection background and the search match in
//! the title is highlighted on the others.

use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ApplyBadge, ListingRow};

const ACCENT_WIDTH: usize = 2;
const ORG_WIDTH: usize = 22;
const AUDIENCE_WIDTH: usize = 24;
const DATES_WIDTH: usize = 24;
const BADGE_WIDTH: usize = 12;

/// Title column width for a terminal of `cols` columns.
fn title_width(cols: usize) -> usize {
    let fixed = ACCENT_WIDTH + ORG_WIDTH + AUDIENCE_WIDTH + DATES_WIDTH + BADGE_WIDTH;
    cols.saturating_sub(fixed).clamp(12, 38)
}

/// Renders the table column headers at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let line = format!(
        "{}{}{}{}{}{}",
        " ".repeat(ACCENT_WIDTH),
        fit("TITLE", title_width(cols)),
        fit("ORGANIZATION", ORG_WIDTH),
        fit("FOR", AUDIENCE_WIDTH),
        fit("DATES", DATES_WIDTH),
        fit("STATUS", BADGE_WIDTH),
    );

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", fit(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`. Returns the next row.
pub fn render_table_rows(row: usize, rows: &[ListingRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for listing in rows {
        current_row = render_table_row(current_row, listing, theme, cols);
    }
    current_row
}

/// Renders a single listing row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlight (unless selected)
/// 3. Normal text color
///
/// The row is padded to the full terminal width so the selection background
/// covers it.
fn render_table_row(row: usize, listing: &ListingRow, theme: &Theme, cols: usize) -> usize {
    let title_w = title_width(cols);
    let base_style = || {
        if listing.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(&listing.accent));
    print!("▍ ");
    print!("{}", base_style());

    let title = fit(&listing.title, title_w);
    helpers::render_highlighted_text(&title, listing.highlight, theme, listing.is_selected);
    print!("{}", base_style());

    let middle = format!(
        "{}{}{}",
        fit(&listing.organization, ORG_WIDTH),
        fit(&listing.audience, AUDIENCE_WIDTH),
        fit(&listing.dates, DATES_WIDTH),
    );
    print!("{middle}");

    let badge_color = match listing.badge {
        ApplyBadge::Applied => Some(&theme.colors.applied_fg),
        ApplyBadge::Available => Some(&theme.colors.apply_fg),
        ApplyBadge::Applying => Some(&theme.colors.text_dim),
        ApplyBadge::Hidden => None,
    };
    if let Some(color) = badge_color.filter(|_| !listing.is_selected) {
        print!("{}", Theme::fg(color));
    }
    print!("{}", fit(listing.badge.label(), BADGE_WIDTH));
    print!("{}", base_style());

    let line_len = ACCENT_WIDTH + title_w + ORG_WIDTH + AUDIENCE_WIDTH + DATES_WIDTH + BADGE_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
