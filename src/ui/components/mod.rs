//! Composable UI component renderers.
//!
//! Each component renders one part of the board at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with session status
//! - [`filters`]: Filter bar with the five controls
//! - [`table`]: Listing table (TITLE, ORGANIZATION, FOR, DATES, STATUS)
//! - [`detail`]: Detail panel for the selected listing and the notice line
//! - [`empty`]: Loading and no-match messages
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Filter Bar - 3 lines]
//! [Summary]
//! [Table Headers]
//! [Table Rows | Empty State]
//! [Border]
//! [Detail - 2 lines]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod filters;
mod footer;
mod header;
mod table;

pub use empty::render_empty_state;

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use detail::{render_detail, render_notice};
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the count line. Returns the next row.
fn render_summary(row: usize, summary: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&format!("  {summary}"), cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full board layout.
///
/// Reserves 15 lines for chrome; the table gets the rest.
pub fn render_board(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(current_row, &vm.filter_bar, theme, cols);
    current_row = render_summary(current_row, &vm.summary, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme, cols);
        render_table_rows(current_row, &vm.rows, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let lower_border = footer_row.saturating_sub(1);
    let notice_row = lower_border.saturating_sub(1);
    let detail_row = notice_row.saturating_sub(2);
    let upper_border = detail_row.saturating_sub(1);

    render_border(upper_border, &theme.colors.border, cols);
    render_detail(detail_row, vm.detail.as_ref(), theme, cols);
    render_notice(notice_row, vm.notice.as_ref(), theme, cols);
    render_border(lower_border, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
