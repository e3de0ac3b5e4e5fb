//! Detail panel and notice line renderers.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, NoticeInfo, NoticeTone};

/// Renders the two-line detail panel for the selected listing.
///
/// ```text
///  📍 Crown Heights · 7/1/2024 - 7/21/2024 · https://img...
///  Run the morning program for ...
/// ```
///
/// Blank lines are drawn when nothing is selected. Returns the next row.
pub fn render_detail(row: usize, detail: Option<&DetailInfo>, theme: &Theme, cols: usize) -> usize {
    let (meta, description) = detail.map_or_else(
        || (String::new(), String::new()),
        |d| {
            let mut parts: Vec<&str> = Vec::new();
            if !d.location.is_empty() {
                parts.push(&d.location);
            }
            if !d.dates.is_empty() {
                parts.push(&d.dates);
            }
            if let Some(url) = &d.image_url {
                parts.push(url);
            }
            let meta = if parts.is_empty() {
                String::new()
            } else {
                format!(" 📍 {}", parts.join(" · "))
            };
            (meta, format!(" {}", d.description))
        },
    );

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&meta, cols));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&description, cols));
    print!("{}", Theme::reset());

    row + 2
}

/// Renders the notice line, blank when there is no notice. Returns the next row.
pub fn render_notice(row: usize, notice: Option<&NoticeInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match notice {
        Some(notice) => {
            let (color, mark) = match notice.tone {
                NoticeTone::Success => (&theme.colors.success_fg, "✓"),
                NoticeTone::Failure => (&theme.colors.failure_fg, "✗"),
            };
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(color));
            print!("{}", fit(&format!(" {mark} {}  (Esc to dismiss)", notice.message), cols));
        }
        None => print!("{}", " ".repeat(cols)),
    }
    print!("{}", Theme::reset());
    row + 1
}
