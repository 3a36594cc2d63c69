// text + date formatting helpers

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;
use ratatui::layout::Rect;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Trimmed, NFC-composed copy of user-typed text.
pub fn clean_text(s: &str) -> String {
    s.trim().nfc().collect()
}

pub fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Drop the last user-perceived character (Thai vowel marks go with their base).
pub fn pop_grapheme(s: &mut String) -> bool {
    match s.grapheme_indices(true).next_back() {
        Some((idx, _)) => {
            s.truncate(idx);
            true
        }
        None => false,
    }
}

/// A date-only strftime format: parses cleanly and formats a `NaiveDate`
/// without error (so `%H`, `%M` and friends are out).
pub fn is_valid_date_format(fmt: &str) -> bool {
    if fmt.is_empty() || StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let mut out = String::new();
    write!(out, "{}", NaiveDate::default().format(fmt)).is_ok()
}

/// Falls back to ISO dates when `fmt` cannot format a date.
pub fn format_date(date: NaiveDate, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(fmt)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format("%Y-%m-%d"));
    }
    out
}

/// Rect of `width_percent` x `height` rows centered in `area`.
pub fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
