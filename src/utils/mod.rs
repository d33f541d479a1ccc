//! Utility functions and helpers.

pub mod columns;

/// Characters the leaderboard markup leaks into cell text.
const STRAY_CHARS: [char; 3] = ['|', '"', ','];

/// Drop stray `|`, `"` and `,` characters, leaving everything else alone.
pub fn strip_stray(raw: &str) -> String {
    raw.chars().filter(|c| !STRAY_CHARS.contains(c)).collect()
}

/// Trim whitespace and drop stray characters.
///
/// Cells are joined with `|` in the text output, so the separator must never
/// survive inside a value. Thousands separators in numbers go too.
pub fn clean_text(raw: &str) -> String {
    strip_stray(raw.trim()).trim().to_string()
}
