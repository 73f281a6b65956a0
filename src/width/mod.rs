//! Display width helpers.
//!
//! Provides ANSI-aware width calculation for rendered fragments so the
//! empty-region rule sees through styling sequences.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// True when the text carries no visible content at all.
///
/// Styling sequences and whitespace do not count as content, so a fragment
/// consisting of colored blanks is still blank.
pub fn is_blank(text: &str) -> bool {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    clean_str.chars().all(char::is_whitespace)
}
