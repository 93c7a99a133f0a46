//! Quote formatting
//!
//! Locale-independent rendering of quote values. Values are truncated
//! toward zero; the fraction is never shown on the panel.

use core::fmt::Write;

use heapless::String;

/// Capacity of every display string
///
/// Fits the longest `i64` with sign, separators and suffix.
pub const TEXT_LEN: usize = 32;

/// Bounded display string
pub type Text = String<TEXT_LEN>;

/// Thousands separator
pub const GROUP_SEPARATOR: char = '\'';

/// Currency suffix
pub const CURRENCY: char = '$';

/// Tag for the 24h high line
pub const HIGH_TAG: &str = "H:";

/// Tag for the 24h low line
pub const LOW_TAG: &str = "L:";

/// Truncate toward zero; NaN and infinities become 0
fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        value as i64
    } else {
        0
    }
}

/// Format the last price with grouped thousands
///
/// `1234567.9` becomes `1'234'567$`.
pub fn format_price(value: f64) -> Text {
    let n = truncate(value);

    // Least-significant digit first
    let mut digits = [0u8; 20];
    let mut len = 0;
    let mut rest = n.unsigned_abs();
    loop {
        digits[len] = b'0' + (rest % 10) as u8;
        len += 1;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    let mut out = Text::new();
    if n < 0 {
        let _ = out.push('-');
    }
    for i in (0..len).rev() {
        let _ = out.push(digits[i] as char);
        if i > 0 && i % 3 == 0 {
            let _ = out.push(GROUP_SEPARATOR);
        }
    }
    let _ = out.push(CURRENCY);
    out
}

/// Format a 24h extreme without grouping
///
/// `65000.4` becomes `65000 $`. The caller adds the `H:`/`L:` tag.
pub fn format_extreme(value: f64) -> Text {
    let mut out = Text::new();
    let _ = write!(out, "{} {}", truncate(value), CURRENCY);
    out
}

/// Format a 24h extreme with its tag, e.g. `H:65000 $`
pub fn tagged_extreme(tag: &str, value: f64) -> Text {
    let mut out = Text::new();
    let _ = out.push_str(tag);
    let _ = out.push_str(&format_extreme(value));
    out
}

/// Left-pad with spaces up to `width` characters
///
/// Returns the text unchanged when it is already at least `width` long.
pub fn pad_left(text: &str, width: usize) -> Text {
    let mut out = Text::new();
    let len = text.chars().count();
    for _ in len..width {
        let _ = out.push(' ');
    }
    let _ = out.push_str(text);
    out
}
