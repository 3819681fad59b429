//! Text helpers for diagnostic output.

use std::borrow::Cow;

/// Escape tab, carriage return and line feed so a lexeme prints on one line.
///
/// Returns the input unchanged (borrowed) when there is nothing to escape.
///
/// # Example
/// ```
/// use astpath::base::escape_control;
///
/// assert_eq!(escape_control("a\tb"), "a\\tb");
/// assert_eq!(escape_control("plain"), "plain");
/// ```
pub fn escape_control(text: &str) -> Cow<'_, str> {
    if !text.contains(['\t', '\r', '\n']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
