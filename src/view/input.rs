//! Input capture and validation

/// Take a submission out of the input field.
///
/// Returns the trimmed text and clears the field, or `None` (leaving the
/// field untouched) when there is nothing but whitespace.
pub fn capture(field: &mut String) -> Option<String> {
    let text = field.trim();
    if text.is_empty() {
        return None;
    }
    let text = text.to_string();
    field.clear();
    Some(text)
}
