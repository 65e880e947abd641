//! Comma-joined field list encoding used by `data.fields`.

/// Separator between field names in the encoded text.
pub const FIELD_SEPARATOR: char = ',';

/// Split encoded field-list text into names.
///
/// Empty text decodes to an empty list rather than a single empty name.
pub fn split_fields(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(FIELD_SEPARATOR).map(str::to_owned).collect()
}

/// Join field names into encoded field-list text.
pub fn join_fields<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (idx, name) in names.into_iter().enumerate() {
        if idx > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(name.as_ref());
    }
    out
}
