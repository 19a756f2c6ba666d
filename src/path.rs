//! Normalization of user-supplied page identifiers.

/// Strip the decorations people paste along with a page identifier so it
/// can be spliced into a request URL: surrounding whitespace, leading and
/// trailing slashes, and a leading `@`.
///
/// ```
/// use magpie::path::clean_path;
///
/// assert_eq!(clean_path(" /@somepage/ "), "somepage");
/// ```
pub fn clean_path(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('/')
        .trim_end_matches('/')
        .trim_start_matches('@')
        .to_string()
}
