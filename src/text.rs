//! Backslash-escape decoding for strings lifted out of scraped markup.
//!
//! Script payloads embedded in listing pages arrive JSON-escaped (often
//! double-escaped inside a `JSON.parse("...")` call), so providers run them
//! through [`unescape`] before handing them to a JSON parser.

use thiserror::Error;

/// Malformed escape sequence encountered by [`unescape`].
///
/// This is the one genuinely error-shaped outcome in the extraction layer.
/// Provider code catches it at the call site and treats it as a miss for
/// the affected field or payload rather than letting it abort the post.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    #[error("truncated unicode escape: expected four characters after \\u")]
    TruncatedUnicode,
    #[error("bad character in unicode escape: {0:?}")]
    BadUnicodeDigit(char),
    #[error("unicode escape is not valid hex: {0:?}")]
    NonHexUnicode(String),
    #[error("unicode escape names an unrepresentable code point: {0:#06x}")]
    InvalidCodePoint(u32),
    #[error("illegal escape sequence: \\{0}")]
    IllegalEscape(char),
}

/// Decode backslash escape sequences in `input`.
///
/// Single left-to-right scan; each `\` consumes exactly one escape token,
/// with no lookahead past it and no backtracking. Recognized escapes:
/// `\\` `\/` `\"` `\'` `\n` `\r` `\t` `\b` and `\uXXXX` (exactly four
/// alphanumeric characters, lower-cased and read as hex).
///
/// Two deliberate quirks, kept because scraped-payload consumers depend on
/// them:
/// - `\f` yields the two literal characters `\` and `f`, not a form feed.
/// - a lone trailing backslash is copied through verbatim.
///
/// ```
/// use magpie::text::unescape;
///
/// assert_eq!(unescape("say \\\"hi\\\"\\n").unwrap(), "say \"hi\"\n");
/// assert_eq!(unescape("\\u0041").unwrap(), "A");
/// ```
pub fn unescape(input: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            // Trailing backslash with nothing to escape: copied verbatim.
            None => out.push('\\'),
            Some(escape) => match escape {
                '\\' | '/' | '"' | '\'' => out.push(escape),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'b' => out.push('\u{0008}'),
                // Not a form feed. See module docs.
                'f' => out.push_str("\\f"),
                'u' => out.push(unescape_unicode(&mut chars)?),
                other => return Err(UnescapeError::IllegalEscape(other)),
            },
        }
    }

    Ok(out)
}

/// Consume exactly four characters forming a `\uXXXX` escape.
fn unescape_unicode(chars: &mut std::str::Chars<'_>) -> Result<char, UnescapeError> {
    let mut hex = String::with_capacity(4);
    for _ in 0..4 {
        let digit = chars.next().ok_or(UnescapeError::TruncatedUnicode)?;
        if !digit.is_alphanumeric() {
            return Err(UnescapeError::BadUnicodeDigit(digit));
        }
        hex.extend(digit.to_lowercase());
    }

    let code = u32::from_str_radix(&hex, 16).map_err(|_| UnescapeError::NonHexUnicode(hex))?;
    char::from_u32(code).ok_or(UnescapeError::InvalidCodePoint(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(unescape("nothing to see here").unwrap(), "nothing to see here");
    }

    #[test]
    fn decodes_single_character_escapes() {
        assert_eq!(unescape(r"\\").unwrap(), "\\");
        assert_eq!(unescape(r"\/").unwrap(), "/");
        assert_eq!(unescape(r#"\""#).unwrap(), "\"");
        assert_eq!(unescape(r"\'").unwrap(), "'");
        assert_eq!(unescape(r"\n").unwrap(), "\n");
        assert_eq!(unescape(r"\r").unwrap(), "\r");
        assert_eq!(unescape(r"\t").unwrap(), "\t");
        assert_eq!(unescape(r"\b").unwrap(), "\u{0008}");
    }

    #[test]
    fn decodes_mixed_sequence() {
        assert_eq!(unescape("\\n\\t\\\"a\\u0041").unwrap(), "\n\t\"aA");
    }

    #[test]
    fn decodes_unicode_escapes() {
        assert_eq!(unescape("\\u0416").unwrap(), "Ж");
        assert_eq!(unescape("\\u00e9").unwrap(), "é");
        assert_eq!(unescape("\\u00E9").unwrap(), "é");
    }

    #[test]
    fn form_feed_escape_stays_literal() {
        // Two characters: backslash + f. Consumers rely on this.
        assert_eq!(unescape(r"\f").unwrap(), "\\f");
        assert_eq!(unescape(r"\f").unwrap().chars().count(), 2);
    }

    #[test]
    fn trailing_backslash_is_copied_verbatim() {
        assert_eq!(unescape("abc\\").unwrap(), "abc\\");
    }

    #[test]
    fn rejects_non_hex_alphanumeric_unicode() {
        assert!(matches!(
            unescape(r"\uZZ12"),
            Err(UnescapeError::NonHexUnicode(_))
        ));
    }

    #[test]
    fn rejects_non_alphanumeric_unicode_digit() {
        assert!(matches!(
            unescape(r"\u00!1"),
            Err(UnescapeError::BadUnicodeDigit('!'))
        ));
    }

    #[test]
    fn rejects_truncated_unicode() {
        assert!(matches!(
            unescape(r"\u00"),
            Err(UnescapeError::TruncatedUnicode)
        ));
        assert!(matches!(unescape(r"\u"), Err(UnescapeError::TruncatedUnicode)));
    }

    #[test]
    fn rejects_surrogate_code_points() {
        assert!(matches!(
            unescape(r"\ud800"),
            Err(UnescapeError::InvalidCodePoint(0xd800))
        ));
    }

    #[test]
    fn rejects_unknown_escapes() {
        assert!(matches!(
            unescape(r"\q"),
            Err(UnescapeError::IllegalEscape('q'))
        ));
    }

    #[test]
    fn never_reinterprets_decoded_output() {
        // One escape token per backslash; the decoded backslash is not
        // scanned again.
        assert_eq!(unescape(r"\\n").unwrap(), "\\n");
    }
}
