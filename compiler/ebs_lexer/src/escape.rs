//! String literal escape processing.

/// Decode the escapes in a string literal body (quotes already stripped).
///
/// On failure returns the offending escape text (without the backslash)
/// and its byte offset within `body`.
pub(crate) fn unescape(body: &str) -> Result<String, (String, usize)> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            return Err((String::new(), pos));
        };
        match esc {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'u' | 'x' => {
                let width = if esc == 'u' { 4 } else { 2 };
                let digits: String = chars.by_ref().take(width).map(|(_, d)| d).collect();
                let decoded = (digits.len() == width)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => out.push(ch),
                    None => return Err((format!("{esc}{digits}"), pos)),
                }
            }
            other => return Err((other.to_string(), pos)),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(unescape(r"a\tb\nc"), Ok("a\tb\nc".to_string()));
        assert_eq!(unescape(r#"say \"hi\" and \'bye\'"#), Ok("say \"hi\" and 'bye'".to_string()));
        assert_eq!(unescape(r"back\\slash"), Ok("back\\slash".to_string()));
    }

    #[test]
    fn test_unicode_and_hex_escapes() {
        assert_eq!(unescape(r"\u00e9t\u00e9"), Ok("été".to_string()));
        assert_eq!(unescape(r"\x41\x42"), Ok("AB".to_string()));
    }

    #[test]
    fn test_invalid_escapes() {
        assert_eq!(unescape(r"bad \q"), Err(("q".to_string(), 4)));
        assert_eq!(unescape(r"\u12"), Err(("u12".to_string(), 0)));
        assert_eq!(unescape(r"\xZZ"), Err(("xZZ".to_string(), 0)));
    }

    #[test]
    fn test_unpaired_surrogate_is_rejected() {
        assert_eq!(unescape(r"\uD800"), Err(("uD800".to_string(), 0)));
    }
}
