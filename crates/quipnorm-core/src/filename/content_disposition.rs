//! `filename="..."` extraction from a Content-Disposition header.

/// Returns the quoted `filename` parameter of a raw Content-Disposition value.
///
/// Only the quoted form is accepted; `filename=token` and `filename*=` are
/// treated as absent. Backslash escapes inside the quotes are decoded, and a
/// `;` inside the quotes is part of the name.
pub fn parse_quoted_filename(header_value: &str) -> Option<String> {
    const KEY: &str = "filename";
    let lower = header_value.to_ascii_lowercase();
    let mut from = 0;

    while let Some(found) = lower[from..].find(KEY) {
        let at = from + found;
        from = at + KEY.len();

        let preceded_ok = lower[..at]
            .chars()
            .next_back()
            .map_or(true, |c| c == ';' || c.is_ascii_whitespace());
        if !preceded_ok {
            continue;
        }
        let rest = header_value[from..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let Some(quoted) = rest.trim_start().strip_prefix('"') else {
            continue;
        };
        if let Some(value) = read_quoted(quoted) {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Reads up to the closing unescaped quote, decoding `\"` and `\\`.
/// Returns `None` if the quote is never closed.
fn read_quoted(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Some(out),
            '\\' => match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return None,
            },
            _ => out.push(c),
        }
    }
    None
}
