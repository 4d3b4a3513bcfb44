//! Filenames that are safe on Linux and inside a markdown link target.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Sanitizes a server-suggested filename before it is joined to the asset dir.
///
/// - Replaces NUL, `/`, `\`, control characters and whitespace with `_`
/// - Replaces `(`, `)`, `[`, `]` with `_` so the name survives `![](...)`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots, spaces and underscores (no `..`, no hidden files)
/// - Limits length to 255 bytes
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let unsafe_char = matches!(c, '\0' | '/' | '\\' | '(' | ')' | '[' | ']')
            || c.is_control()
            || c.is_whitespace();
        if unsafe_char || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut take = NAME_MAX;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
