//! Local filename derivation for downloaded assets.
//!
//! The server names the asset through `Content-Disposition`; the name is
//! sanitized and, if already taken, suffixed with `_2`, `_3`, ... before the
//! extension.

mod content_disposition;
mod sanitize;

pub use content_disposition::parse_quoted_filename;
pub use sanitize::sanitize_filename_for_linux;

/// Splits `name` into stem and extension, the extension keeping its dot.
///
/// The extension starts at the last `.`; a name without one has an empty
/// extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    }
}

/// The `attempt`-th candidate for `name`: attempt 1 is `name` itself,
/// attempt `n >= 2` is `stem_n.ext`.
pub fn unique_candidate(name: &str, attempt: u32) -> String {
    if attempt <= 1 {
        return name.to_string();
    }
    let (stem, ext) = split_extension(name);
    format!("{}_{}{}", stem, attempt, ext)
}
