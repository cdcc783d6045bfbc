//! Display names derived from file and folder names.
//!
//! Captions fall back to the file name when a photo carries no usable
//! metadata, and folder tiles are labelled with the folder name. Both use
//! the same rule: separators become spaces.
//!
//! - `beach_sunset.jpg` → "beach sunset"
//! - `2024--summer__trip` → "2024 summer trip"
//! - `_draft-` → "draft"

/// Replace each run of `-`/`_` with a single space and trim the result.
pub fn display_title(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c == '-' || c == '_' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out.trim().to_string()
}

/// File name without its final extension. Dotfiles keep their full name.
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Whether a file name marks a folder cover: the stem starts with `cover`,
/// ignoring case (`Cover.png`, `cover-2.jpg`, `COVERSHOT.webp`).
pub fn is_cover_name(file_name: &str) -> bool {
    file_stem(file_name)
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("cover"))
}
