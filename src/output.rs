//! CLI output formatting for the `check` command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each tile leads with
//! its positional index and caption, the way a visitor sees it on the root
//! page. Filesystem paths follow as indented context lines so the inventory
//! can still be traced back to specific files.
//!
//! # Output Format
//!
//! ```text
//! Folders
//! 001 alps
//!     Source: alps/
//!     Cover: alps/cover.png
//! 002 empty
//!     Source: empty/
//!     Cover: none (placeholder icon)
//!
//! Files
//! 001 Video → #2
//!     Source: clip.mp4
//!
//! Media
//!     4 files reachable from the root page
//! ```
//!
//! `format_check_output` is pure (returns `Vec<String>`) for testability;
//! `print_check_output` writes it to stdout.

use crate::types::{GalleryItem, GalleryPage};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for a tile: positional index and caption.
fn entity_header(index: usize, caption: &str) -> String {
    format!("{} {}", format_index(index), caption)
}

/// File tile header, pointing at its slot in the lightbox list.
///
/// ```text
/// 001 Sunset → #4
/// ```
fn file_line(index: usize, caption: &str, nav_index: usize) -> String {
    format!("{} \u{2192} #{}", entity_header(index, caption), nav_index)
}

fn pluralize(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the inventory of an assembled root page.
pub fn format_check_output(page: &GalleryPage) -> Vec<String> {
    let mut lines = Vec::new();

    let folders: Vec<_> = page
        .items
        .iter()
        .filter_map(|item| match item {
            GalleryItem::Folder(f) => Some(f),
            GalleryItem::File(_) => None,
        })
        .collect();
    let files: Vec<_> = page
        .items
        .iter()
        .filter_map(|item| match item {
            GalleryItem::File(f) => Some(f),
            GalleryItem::Folder(_) => None,
        })
        .collect();

    if !folders.is_empty() {
        lines.push("Folders".to_string());
        for (i, folder) in folders.iter().enumerate() {
            lines.push(entity_header(i + 1, &folder.caption));
            lines.push(format!("{}Source: {}/", indent(1), folder.name));
            let cover = match &folder.thumbnail_url {
                Some(url) => url.trim_start_matches('/').to_string(),
                None => "none (placeholder icon)".to_string(),
            };
            lines.push(format!("{}Cover: {}", indent(1), cover));
        }
    }

    if !files.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Files".to_string());
        for (i, file) in files.iter().enumerate() {
            lines.push(file_line(i + 1, &file.entry.caption, file.index));
            lines.push(format!("{}Source: {}", indent(1), file.entry.relative_path));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push("Media".to_string());
    lines.push(format!(
        "{}{} reachable from the root page",
        indent(1),
        pluralize(page.media.len(), "file")
    ));

    lines
}

/// Print the inventory to stdout.
pub fn print_check_output(page: &GalleryPage) {
    for line in format_check_output(page) {
        println!("{}", line);
    }
}
