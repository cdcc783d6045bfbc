//! Shared types passed from the gallery assembler to the renderer.
//!
//! Everything here is built fresh for each request and never mutated after
//! construction. [`MediaEntry`] is also serialized into the page as the
//! lightbox's navigation data, so its serde shape is part of the contract
//! with `static/gallery.js`.

use serde::Serialize;
use std::cmp::Ordering;

/// Supported media extensions, lowercased, without the leading dot.
pub const MEDIA_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "mp4", "mov", "webm", "webp"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];

/// Whether a media file is shown as an `<img>` or a `<video>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a normalized extension (`".mp4"`). Returns `None` for
    /// anything outside [`MEDIA_EXTENSIONS`].
    pub fn from_extension(extension: &str) -> Option<Self> {
        let bare = extension.strip_prefix('.').unwrap_or(extension);
        if VIDEO_EXTENSIONS.contains(&bare) {
            Some(MediaKind::Video)
        } else if MEDIA_EXTENSIONS.contains(&bare) {
            Some(MediaKind::Image)
        } else {
            None
        }
    }
}

/// Lowercased extension with a leading dot, or `None` when the file name has
/// no extension or it is not a supported media type.
///
/// `"A.JPG"` → `Some(".jpg")`, `"notes.txt"` → `None`.
pub fn media_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    MEDIA_EXTENSIONS
        .contains(&ext.as_str())
        .then(|| format!(".{ext}"))
}

/// Percent-encode a `/`-separated path for use in a URL, keeping the slashes.
///
/// `"summer trip/#1.jpg"` → `"summer%20trip/%231.jpg"`
pub fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for b in path.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// One media file with its resolved caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaEntry {
    /// Path under the media root, `/`-separated.
    #[serde(rename = "path")]
    pub relative_path: String,
    pub caption: String,
    /// Lowercased, with leading dot (`".jpg"`).
    pub extension: String,
}

impl MediaEntry {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_extension(&self.extension).unwrap_or(MediaKind::Image)
    }

    /// Absolute URL path the browser fetches the file from.
    pub fn url(&self) -> String {
        format!("/{}", encode_path(&self.relative_path))
    }
}

/// A folder tile: links to the folder page, shows its cover.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderItem {
    pub name: String,
    pub caption: String,
    /// `None` when the folder holds no media; the renderer shows a placeholder.
    pub thumbnail_url: Option<String>,
    pub thumbnail_kind: MediaKind,
    pub link_path: String,
}

/// A file tile: opens the lightbox at `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileItem {
    pub entry: MediaEntry,
    pub thumbnail_url: String,
    /// Position of this file in the page's navigation list.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryItem {
    Folder(FolderItem),
    File(FileItem),
}

impl GalleryItem {
    /// Folder name or file caption, whichever this tile is sorted by.
    pub fn sort_key(&self) -> &str {
        match self {
            GalleryItem::Folder(f) => &f.name,
            GalleryItem::File(f) => &f.entry.caption,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            GalleryItem::Folder(_) => 0,
            GalleryItem::File(_) => 1,
        }
    }
}

/// Sort tiles for display: folders before files, then by [`GalleryItem::sort_key`]
/// in [`collate`] order.
pub fn sort_items(items: &mut [GalleryItem]) {
    items.sort_by(|a, b| {
        a.rank()
            .cmp(&b.rank())
            .then_with(|| collate(a.sort_key(), b.sort_key()))
    });
}

/// Dictionary order: letters compare case-blind first, and case only breaks
/// a tie, lowercase first.
///
/// `alps < beach < Video`, `a < A`.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| b.cmp(a))
}

/// Which page is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Root,
    Folder { name: String },
}

/// Everything the renderer needs for one page.
#[derive(Debug, Clone)]
pub struct GalleryPage {
    pub view: View,
    pub items: Vec<GalleryItem>,
    /// The lightbox navigation list. `FileItem::index` points into this.
    pub media: Vec<MediaEntry>,
}
