//! Folder cover selection.
//!
//! A folder tile shows one of the folder's own media files:
//!
//! 1. the first file (enumeration order) whose stem starts with `cover`,
//!    case-insensitively (`cover.png`, `Cover-01.jpg`);
//! 2. otherwise the first media file;
//! 3. otherwise nothing, and the renderer shows a placeholder icon.
//!
//! Only the folder's immediate files are considered. The tile caption is the
//! folder name with separators turned into spaces, unless the cover is a JPEG
//! with an EXIF `ImageDescription`.

use crate::metadata;
use crate::naming::{display_title, is_cover_name};
use crate::scan::{self, MediaFile};
use crate::types::{FolderItem, MediaKind, encode_path};
use std::path::Path;

/// Pick the cover among a folder's media files.
pub fn pick_cover(files: &[MediaFile]) -> Option<&MediaFile> {
    files
        .iter()
        .find(|f| is_cover_name(&f.file_name))
        .or_else(|| files.first())
}

/// Build the tile for the folder at `dir`. `root` is the media root.
///
/// A folder that cannot be read still gets a tile, just without a cover.
pub fn folder_item(dir: &Path, name: &str, root: &Path) -> FolderItem {
    let files = match scan::scan_dir(dir, root) {
        Ok(listing) => listing.files,
        Err(e) => {
            tracing::warn!(error = %e, "cover lookup failed, using placeholder");
            Vec::new()
        }
    };
    let cover = pick_cover(&files);

    let caption = cover
        .and_then(|c| metadata::image_description(&c.path, &c.extension))
        .unwrap_or_else(|| {
            let title = display_title(name);
            if title.is_empty() {
                name.to_string()
            } else {
                title
            }
        });

    FolderItem {
        name: name.to_string(),
        caption,
        thumbnail_url: cover.map(|c| format!("/{}", encode_path(&c.relative_path))),
        thumbnail_kind: cover
            .and_then(|c| MediaKind::from_extension(&c.extension))
            .unwrap_or(MediaKind::Image),
        link_path: format!("/{}", encode_path(name)),
    }
}
