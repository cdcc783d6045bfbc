//! Directory scanning.
//!
//! Two views of the media root are needed per request:
//!
//! - [`scan_dir`] lists one directory: its subdirectories and its media
//!   files, each in the order the filesystem returns them. Used for the root
//!   page, folder pages, and cover lookup.
//! - [`flatten_media`] walks the whole tree depth-first and returns every
//!   media file. This is the lightbox's "all media" list on the root page.
//!
//! ## Filtering
//!
//! - Files whose extension is not in [`MEDIA_EXTENSIONS`](crate::types::MEDIA_EXTENSIONS)
//!   are dropped silently (case-insensitive match, so `A.JPG` is kept).
//! - Hidden entries (leading `.`) are skipped, directories included. macOS
//!   drops AppleDouble `._name.jpg` files beside real media on shared drives,
//!   and they carry media extensions without being media.
//!
//! ## Errors
//!
//! [`scan_dir`] returns the I/O error and lets the caller decide whether it is
//! fatal. [`flatten_media`] never fails: unreadable subtrees and symlink loops
//! are logged and skipped.

use crate::types::media_extension;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A media file found on disk, before its caption is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub path: PathBuf,
    /// Path under the media root, `/`-separated.
    pub relative_path: String,
    pub file_name: String,
    /// Lowercased, with leading dot.
    pub extension: String,
}

/// A subdirectory found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Subdir {
    pub path: PathBuf,
    pub name: String,
}

/// Immediate contents of one directory, in enumeration order.
#[derive(Debug, Default)]
pub struct DirListing {
    pub subdirs: Vec<Subdir>,
    pub files: Vec<MediaFile>,
}

/// List `dir`'s subdirectories and media files. `root` is the media root,
/// used to compute relative paths.
pub fn scan_dir(dir: &Path, root: &Path) -> Result<DirListing, ScanError> {
    let io_err = |source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut listing = DirListing::default();

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        // Follows symlinks, so a linked folder shows up as a folder.
        if path.is_dir() {
            listing.subdirs.push(Subdir { path, name });
        } else if path.is_file()
            && let Some(extension) = media_extension(&name)
        {
            listing.files.push(MediaFile {
                relative_path: relative_path(&path, root),
                path,
                file_name: name,
                extension,
            });
        }
    }

    Ok(listing)
}

/// Every media file under `root`, depth-first in enumeration order.
///
/// A directory's contents are listed at the point the directory itself is
/// reached, so `a.jpg, sub/, z.jpg` yields `a.jpg, sub/…, z.jpg` when the
/// filesystem returns them in that order.
pub fn flatten_media(root: &Path) -> Vec<MediaFile> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let at = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                tracing::warn!(path = %at, error = %e, "skipping unreadable subtree");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if let Some(extension) = media_extension(&file_name) {
            files.push(MediaFile {
                relative_path: relative_path(entry.path(), root),
                path: entry.into_path(),
                file_name,
                extension,
            });
        }
    }
    files
}

/// `/`-joined path of `path` under `root`, independent of the platform separator.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
