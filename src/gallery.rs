//! Gallery assembly: turns a live directory read into a [`GalleryPage`].
//!
//! ## Root page
//!
//! Tiles are the root's subdirectories (with covers) and the root's own
//! media files. The lightbox list is different: it holds *every* media file
//! in the tree, depth-first, so clicking a root file lets the visitor page
//! through nested folders too. A root tile's `index` is its position in that
//! flattened list.
//!
//! ## Folder page
//!
//! Tiles are the folder's immediate media files. The lightbox list is those
//! same files in enumeration order and nothing else.
//!
//! ## Ordering
//!
//! Captions are resolved in parallel, so tiles are re-sorted afterwards:
//! folders first by name, then files by caption.
//!
//! ## Errors
//!
//! Failing to list the directory being shown is fatal for the page and
//! reported as [`GalleryError`]. Failures below it (cover lookup, nested
//! folders during flattening) only lose that subtree.

use crate::cover;
use crate::metadata;
use crate::scan::{self, MediaFile, ScanError};
use crate::types::{FileItem, GalleryItem, GalleryPage, MediaEntry, View, sort_items};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Caption every file, in parallel, preserving input order.
fn media_entries(files: &[MediaFile]) -> Vec<MediaEntry> {
    files
        .par_iter()
        .map(|f| MediaEntry {
            relative_path: f.relative_path.clone(),
            caption: metadata::resolve_caption(&f.path, &f.extension),
            extension: f.extension.clone(),
        })
        .collect()
}

fn file_item(entry: MediaEntry, index: usize) -> GalleryItem {
    GalleryItem::File(FileItem {
        thumbnail_url: entry.url(),
        entry,
        index,
    })
}

/// Assemble the top-level page for the media root.
pub fn assemble_root(root: &Path) -> Result<GalleryPage, GalleryError> {
    let listing = scan::scan_dir(root, root)?;

    let mut media = media_entries(&scan::flatten_media(root));
    let positions: HashMap<String, usize> = media
        .iter()
        .enumerate()
        .map(|(i, m)| (m.relative_path.clone(), i))
        .collect();

    let mut items: Vec<GalleryItem> = listing
        .subdirs
        .par_iter()
        .map(|d| GalleryItem::Folder(cover::folder_item(&d.path, &d.name, root)))
        .collect();

    for file in &listing.files {
        let index = match positions.get(&file.relative_path) {
            Some(&i) => i,
            None => {
                // Appeared between the listing and the walk.
                tracing::warn!(path = %file.relative_path, "file missing from media walk");
                media.extend(media_entries(std::slice::from_ref(file)));
                media.len() - 1
            }
        };
        items.push(file_item(media[index].clone(), index));
    }

    sort_items(&mut items);
    tracing::debug!(tiles = items.len(), media = media.len(), "assembled root page");

    Ok(GalleryPage {
        view: View::Root,
        items,
        media,
    })
}

/// Assemble the page for the folder `name` directly under `root`.
pub fn assemble_folder(root: &Path, name: &str) -> Result<GalleryPage, GalleryError> {
    let dir = root.join(name);
    let listing = scan::scan_dir(&dir, root)?;

    let media = media_entries(&listing.files);
    let mut items: Vec<GalleryItem> = media
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, entry)| file_item(entry, i))
        .collect();
    sort_items(&mut items);
    tracing::debug!(folder = name, tiles = items.len(), "assembled folder page");

    Ok(GalleryPage {
        view: View::Folder {
            name: name.to_string(),
        },
        items,
        media,
    })
}
