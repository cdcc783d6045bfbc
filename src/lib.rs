//! # Folio
//!
//! Serves a local directory of photos and videos as a browsable HTML gallery.
//! The filesystem is the only data source: nothing is indexed, cached, or
//! written. Every request re-reads the directory so new files show up on the
//! next page load.
//!
//! # Request Flow
//!
//! ```text
//! GET /        →  scan root + walk tree  →  GalleryPage  →  HTML
//! GET /{name}  →  scan one folder        →  GalleryPage  →  HTML
//! GET /a/b.jpg →  static file from the media root
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`server`] | axum router, handlers, static file fall-through |
//! | [`gallery`] | Assembles the root and folder pages: tiles plus the lightbox navigation list |
//! | [`scan`] | Lists one directory, or walks the whole tree for media files |
//! | [`cover`] | Picks a folder's cover file and builds its tile |
//! | [`metadata`] | Caption resolution from EXIF and IPTC with a filename fallback |
//! | [`iptc`] | Minimal IPTC-IIM reader for JPEG APP13 segments |
//! | [`render`] | Maud templates for the page and lightbox |
//! | [`config`] | `config.toml` loading, validation, and color CSS generation |
//! | [`types`] | Shared types passed from assembly to rendering |
//! | [`naming`] | Display names from file and folder names |
//! | [`output`] | CLI output for `check` |
//!
//! # Captions
//!
//! The first non-empty source wins:
//!
//! 1. EXIF `ImageDescription`
//! 2. EXIF `XPTitle`
//! 3. IPTC `ObjectName`
//! 4. IPTC `Caption-Abstract`
//! 5. EXIF `DateTimeOriginal` as a long date (`March 15, 2024`)
//! 6. EXIF camera `Model`
//! 7. `Video` for video files, otherwise the file stem with `-`/`_` as spaces
//!
//! Embedded metadata is only read from JPEGs.

pub mod config;
pub mod cover;
pub mod gallery;
pub mod iptc;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
