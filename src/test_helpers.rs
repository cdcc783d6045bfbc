//! Shared test utilities for the folio test suite.
//!
//! Builds tiny but valid JPEG files carrying EXIF and IPTC metadata, and
//! provides lookups over assembled gallery pages that panic with a readable
//! message on a miss.
//!
//! ```rust
//! let bytes = jpeg_with_exif(&ExifSpec {
//!     description: Some("Harbor"),
//!     ..Default::default()
//! });
//! std::fs::write(dir.join("harbor.jpg"), bytes).unwrap();
//! ```

use exif::experimental::Writer;
use exif::{Context, Field, In, Tag, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::types::{FileItem, FolderItem, GalleryItem, GalleryPage};

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Create a small placeholder file. Content is irrelevant to scanning.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"fake media").unwrap();
    path
}

// =========================================================================
// JPEG builders
// =========================================================================

/// Which EXIF tags to embed. Dates use EXIF's `YYYY:MM:DD HH:MM:SS` form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifSpec<'a> {
    pub description: Option<&'a str>,
    pub xp_title: Option<&'a str>,
    pub date_original: Option<&'a str>,
    pub model: Option<&'a str>,
}

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

/// Raw TIFF bytes holding the requested EXIF fields.
fn exif_tiff(spec: &ExifSpec) -> Vec<u8> {
    let mut fields = Vec::new();
    if let Some(d) = spec.description {
        fields.push(ascii(Tag::ImageDescription, d));
    }
    if let Some(m) = spec.model {
        fields.push(ascii(Tag::Model, m));
    }
    if let Some(t) = spec.xp_title {
        let mut utf16: Vec<u8> = t.encode_utf16().flat_map(u16::to_le_bytes).collect();
        utf16.extend_from_slice(&[0, 0]);
        fields.push(Field {
            tag: Tag(Context::Tiff, 0x9C9B),
            ifd_num: In::PRIMARY,
            value: Value::Byte(utf16),
        });
    }
    if let Some(dt) = spec.date_original {
        fields.push(ascii(Tag::DateTimeOriginal, dt));
    }
    // A TIFF needs at least one IFD0 entry.
    if fields.is_empty() {
        fields.push(Field {
            tag: Tag::Orientation,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![1]),
        });
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let len = u16::try_from(payload.len() + 2).unwrap();
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

fn app1_exif(spec: &ExifSpec) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(exif_tiff(spec));
    segment(0xE1, &payload)
}

fn app13_iptc(datasets: &[Vec<u8>]) -> Vec<u8> {
    let iim: Vec<u8> = datasets.concat();
    let mut payload = b"Photoshop 3.0\0".to_vec();
    payload.extend_from_slice(b"8BIM");
    payload.extend_from_slice(&0x0404u16.to_be_bytes());
    payload.extend_from_slice(&[0, 0]); // empty pascal name, padded
    payload.extend_from_slice(&u32::try_from(iim.len()).unwrap().to_be_bytes());
    payload.extend_from_slice(&iim);
    if iim.len() % 2 == 1 {
        payload.push(0);
    }
    segment(0xED, &payload)
}

fn wrap_jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    for s in segments {
        out.extend_from_slice(s);
    }
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// One IPTC record-2 dataset (`5` = ObjectName, `120` = Caption-Abstract).
pub fn iim_dataset(dataset: u8, value: &str) -> Vec<u8> {
    let len = u16::try_from(value.len()).unwrap();
    let mut out = vec![0x1C, 2, dataset];
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(value.as_bytes());
    out
}

/// A JPEG whose only content is an EXIF APP1 segment.
pub fn jpeg_with_exif(spec: &ExifSpec) -> Vec<u8> {
    wrap_jpeg(&[app1_exif(spec)])
}

/// A JPEG whose only content is an IPTC APP13 segment.
pub fn jpeg_with_iptc(datasets: &[Vec<u8>]) -> Vec<u8> {
    wrap_jpeg(&[app13_iptc(datasets)])
}

/// A JPEG with both EXIF and IPTC segments.
pub fn jpeg_with_exif_and_iptc(spec: &ExifSpec, datasets: &[Vec<u8>]) -> Vec<u8> {
    wrap_jpeg(&[app1_exif(spec), app13_iptc(datasets)])
}

// =========================================================================
// Page lookups
// =========================================================================

/// All folder tiles in display order.
pub fn folders(page: &GalleryPage) -> Vec<&FolderItem> {
    page.items
        .iter()
        .filter_map(|i| match i {
            GalleryItem::Folder(f) => Some(f),
            GalleryItem::File(_) => None,
        })
        .collect()
}

/// All file tiles in display order.
pub fn files(page: &GalleryPage) -> Vec<&FileItem> {
    page.items
        .iter()
        .filter_map(|i| match i {
            GalleryItem::File(f) => Some(f),
            GalleryItem::Folder(_) => None,
        })
        .collect()
}

/// Find a folder tile by name. Panics if not found.
pub fn find_folder<'a>(page: &'a GalleryPage, name: &str) -> &'a FolderItem {
    folders(page)
        .into_iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = folders(page).iter().map(|f| f.name.as_str()).collect();
            panic!("folder '{name}' not found. Available: {names:?}")
        })
}

/// Find a file tile by relative path. Panics if not found.
pub fn find_file<'a>(page: &'a GalleryPage, relative_path: &str) -> &'a FileItem {
    files(page)
        .into_iter()
        .find(|f| f.entry.relative_path == relative_path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = files(page)
                .iter()
                .map(|f| f.entry.relative_path.as_str())
                .collect();
            panic!("file '{relative_path}' not found. Available: {paths:?}")
        })
}

/// Relative paths of the page's navigation list, in order.
pub fn media_paths(page: &GalleryPage) -> Vec<&str> {
    page.media.iter().map(|m| m.relative_path.as_str()).collect()
}
