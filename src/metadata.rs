//! Caption resolution for media files.
//!
//! Every tile and every lightbox slide carries a caption. It comes from the
//! first source that yields a non-empty value:
//!
//! 1. Descriptive tags embedded in a JPEG, in this order:
//!    - EXIF `ImageDescription`
//!    - EXIF `XPTitle` (the "Title" field Windows Explorer writes)
//!    - IPTC `ObjectName` (the "Title" field in Lightroom and friends)
//!    - IPTC `Caption-Abstract` (the "Description" field in the same tools)
//! 2. EXIF `DateTimeOriginal`, as a long date: `March 15, 2024`
//! 3. EXIF `Model`, the camera that took the shot
//! 4. The file itself: `"Video"` for video files, otherwise the file stem
//!    with `-`/`_` runs turned into spaces (`beach_sunset.jpg` → "beach sunset")
//!
//! Only `.jpg`/`.jpeg` files are opened. A file that claims to be a JPEG but
//! carries broken or no metadata is treated exactly like one with no tags;
//! parse failures never reach the caller.

use crate::iptc;
use crate::naming::{display_title, file_stem};
use crate::types::MediaKind;
use chrono::NaiveDate;
use exif::{Context, Exif, In, Tag, Value};
use std::io::Read;
use std::path::Path;

/// Windows "Title" property, UTF-16LE bytes in IFD0.
const TAG_XP_TITLE: Tag = Tag(Context::Tiff, 0x9C9B);

/// Metadata segments sit before the image data; no need to read further.
const METADATA_READ_LIMIT: u64 = 512 * 1024;

/// Caption-relevant metadata embedded in one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedMetadata {
    pub image_description: Option<String>,
    pub xp_title: Option<String>,
    pub object_name: Option<String>,
    pub iptc_caption: Option<String>,
    pub date_original: Option<NaiveDate>,
    pub model: Option<String>,
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Caption for the file at `path`. `extension` is lowercased with a leading dot.
pub fn resolve_caption(path: &Path, extension: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let embedded = if is_jpeg(extension) {
        read_embedded(path)
    } else {
        EmbeddedMetadata::default()
    };
    caption_from(&embedded, &file_name, extension)
}

/// Apply the caption precedence to already-extracted metadata.
pub fn caption_from(meta: &EmbeddedMetadata, file_name: &str, extension: &str) -> String {
    let date = meta.date_original.map(format_long_date);
    resolve(&[
        meta.image_description.as_deref(),
        meta.xp_title.as_deref(),
        meta.object_name.as_deref(),
        meta.iptc_caption.as_deref(),
        date.as_deref(),
        meta.model.as_deref(),
    ])
    .unwrap_or_else(|| fallback_caption(file_name, extension))
}

/// Caption when a file has nothing embedded.
pub fn fallback_caption(file_name: &str, extension: &str) -> String {
    if MediaKind::from_extension(extension) == Some(MediaKind::Video) {
        return "Video".to_string();
    }
    let title = display_title(file_stem(file_name));
    if title.is_empty() {
        file_name.to_string()
    } else {
        title
    }
}

/// The EXIF `ImageDescription` of a JPEG, if any. Used to caption folder covers.
pub fn image_description(path: &Path, extension: &str) -> Option<String> {
    if !is_jpeg(extension) {
        return None;
    }
    let bytes = read_head(path)?;
    let exif = parse_exif(&bytes, path)?;
    ascii_field(&exif, Tag::ImageDescription)
}

/// `March 15, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn is_jpeg(extension: &str) -> bool {
    matches!(extension, ".jpg" | ".jpeg")
}

/// Extract every caption source from a JPEG. Missing or unreadable data
/// leaves the corresponding field `None`.
pub fn read_embedded(path: &Path) -> EmbeddedMetadata {
    let Some(bytes) = read_head(path) else {
        return EmbeddedMetadata::default();
    };
    let iptc = iptc::read_iptc_from_jpeg(&bytes);
    let mut meta = EmbeddedMetadata {
        object_name: iptc.object_name,
        iptc_caption: iptc.caption,
        ..EmbeddedMetadata::default()
    };
    if let Some(exif) = parse_exif(&bytes, path) {
        meta.image_description = ascii_field(&exif, Tag::ImageDescription);
        meta.xp_title = xp_string_field(&exif, TAG_XP_TITLE);
        meta.date_original = date_field(&exif, Tag::DateTimeOriginal);
        meta.model = ascii_field(&exif, Tag::Model);
    }
    meta
}

fn read_head(path: &Path) -> Option<Vec<u8>> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot open for metadata");
            return None;
        }
    };
    let mut bytes = Vec::new();
    file.take(METADATA_READ_LIMIT)
        .read_to_end(&mut bytes)
        .ok()?;
    Some(bytes)
}

fn parse_exif(bytes: &[u8], path: &Path) -> Option<Exif> {
    let mut cursor = std::io::Cursor::new(bytes);
    match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => Some(exif),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no usable EXIF");
            None
        }
    }
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref parts) = field.value else {
        return None;
    };
    let text = parts
        .iter()
        .map(|p| String::from_utf8_lossy(p).trim_end_matches('\0').to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn xp_string_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Byte(ref bytes) = field.value else {
        return None;
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&u| u != 0)
        .collect();
    let text = String::from_utf16_lossy(&units);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn date_field(exif: &Exif, tag: Tag) -> Option<NaiveDate> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref parts) = field.value else {
        return None;
    };
    let dt = exif::DateTime::from_ascii(parts.first()?).ok()?;
    NaiveDate::from_ymd_opt(dt.year.into(), dt.month.into(), dt.day.into())
}
