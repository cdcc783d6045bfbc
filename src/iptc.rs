//! Minimal IPTC-IIM reader for JPEG files.
//!
//! Photo tools (Lightroom, Capture One, digiKam) write the "Title" field as
//! IPTC ObjectName (2:05) inside a Photoshop APP13 segment, not as an EXIF
//! tag. Only that record and Caption-Abstract (2:120) are extracted.
//!
//! Layout walked here:
//!
//! ```text
//! FF D8                     SOI
//! FF ED len "Photoshop 3.0\0"
//!     "8BIM" id=0x0404 pascal-name len data   ← raw IIM datasets
//! ...
//! FF DA                     SOS, scanning stops
//! ```

/// IPTC fields used for captions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IptcData {
    pub object_name: Option<String>,
    pub caption: Option<String>,
}

/// Read IPTC fields from JPEG bytes. Anything malformed yields empty data.
pub fn read_iptc_from_jpeg(data: &[u8]) -> IptcData {
    find_app13_iim(data)
        .map(parse_iim)
        .unwrap_or_default()
}

const PHOTOSHOP_HEADER: &[u8] = b"Photoshop 3.0\0";
const BIM_MARKER: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

/// Parse IIM datasets: `1C record dataset len_hi len_lo data...`.
fn parse_iim(data: &[u8]) -> IptcData {
    let mut result = IptcData::default();
    let mut pos = 0;

    while pos + 5 <= data.len() {
        if data[pos] != 0x1C {
            pos += 1;
            continue;
        }
        let record = data[pos + 1];
        let dataset = data[pos + 2];
        let length = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as usize;
        pos += 5;
        if pos + length > data.len() {
            break;
        }

        if record == 2 {
            let value = String::from_utf8_lossy(&data[pos..pos + length])
                .trim()
                .to_string();
            if !value.is_empty() {
                match dataset {
                    5 => result.object_name = Some(value),
                    120 => result.caption = Some(value),
                    _ => {}
                }
            }
        }
        pos += length;
    }

    result
}

/// Locate the IIM block inside the first APP13 segment that carries one.
fn find_app13_iim(data: &[u8]) -> Option<&[u8]> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        match marker {
            // padding
            0xFF => {
                pos += 1;
                continue;
            }
            0xDA | 0xD9 => return None,
            0xD0..=0xD7 | 0x01 => {
                pos += 2;
                continue;
            }
            _ => {}
        }
        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if seg_len < 2 {
            return None;
        }
        let seg_start = pos + 4;
        let seg_end = (pos + 2 + seg_len).min(data.len());
        if marker == 0xED
            && seg_start <= seg_end
            && let Some(iim) = iim_from_8bim(&data[seg_start..seg_end])
        {
            return Some(iim);
        }
        pos += 2 + seg_len;
    }
    None
}

/// Find resource 0x0404 in a run of Photoshop image resource blocks.
fn iim_from_8bim(segment: &[u8]) -> Option<&[u8]> {
    let data = segment.strip_prefix(PHOTOSHOP_HEADER).unwrap_or(segment);

    let mut pos = 0;
    while pos + 12 <= data.len() {
        if &data[pos..pos + 4] != BIM_MARKER {
            pos += 1;
            continue;
        }
        pos += 4;
        let resource_id = u16::from_be_bytes([data[pos], data[pos + 1]]);
        pos += 2;

        // Pascal string, padded so length byte + text is even.
        let name_len = data[pos] as usize;
        pos += 1 + name_len + ((1 + name_len) % 2);
        if pos + 4 > data.len() {
            break;
        }
        let res_len =
            u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
        pos += 4;
        if pos + res_len > data.len() {
            break;
        }
        if resource_id == IPTC_RESOURCE_ID {
            return Some(&data[pos..pos + res_len]);
        }
        pos += res_len + (res_len % 2);
    }
    None
}
