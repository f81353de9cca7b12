use crate::record::{GPS_LAT_DECIMAL_KEY, GPS_LON_DECIMAL_KEY};

const ACRONYMS: &[&str] = &["gps", "jpeg", "exif", "id", "ifd", "iso", "dop"];

/// Tag names whose acronyms run into each other.
const SNAKE_CASE_EXCEPTIONS: &[(&str, &str)] = &[
    ("GPSDOP", "gps_dop"),
    ("GPSHPositioningError", "gps_horizontal_positioning_error"),
];

/// `GPSLatitudeRef` -> `gps_latitude_ref`, `FNumber` -> `f_number`.
pub fn snake_case(name: &str) -> String {
    if let Some((_, snake)) = SNAKE_CASE_EXCEPTIONS.iter().find(|(tag, _)| *tag == name) {
        return snake.to_string();
    }
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
            // End of an acronym run: the `L` in `GPSLatitude`.
            Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Human readable label for a field name, e.g. `gps_img_direction` ->
/// `GPS Img Direction`.
pub fn pretty_alias(key: &str) -> String {
    match key {
        GPS_LAT_DECIMAL_KEY => return "GPS Latitude  (decimal degrees)".to_string(),
        GPS_LON_DECIMAL_KEY => return "GPS Longitude (decimal degrees)".to_string(),
        _ => {}
    }

    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            if ACRONYMS.contains(&lower.as_str()) {
                return lower.to_uppercase();
            }
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub mod test_helpers {
    use exif::experimental::Writer;
    use exif::{Field, In, Rational, Tag, Value};
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    pub fn ascii(tag: Tag, text: &str) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![text.as_bytes().to_vec()]),
        }
    }

    pub fn short(tag: Tag, n: u16) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![n]),
        }
    }

    pub fn rationals(tag: Tag, values: &[(u32, u32)]) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Rational(
                values
                    .iter()
                    .map(|&(num, denom)| Rational { num, denom })
                    .collect(),
            ),
        }
    }

    /// Camera fields without any GPS data.
    pub fn camera_fields() -> Vec<Field> {
        vec![
            ascii(Tag::Make, "Canon"),
            ascii(Tag::Model, "Canon PowerShot G5"),
            short(Tag::Orientation, 1),
            rationals(Tag::XResolution, &[(180, 1)]),
        ]
    }

    /// Phone fields with a GPS position of 40°26'46"N 79°58'56"W.
    pub fn gps_fields() -> Vec<Field> {
        vec![
            ascii(Tag::Make, "Sony"),
            ascii(Tag::Model, "H8216"),
            ascii(Tag::GPSLatitudeRef, "N"),
            rationals(Tag::GPSLatitude, &[(40, 1), (26, 1), (46, 1)]),
            ascii(Tag::GPSLongitudeRef, "W"),
            rationals(Tag::GPSLongitude, &[(79, 1), (58, 1), (56, 1)]),
        ]
    }

    /// Wraps the fields in a minimal JPEG: SOI, an APP1 Exif segment, EOI.
    pub fn jpeg_bytes(fields: &[Field]) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer
            .write(&mut tiff, false)
            .expect("Failed to encode test EXIF data");
        let tiff = tiff.into_inner();

        let segment_len = u16::try_from(tiff.len() + 8).expect("EXIF segment too large");
        let mut jpeg = vec![0xff, 0xd8, 0xff, 0xe1];
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xff, 0xd9]);
        jpeg
    }

    /// A JPEG without an APP1 segment.
    pub fn jpeg_without_exif() -> Vec<u8> {
        vec![0xff, 0xd8, 0xff, 0xd9]
    }

    pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).expect("Failed to write test file");
        path
    }

    pub fn write_jpeg(dir: &Path, name: &str, fields: &[Field]) -> PathBuf {
        write_file(dir, name, &jpeg_bytes(fields))
    }
}
