use crate::error::ExtractError;
use crate::gps::{gps_decimal_coords, parse_reference};
use crate::record::{
    MetadataRecord, TagValue, FILENAME_KEY, GPS_LAT_DECIMAL_KEY, GPS_LON_DECIMAL_KEY,
};
use crate::utils::snake_case;
use exif::{Field, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::Path;

const JPEG_SIGNATURE: [u8; 2] = [0xff, 0xd8];

/// Coordinate tag, its hemisphere reference tag, and the decimal key derived from them.
const GPS_AXES: [(&str, &str, &str); 2] = [
    ("gps_latitude", "gps_latitude_ref", GPS_LAT_DECIMAL_KEY),
    ("gps_longitude", "gps_longitude_ref", GPS_LON_DECIMAL_KEY),
];

/// Reads every EXIF tag from one JPEG file.
///
/// The returned record starts with `filename` (the path as given), followed
/// by the tags in the order the parser reports them. When a GPS coordinate
/// and its reference are both present, `gps_lat_decimal` / `gps_lon_decimal`
/// are appended.
///
/// A JPEG that carries no EXIF segment yields a record with only `filename`.
pub fn extract_file(path: &Path) -> Result<MetadataRecord, ExtractError> {
    // The handle is dropped before parsing starts.
    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    extract_bytes(path, bytes)
}

/// Same as [`extract_file`] for JPEG data already in memory. `path` is only
/// used for the `filename` field and error reporting.
pub fn extract_bytes(path: &Path, bytes: Vec<u8>) -> Result<MetadataRecord, ExtractError> {
    if !bytes.starts_with(&JPEG_SIGNATURE) {
        return Err(ExtractError::NotJpeg {
            path: path.to_path_buf(),
        });
    }

    let mut record = MetadataRecord::new();
    record.insert(FILENAME_KEY, TagValue::Text(path.display().to_string()));

    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => {
            log::debug!("No EXIF segment in {}", path.display());
            return Ok(record);
        }
        Err(source) => {
            return Err(ExtractError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    for field in exif.fields() {
        let name = field_name(field);
        if !record.insert(name, tag_value(field)) {
            log::trace!(
                "Skipping duplicate tag {} in IFD {} of {}",
                field.tag,
                field.ifd_num.index(),
                path.display()
            );
        }
    }
    log::debug!("Read {} tags from {}", exif.fields().len(), path.display());

    add_decimal_coords(&mut record, path)?;
    Ok(record)
}

fn add_decimal_coords(record: &mut MetadataRecord, path: &Path) -> Result<(), ExtractError> {
    for (coord_key, ref_key, decimal_key) in GPS_AXES {
        let (Some(coords), Some(reference)) = (record.get(coord_key), record.get(ref_key)) else {
            continue;
        };
        let TagValue::Coordinate(degrees, minutes, seconds) = *coords else {
            log::warn!(
                "Ignoring malformed {} in {}: {}",
                coord_key,
                path.display(),
                coords
            );
            continue;
        };
        let reference = parse_reference(&reference.to_string())?;
        let decimal = gps_decimal_coords((degrees, minutes, seconds), reference)?;
        record.insert(decimal_key, TagValue::Float(decimal));
    }
    Ok(())
}

/// Snake case tag name, or `<context>_tag_0x<number>` for tags the parser
/// does not know.
fn field_name(field: &Field) -> String {
    match field.tag.description() {
        Some(_) => snake_case(&field.tag.to_string()),
        None => format!(
            "{}_tag_{:#06x}",
            format!("{:?}", field.tag.context()).to_lowercase(),
            field.tag.number()
        ),
    }
}

fn is_coordinate(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::GPSLatitude | Tag::GPSLongitude | Tag::GPSDestLatitude | Tag::GPSDestLongitude
    )
}

fn tag_value(field: &Field) -> TagValue {
    match &field.value {
        Value::Ascii(strings) => TagValue::Text(ascii_text(strings)),
        Value::Rational(v) if v.len() == 3 && is_coordinate(field.tag) => {
            TagValue::Coordinate(v[0].to_f64(), v[1].to_f64(), v[2].to_f64())
        }
        Value::Byte(v) if v.len() == 1 => TagValue::Integer(i64::from(v[0])),
        Value::Short(v) if v.len() == 1 => TagValue::Integer(i64::from(v[0])),
        Value::Long(v) if v.len() == 1 => TagValue::Integer(i64::from(v[0])),
        Value::SByte(v) if v.len() == 1 => TagValue::Integer(i64::from(v[0])),
        Value::SShort(v) if v.len() == 1 => TagValue::Integer(i64::from(v[0])),
        Value::SLong(v) if v.len() == 1 => TagValue::Integer(i64::from(v[0])),
        Value::Rational(v) if v.len() == 1 => TagValue::Float(v[0].to_f64()),
        Value::SRational(v) if v.len() == 1 => TagValue::Float(v[0].to_f64()),
        Value::Float(v) if v.len() == 1 => TagValue::Float(f64::from(v[0])),
        Value::Double(v) if v.len() == 1 => TagValue::Float(v[0]),
        _ => TagValue::Unknown(field.display_value().to_string()),
    }
}

fn ascii_text(strings: &[Vec<u8>]) -> String {
    strings
        .iter()
        .map(|s| {
            String::from_utf8_lossy(s)
                .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(", ")
}
