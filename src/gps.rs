use crate::error::ExtractError;

/// Converts an EXIF GPS coordinate (degrees, minutes, seconds) to signed
/// decimal degrees.
///
/// Southern latitudes and western longitudes are negative. The reference is
/// matched case-insensitively; anything other than `N`, `S`, `E` or `W`
/// is rejected.
///
/// # Example
/// ```
/// # use exif_extract::gps::gps_decimal_coords;
/// let lon = gps_decimal_coords((79.0, 58.0, 56.0), 'W').unwrap();
/// assert!((lon + 79.9822).abs() < 1e-4);
/// ```
pub fn gps_decimal_coords(coords: (f64, f64, f64), reference: char) -> Result<f64, ExtractError> {
    let (degrees, minutes, seconds) = coords;
    let decimal_degrees = degrees + minutes / 60.0 + seconds / 3600.0;
    match reference.to_ascii_uppercase() {
        'N' | 'E' => Ok(decimal_degrees),
        'S' | 'W' => Ok(-decimal_degrees),
        _ => Err(ExtractError::InvalidGpsReference {
            reference: reference.to_string(),
        }),
    }
}

/// Reads a reference character out of an EXIF `*Ref` string such as `"N"`.
pub(crate) fn parse_reference(text: &str) -> Result<char, ExtractError> {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ExtractError::InvalidGpsReference {
            reference: trimmed.to_string(),
        }),
    }
}
