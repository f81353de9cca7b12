use std::fmt;

/// Key holding the source path of a record. Always the first key.
pub const FILENAME_KEY: &str = "filename";
/// Signed decimal latitude derived from `gps_latitude` and `gps_latitude_ref`.
pub const GPS_LAT_DECIMAL_KEY: &str = "gps_lat_decimal";
/// Signed decimal longitude derived from `gps_longitude` and `gps_longitude_ref`.
pub const GPS_LON_DECIMAL_KEY: &str = "gps_lon_decimal";

/// A single metadata value, as reported by the EXIF parser.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Degrees, minutes and seconds of a GPS coordinate.
    Coordinate(f64, f64, f64),
    /// Anything else, in the parser's own display form
    /// (multi-valued numbers, undefined byte blocks, ...).
    Unknown(String),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TagValue::Integer(i) => Some(i as f64),
            TagValue::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(s) | TagValue::Unknown(s) => f.write_str(s),
            TagValue::Integer(i) => write!(f, "{}", i),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::Coordinate(d, m, s) => write!(f, "({}, {}, {})", d, m, s),
        }
    }
}

/// Metadata of one file: an insertion-ordered map from field name to value.
///
/// Keys are unique. Inserting a key that is already present keeps the
/// first value, so tags of the primary image shadow the thumbnail's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    entries: Vec<(String, TagValue)>,
}

impl MetadataRecord {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and leaves the record unchanged) if `key` exists.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: TagValue) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source path the record was extracted from, if recorded.
    pub fn filename(&self) -> Option<&str> {
        self.get(FILENAME_KEY).and_then(TagValue::as_text)
    }
}

impl<K: Into<String>> FromIterator<(K, TagValue)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, TagValue)>>(iter: I) -> Self {
        let mut record = MetadataRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
