use crate::error::ExtractError;
use crate::exif_extract::ExifExtract;
use crate::record::MetadataRecord;
use std::io::Write;

impl ExifExtract {
    /// Writes the metadata table as CSV.
    ///
    /// The header row holds the field headings (or their aliases when
    /// `use_aliases` is set), followed by one row per file. Fields a file
    /// does not have are left empty.
    pub fn write_csv<W: Write>(&self, outfile: W, use_aliases: bool) -> Result<(), ExtractError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(outfile);

        let header = self.field_headings().iter().map(|key| {
            if use_aliases {
                self.pretty_alias(key).unwrap_or(key)
            } else {
                key.as_str()
            }
        });
        writer.write_record(header)?;

        for row in self.exif_table() {
            let fields = self.field_headings().iter().map(|key| {
                row.get(key)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            });
            writer.write_record(fields)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes one `<key>: <value>` line per field of a single file's metadata.
    ///
    /// Needs nothing from the batch, so any record can be printed, including
    /// one from [`extract_file`](crate::extract_file).
    pub fn pretty_print_exif<W: Write>(
        single_image_exif: &MetadataRecord,
        mut outfile: W,
    ) -> Result<(), ExtractError> {
        for (key, value) in single_image_exif.iter() {
            writeln!(outfile, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TagValue, FILENAME_KEY, GPS_LAT_DECIMAL_KEY};
    use crate::utils::test_helpers::{camera_fields, gps_fields, write_jpeg};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn record(entries: &[(&str, TagValue)]) -> MetadataRecord {
        entries.iter().cloned().collect()
    }

    fn sample() -> ExifExtract {
        ExifExtract::from_records([
            record(&[
                (FILENAME_KEY, TagValue::Text("a.jpg".into())),
                ("make", TagValue::Text("Canon".into())),
                ("gps_lat_decimal", TagValue::Float(40.4461)),
            ]),
            record(&[
                (FILENAME_KEY, TagValue::Text("b.jpg".into())),
                ("model", TagValue::Text("G5, \"silver\"".into())),
                ("make", TagValue::Text("Sony".into())),
            ]),
        ])
    }

    fn to_string(extract: &ExifExtract, use_aliases: bool) -> Result<String, ExtractError> {
        let mut out = Vec::new();
        extract.write_csv(&mut out, use_aliases)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_write_csv() -> Result<(), ExtractError> {
        let csv = to_string(&sample(), false)?;
        let expected = "filename,make,gps_lat_decimal,model\n\
                        a.jpg,Canon,40.4461,\n\
                        b.jpg,Sony,,\"G5, \"\"silver\"\"\"\n";
        assert_eq!(csv, expected);
        Ok(())
    }

    #[test]
    fn test_write_csv_with_aliases_keeps_column_order() -> Result<(), ExtractError> {
        let extract = sample();
        let csv = to_string(&extract, true)?;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Filename,Make,GPS Latitude  (decimal degrees),Model")
        );
        // Rows are the same as without aliases.
        let plain = to_string(&extract, false)?;
        assert_eq!(lines.collect::<Vec<_>>(), plain.lines().skip(1).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_csv_round_trip() -> Result<(), ExtractError> {
        let dir = TempDir::new()?;
        let path = write_jpeg(dir.path(), "camera.jpg", &camera_fields());
        let extract = ExifExtract::new([&path], false, std::io::sink())?;
        let csv = to_string(&extract, false)?;

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers()?.clone();
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
        assert_eq!(rows.len(), 1);

        let parsed: HashMap<&str, &str> = headers.iter().zip(rows[0].iter()).collect();
        let record = &extract.exif_table()[0];
        assert_eq!(parsed.len(), record.len());
        for (key, value) in record.iter() {
            assert_eq!(parsed.get(key), Some(&value.to_string().as_str()), "field {key}");
        }
        Ok(())
    }

    #[test]
    fn test_gps_decimal_full_precision_in_csv() -> Result<(), ExtractError> {
        let dir = TempDir::new()?;
        let path = write_jpeg(dir.path(), "phone.jpg", &gps_fields());
        let extract = ExifExtract::new([&path], false, std::io::sink())?;
        let csv = to_string(&extract, false)?;

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let column = reader
            .headers()?
            .iter()
            .position(|h| h == GPS_LAT_DECIMAL_KEY)
            .unwrap();
        let row = reader.records().next().unwrap()?;
        let lat: f64 = row[column].parse().unwrap();
        assert_eq!(lat, 40.0 + 26.0 / 60.0 + 46.0 / 3600.0);
        Ok(())
    }

    #[test]
    fn test_pretty_print_exif() -> Result<(), ExtractError> {
        let extract = sample();
        let mut out = Vec::new();
        ExifExtract::pretty_print_exif(&extract.exif_table()[1], &mut out)?;
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "filename: b.jpg\nmodel: G5, \"silver\"\nmake: Sony\n"
        );
        Ok(())
    }
}
