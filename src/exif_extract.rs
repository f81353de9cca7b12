use crate::error::ExtractError;
use crate::extract::extract_file;
use crate::record::MetadataRecord;
use crate::utils::pretty_alias;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

/// EXIF metadata of a batch of JPEG files.
///
/// Holds one [`MetadataRecord`] per input file (in input order), the union of
/// all field names in first-seen order, and a human readable alias for each
/// field name. Built once by [`ExifExtract::new`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExifExtract {
    field_headings: Vec<String>,
    exif_table: Vec<MetadataRecord>,
    pretty_aliases: HashMap<String, String>,
}

impl ExifExtract {
    /// Extracts metadata from every file, in order.
    ///
    /// When `verbose` is set, each file name is written to `progress` before
    /// it is read. The first file that fails aborts the whole batch.
    ///
    /// # Example
    /// ```no_run
    /// # use exif_extract::{ExifExtract, ExtractError};
    /// # fn main() -> Result<(), ExtractError> {
    /// let extract = ExifExtract::new(["a.jpg", "b.jpg"], true, std::io::stderr())?;
    /// extract.write_csv(std::fs::File::create("exif_output.csv")?, false)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<I, P, W>(infilenames: I, verbose: bool, mut progress: W) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        W: Write,
    {
        let mut exif_table = Vec::new();
        for path in infilenames {
            let path = path.as_ref();
            if verbose {
                writeln!(progress, "Reading file: {}", path.display())?;
            }
            let record = extract_file(path)?;
            // `filename` is the only key of a JPEG without EXIF data.
            if verbose && record.len() <= 1 {
                writeln!(progress, "- No EXIF metadata found")?;
            }
            exif_table.push(record);
        }
        Ok(Self::from_records(exif_table))
    }

    /// Builds the headings and aliases for records that were extracted elsewhere.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MetadataRecord>,
    {
        let exif_table: Vec<MetadataRecord> = records.into_iter().collect();

        let mut seen = HashSet::new();
        let mut field_headings = Vec::new();
        for key in exif_table.iter().flat_map(MetadataRecord::keys) {
            if seen.insert(key) {
                field_headings.push(key.to_string());
            }
        }

        let pretty_aliases = field_headings
            .iter()
            .map(|key| (key.clone(), pretty_alias(key)))
            .collect();

        Self {
            field_headings,
            exif_table,
            pretty_aliases,
        }
    }

    /// Every field name seen in any file, each once, in first-seen order.
    pub fn field_headings(&self) -> &[String] {
        &self.field_headings
    }

    /// One record per input file, in input order.
    pub fn exif_table(&self) -> &[MetadataRecord] {
        &self.exif_table
    }

    pub fn pretty_aliases(&self) -> &HashMap<String, String> {
        &self.pretty_aliases
    }

    pub fn pretty_alias(&self, key: &str) -> Option<&str> {
        self.pretty_aliases.get(key).map(String::as_str)
    }
}
