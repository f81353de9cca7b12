//! # exif-extract
//!
//! Extract EXIF metadata from JPEG image files and write it as CSV or as
//! human readable text.
//!
//! Parsing of the JPEG/EXIF container is done by the `kamadak-exif` crate.
//! On top of the raw tags, two fields are derived from the GPS block:
//!
//! * `gps_lat_decimal`: latitude in signed decimal degrees
//! * `gps_lon_decimal`: longitude in signed decimal degrees
//!
//! ## Basic Usage
//!
//! ```no_run
//! use exif_extract::{ExifExtract, ExtractError};
//! use std::fs::File;
//!
//! fn main() -> Result<(), ExtractError> {
//!     // Progress ("Reading file: ...") goes to stderr.
//!     let extract = ExifExtract::new(
//!         ["example_images/DSC_0101.jpg", "example_images/DSC_0158.jpg"],
//!         true,
//!         std::io::stderr(),
//!     )?;
//!
//!     // Every field seen in any file becomes a CSV column.
//!     println!("Columns: {:?}", extract.field_headings());
//!     extract.write_csv(File::create("exif_output.csv")?, false)?;
//!
//!     // Or show a single file's metadata.
//!     ExifExtract::pretty_print_exif(&extract.exif_table()[0], std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! Reading a single file:
//!
//! ```no_run
//! use exif_extract::{extract_file, TagValue, ExtractError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ExtractError> {
//!     let record = extract_file(Path::new("photo.jpg"))?;
//!     if let Some(TagValue::Float(lat)) = record.get("gps_lat_decimal") {
//!         println!("Latitude: {}", lat);
//!     }
//!     Ok(())
//! }
//! ```

// Public API
mod error;
mod exif_extract;
mod extract;
mod format;
mod record;

pub use error::ExtractError;
pub use exif_extract::ExifExtract;
pub use extract::{extract_bytes, extract_file};
pub use record::{
    MetadataRecord, TagValue, FILENAME_KEY, GPS_LAT_DECIMAL_KEY, GPS_LON_DECIMAL_KEY,
};

pub mod cli;
pub mod gps;

mod utils;
pub use utils::pretty_alias;
