use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read file: {}. error={source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a JPEG file: {}", .path.display())]
    NotJpeg { path: PathBuf },

    #[error("EXIF metadata extraction failed. file={}, error={source}", .path.display())]
    Parse { path: PathBuf, source: exif::Error },

    #[error("Invalid GPS reference {reference:?}, expected one of N, S, E or W")]
    InvalidGpsReference { reference: String },

    #[error("Invalid input file pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("no input files found")]
    NoInputFiles,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
