use crate::error::ExtractError;
use crate::exif_extract::ExifExtract;
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const RULE: &str = "------------------------------------------------------------------------------";

/// Extract EXIF metadata from JPEG image files and (optionally) output in CSV
/// or prettified format
#[derive(Debug, Parser)]
#[command(
    version,
    after_help = "Also consolidates any GPS location data found into 2 additional fields:\n  \
                  gps_lat_decimal: latitude (in decimal degrees)\n  \
                  gps_lon_decimal: longitude (in decimal degrees)"
)]
pub struct Args {
    /// Input JPEG image filenames (wildcards are expanded)
    #[arg(required = true)]
    pub infile: Vec<PathBuf>,

    /// Write metadata to stderr in a pretty format
    #[arg(short, long)]
    pub prettyprint: bool,

    /// Use "pretty print" aliases for CSV file headings
    #[arg(short, long)]
    pub aliases: bool,

    /// Do not write progress to stderr
    #[arg(short, long)]
    pub silent: bool,

    /// Filename to write CSV metadata output ("-" for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Runs [`run`] and renders a failure as `ERROR: <message>` on `diag`.
///
/// Returns the process exit status: 0 on success, 1 on any failure.
pub fn execute<O, E>(args: &Args, stdout: O, mut diag: E) -> u8
where
    O: Write,
    E: Write,
{
    match run(args, stdout, &mut diag) {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("Extraction failed: {e:?}");
            // Nothing more can be reported if diag itself is broken.
            let _ = writeln!(diag, "ERROR: {e}");
            1
        }
    }
}

/// Runs one extraction with explicit output streams.
///
/// `stdout` only receives CSV when the output is `-`; progress messages and
/// pretty printed metadata go to `diag`. Nothing is written to the CSV
/// destination unless every file was extracted successfully.
pub fn run<O, E>(args: &Args, mut stdout: O, mut diag: E) -> Result<(), ExtractError>
where
    O: Write,
    E: Write,
{
    let verbose = !args.silent;
    let infiles = expand_infiles(&args.infile)?;
    let exif_data = ExifExtract::new(&infiles, verbose, &mut diag)?;

    // Without any requested output the metadata is shown in the console.
    let prettyprint = args.prettyprint || args.output.is_none();
    if prettyprint {
        for single_image_exif in exif_data.exif_table() {
            writeln!(diag)?;
            writeln!(diag, "{RULE}")?;
            writeln!(diag, "FILE: {}", single_image_exif.filename().unwrap_or_default())?;
            writeln!(diag, "{RULE}")?;
            ExifExtract::pretty_print_exif(single_image_exif, &mut diag)?;
        }
    }

    if let Some(output) = &args.output {
        if output.as_os_str() == "-" {
            exif_data.write_csv(&mut stdout, args.aliases)?;
            stdout.flush()?;
        } else {
            if verbose {
                writeln!(
                    diag,
                    "Writing extracted EXIF metadata to CSV file: {}",
                    output.display()
                )?;
            }
            write_csv_file(&exif_data, output, args.aliases)?;
        }
    }
    Ok(())
}

/// Expands wildcard patterns, in the order given.
///
/// Arguments without `*`, `?` or `[` are kept as is, so a missing file is
/// reported when it is read. A pattern matching nothing adds no files.
fn expand_infiles(infiles: &[PathBuf]) -> Result<Vec<PathBuf>, ExtractError> {
    let mut expanded = Vec::new();
    for infile in infiles {
        let pattern = match infile.to_str() {
            Some(pattern) if pattern.contains(['*', '?', '[']) => pattern,
            _ => {
                expanded.push(infile.clone());
                continue;
            }
        };
        let paths = glob::glob(pattern).map_err(|source| ExtractError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let before = expanded.len();
        for entry in paths {
            let path = entry.map_err(|e| ExtractError::Read {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            expanded.push(path);
        }
        log::debug!("Pattern {pattern} matched {} files", expanded.len() - before);
    }

    if expanded.is_empty() {
        return Err(ExtractError::NoInputFiles);
    }
    Ok(expanded)
}

/// Writes the CSV next to `path` and moves it into place once complete.
///
/// A file that is replaced keeps its permissions; a new one is created 0644
/// (less the umask) on unix.
fn write_csv_file(exif_data: &ExifExtract, path: &Path, use_aliases: bool) -> Result<(), ExtractError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    if let Ok(metadata) = fs::metadata(path) {
        builder.permissions(metadata.permissions());
    } else {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
    }
    let mut temp_file = builder.tempfile_in(dir)?;
    exif_data.write_csv(&mut temp_file, use_aliases)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    log::debug!("Wrote {} rows to {}", exif_data.exif_table().len(), path.display());
    Ok(())
}
