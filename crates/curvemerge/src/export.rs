//! Writing merged records and reports.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{CurveMergeError, Result};
use crate::merger::MergeReport;
use crate::record::MergedRecord;

/// Output format for merged records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The bare JSON array.
    #[default]
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    /// Usual file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CurveMergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(CurveMergeError::UnsupportedFormat(format!(
                "{}. Use json, csv, or tsv.",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write merged records to any writer.
///
/// JSON is the bare array. CSV and TSV always start with the
/// `CurveID, Mnemonic, CurveUnit, Description` header, even when empty.
pub fn write_records<W: Write>(
    records: &[MergedRecord],
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer).map_err(|e| {
                CurveMergeError::Persistence(format!("Failed to write output: {}", e))
            })?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .has_headers(false)
                .from_writer(writer);

            wtr.write_record(MergedRecord::FIELDS)?;
            for record in records {
                wtr.serialize(record)?;
            }
            wtr.flush().map_err(|e| {
                CurveMergeError::Persistence(format!("Failed to write output: {}", e))
            })?;
        }
    }
    Ok(())
}

/// Render merged records as a JSON array string.
pub fn records_to_json(records: &[MergedRecord], pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(text)
}

/// Save merged records to a file, creating parent directories if needed.
pub fn save_records(
    records: &[MergedRecord],
    format: OutputFormat,
    path: impl AsRef<Path>,
) -> Result<()> {
    let file = create_file(path.as_ref())?;
    write_records(records, format, BufWriter::new(file))
}

impl MergeReport {
    /// Save the full report as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = create_file(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            CurveMergeError::Persistence(format!("Failed to serialize merge report: {}", e))
        })
    }

    /// Load a report saved with [`MergeReport::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CurveMergeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| {
            CurveMergeError::Persistence(format!(
                "Failed to parse merge report '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CurveMergeError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(path).map_err(|e| {
        CurveMergeError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
    })
}
