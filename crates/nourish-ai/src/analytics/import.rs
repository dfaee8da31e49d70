use super::records::{LogRecord, RawLogRecord};
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LogImportError {
    #[error("unable to read log export: {0}")]
    Io(#[from] io::Error),
    #[error("malformed log export: {0}")]
    Csv(#[from] csv::Error),
}

/// Imports consumption logs from the app's CSV export
/// (`item_name,category,quantity,created_at`, with the same header aliases
/// the JSON API accepts). Each row is normalized into a [`LogRecord`];
/// entirely blank rows are skipped.
pub struct CsvLogImporter;

impl CsvLogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<LogRecord>, LogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Vec<LogRecord>, LogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<RawLogRecord>() {
            let raw = row?;
            if raw.is_blank() {
                continue;
            }
            records.push(raw.normalize());
        }
        Ok(records)
    }
}
