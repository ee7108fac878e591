//! Append-only CSV record log.
//!
//! Columns, in order: `page_id, correct, incorrect, fast, date`. The date
//! is written as `DD-MM-YYYY`. No header row is written.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use pagedrill_core::model::LogRecord;
use pagedrill_core::traits::RecordSink;

/// Date format used in the log's last column.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A CSV file that receives one row per completed page.
#[derive(Debug, Clone)]
pub struct CsvRecordLog {
    path: PathBuf,
}

impl CsvRecordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvRecordLog {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open the file: {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record([
                record.page_id.clone(),
                record.correct.to_string(),
                record.incorrect.to_string(),
                record.fast.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
            ])
            .with_context(|| format!("failed to write to file: {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("error writing csv: {}", self.path.display()))?;

        tracing::debug!(page = %record.page_id, path = %self.path.display(), "row appended");
        Ok(())
    }
}

/// Read every row of a record log, in file order.
pub fn read_records(path: &Path) -> Result<Vec<LogRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to read record log: {}", path.display()))?;

    reader
        .records()
        .enumerate()
        .map(|(idx, row)| {
            let row = row.with_context(|| format!("{}: row {}", path.display(), idx + 1))?;
            parse_row(&row).with_context(|| format!("{}: row {}", path.display(), idx + 1))
        })
        .collect()
}

fn parse_row(row: &csv::StringRecord) -> Result<LogRecord> {
    anyhow::ensure!(row.len() == 5, "expected 5 columns, found {}", row.len());

    let count = |i: usize, name: &str| -> Result<u32> {
        row[i]
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {name} count: '{}'", &row[i]))
    };

    Ok(LogRecord {
        page_id: row[0].to_string(),
        correct: count(1, "correct")?,
        incorrect: count(2, "incorrect")?,
        fast: count(3, "fast")?,
        date: NaiveDate::parse_from_str(row[4].trim(), DATE_FORMAT)
            .with_context(|| format!("invalid date: '{}'", &row[4]))?,
    })
}
