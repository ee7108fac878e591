//! Drill orchestrator.
//!
//! Runs pages strictly one after another: each page gets a session, and the
//! finished session becomes one `LogRecord` handed to the record sink. Any
//! fatal error stops the run before the current page is persisted.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::DrillConfig;
use crate::model::{LogRecord, Page, DEFAULT_EXPECTED_PER_PAGE};
use crate::session::{Session, SessionConfig};
use crate::traits::{RecordSink, Stopwatch};

/// Configuration for the drill engine.
#[derive(Debug, Clone)]
pub struct DrillEngineConfig {
    pub session: SessionConfig,
    /// Operations a full page is assumed to hold; the log's incorrect count
    /// is computed against this, not the page length.
    pub expected_per_page: u32,
}

impl Default for DrillEngineConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            expected_per_page: DEFAULT_EXPECTED_PER_PAGE,
        }
    }
}

impl From<&DrillConfig> for DrillEngineConfig {
    fn from(config: &DrillConfig) -> Self {
        Self {
            session: config.session_config(),
            expected_per_page: config.expected_per_page,
        }
    }
}

/// Line-oriented console the sessions talk to.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
}

/// The drill engine.
pub struct DrillEngine {
    config: DrillEngineConfig,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl DrillEngine {
    pub fn new(config: DrillEngineConfig) -> Self {
        Self {
            config,
            today: local_today,
        }
    }

    /// Override the date stamped on records.
    pub fn with_date_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run every page in order and persist one record per page.
    pub fn run(
        &self,
        pages: &[Page],
        console: &mut Console<'_>,
        stopwatch: &mut dyn Stopwatch,
        sink: &mut dyn RecordSink,
    ) -> Result<Vec<LogRecord>> {
        let mut records = Vec::with_capacity(pages.len());

        for page in pages {
            writeln!(console.output, "Processing the page: {}", page.id)?;
            tracing::info!(page = %page.id, operations = page.lines.len(), "page started");

            let report = Session::new(
                &self.config.session,
                &mut *console.input,
                &mut *console.output,
                &mut *stopwatch,
            )
            .run(page)
            .with_context(|| format!("session for page {} failed", page.id))?;

            let record = LogRecord::from_summary(
                page.id.clone(),
                &report.summary,
                self.config.expected_per_page,
                (self.today)(),
            );
            sink.append(&record)
                .with_context(|| format!("failed to save results for page {}", page.id))?;
            writeln!(console.output, "Results saved in the CSV file")?;
            tracing::info!(page = %page.id, "record saved");

            records.push(record);
        }

        Ok(records)
    }
}
