//! The `pagedrill run` command.

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use pagedrill_core::config::load_config_from;
use pagedrill_core::engine::{Console, DrillEngine, DrillEngineConfig};
use pagedrill_core::parser;
use pagedrill_core::session::InputPolicy;
use pagedrill_core::traits::SystemStopwatch;
use pagedrill_report::csv_log::CsvRecordLog;

/// Arguments for `pagedrill run`.
pub struct RunArgs {
    pub pages: Option<PathBuf>,
    pub page_files: Vec<PathBuf>,
    pub record: Option<PathBuf>,
    pub fast_window: Option<u64>,
    pub expected: Option<u32>,
    pub reprompt: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;

    if let Some(dir) = args.pages {
        config.pages_dir = dir;
    }
    if let Some(record) = args.record {
        config.record_file = record;
    }
    if let Some(secs) = args.fast_window {
        config.fast_window_secs = secs;
    }
    if let Some(expected) = args.expected {
        config.expected_per_page = expected;
    }
    if args.reprompt {
        config.input_policy = InputPolicy::Reprompt;
    }

    anyhow::ensure!(
        config.fast_window_secs >= 1,
        "fast window must be at least 1 second"
    );
    anyhow::ensure!(
        config.expected_per_page >= 1,
        "expected operations per page must be at least 1"
    );

    let pages = if args.page_files.is_empty() {
        parser::load_page_directory(&config.pages_dir)?
    } else {
        args.page_files
            .iter()
            .map(|p| parser::load_page(p))
            .collect::<Result<Vec<_>>>()?
    };
    anyhow::ensure!(
        !pages.is_empty(),
        "no pages found in {}",
        config.pages_dir.display()
    );

    for page in &pages {
        for warning in parser::validate_page(page, config.expected_per_page) {
            if let Some(line) = warning.line {
                tracing::warn!(page = %page.id, line, "{}", warning.message);
            }
        }
    }

    let engine = DrillEngine::new(DrillEngineConfig::from(&config));
    let mut sink = CsvRecordLog::new(&config.record_file);
    let mut stopwatch = SystemStopwatch::default();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut console = Console {
        input: &mut input,
        output: &mut output,
    };

    engine.run(&pages, &mut console, &mut stopwatch, &mut sink)?;

    Ok(())
}
