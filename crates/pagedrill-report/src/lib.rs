//! pagedrill-report — Persistence and summaries of page results.

pub mod csv_log;
pub mod history;
