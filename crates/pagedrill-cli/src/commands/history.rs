//! The `pagedrill history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use pagedrill_core::config::load_config_from;
use pagedrill_report::csv_log::{read_records, DATE_FORMAT};
use pagedrill_report::history::compute_history_stats;

pub fn execute(record: Option<PathBuf>, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = record.unwrap_or(config.record_file);

    let records = if path.exists() {
        read_records(&path)?
    } else {
        Vec::new()
    };
    let stats = compute_history_stats(&records);

    match format.as_str() {
        "json" => {
            let doc = serde_json::json!({
                "records": records,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        "text" => {
            if records.is_empty() {
                println!("No records yet in {}", path.display());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Page", "Correct", "Incorrect", "Fast", "Date"]);
            for r in &records {
                table.add_row(vec![
                    Cell::new(&r.page_id),
                    Cell::new(r.correct),
                    Cell::new(r.incorrect),
                    Cell::new(r.fast),
                    Cell::new(r.date.format(DATE_FORMAT)),
                ]);
            }
            println!("{table}");

            println!(
                "\n{} session(s), {} correct, {} incorrect, {} fast ({:.1} correct per session)",
                stats.sessions,
                stats.total_correct,
                stats.total_incorrect,
                stats.total_fast,
                stats.avg_correct
            );
            if let Some(best) = &stats.best {
                println!(
                    "Best: {} with {} correct on {}",
                    best.page_id,
                    best.correct,
                    best.date.format(DATE_FORMAT)
                );
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
