//! The `pagedrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use pagedrill_core::config::load_config_from;
use pagedrill_core::parser;

pub fn execute(
    pages_dir: Option<PathBuf>,
    page_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let pages = match (page_file, pages_dir) {
        (Some(file), _) => vec![parser::load_page(&file)?],
        (None, Some(dir)) => parser::load_page_directory(&dir)?,
        (None, None) => parser::load_page_directory(&config.pages_dir)?,
    };

    let mut total_warnings = 0;

    for page in &pages {
        println!("Page: {} ({} operations)", page.id, page.lines.len());

        let warnings = parser::validate_page(page, config.expected_per_page);
        for w in &warnings {
            let prefix = w
                .line
                .map(|n| format!("  [line {n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All pages valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
