//! The `pagedrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("pagedrill.toml").exists() {
        println!("pagedrill.toml already exists, skipping.");
    } else {
        std::fs::write("pagedrill.toml", SAMPLE_CONFIG)?;
        println!("Created pagedrill.toml");
    }

    std::fs::create_dir_all("pages")?;
    let example_path = std::path::Path::new("pages/page-01.txt");
    if example_path.exists() {
        println!("pages/page-01.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PAGE)?;
        println!("Created pages/page-01.txt");
    }

    println!("\nNext steps:");
    println!("  1. Add more pages under pages/ (one \"<int> <op> <int>\" per line)");
    println!("  2. Run: pagedrill validate");
    println!("  3. Run: pagedrill run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pagedrill configuration

pages_dir = "pages"
record_file = "record.csv"

# Typed at the prompt to start each page
ready_token = "yes"

# Answers given within this many seconds of the page start count as fast
fast_window_secs = 120

# A full page holds this many operations; the log records
# expected_per_page - correct as the incorrect count
expected_per_page = 60

# "abort" stops the run on a non-numeric answer, "reprompt" asks again
input_policy = "abort"
"#;

const EXAMPLE_PAGE: &str = "\
12 + 7
9 - 14
6 x 8
56 / 7
";
