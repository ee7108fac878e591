//! pagedrill CLI — arithmetic drills from page files, scored into a CSV log.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pagedrill", version, about = "Timed arithmetic drills with a CSV score log")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a drill over every page
    Run {
        /// Directory of page files (default: from config, else "pages")
        #[arg(long)]
        pages: Option<PathBuf>,

        /// Run only these page files, in the order given
        #[arg(long = "page")]
        page_files: Vec<PathBuf>,

        /// CSV log to append results to (default: from config, else "record.csv")
        #[arg(long)]
        record: Option<PathBuf>,

        /// Fast-solve window in seconds, measured from the start of each page
        #[arg(long)]
        fast_window: Option<u64>,

        /// Operations a full page is assumed to hold
        #[arg(long)]
        expected: Option<u32>,

        /// Ask again instead of aborting when an answer is not a number
        #[arg(long)]
        reprompt: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check page files for lines that cannot be scored
    Validate {
        /// Directory of page files
        #[arg(long)]
        pages: Option<PathBuf>,

        /// A single page file
        #[arg(long = "page", conflicts_with = "pages")]
        page_file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show logged results
    History {
        /// CSV log to read
        #[arg(long)]
        record: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and an example page
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            pages,
            page_files,
            record,
            fast_window,
            expected,
            reprompt,
            config,
        } => commands::run::execute(commands::run::RunArgs {
            pages,
            page_files,
            record,
            fast_window,
            expected,
            reprompt,
            config,
        }),
        Commands::Validate {
            pages,
            page_file,
            config,
        } => commands::validate::execute(pages, page_file, config),
        Commands::History {
            record,
            format,
            config,
        } => commands::history::execute(record, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
