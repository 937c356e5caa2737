mod analysis;
mod conditions;
mod report;

use analysis::run_analysis;
use clap::{Parser, ValueEnum};
use conditions::{load_conditions, DrawingConditions};
use report::render_summary;
use std::error::Error;
use std::path::PathBuf;

/// Output formats supported by the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Human-readable report.
    Text,
    /// Machine-readable summary for spreadsheet or chart tooling.
    Json,
}

/// Fit a flow-stress model and check wire drawing passes.
#[derive(Parser, Debug)]
#[command(name = "drawx", version)]
struct Args {
    /// JSON file with sample columns, pass settings and sweep reductions.
    /// The built-in demonstration data is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence.
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    drawx::logging::init(&args.log_level);

    // Input provider: either the user's export or the demonstration data.
    let conditions = match &args.config {
        Some(path) => load_conditions(path)?,
        None => DrawingConditions::default(),
    };

    let summary = run_analysis(&conditions);

    match args.format {
        Format::Text => println!("{}", render_summary(&summary)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
