use anyhow::Result;
use clap::{CommandFactory, Parser};
use ocw_oer_export::{
    config::{DEFAULT_CSV_PATH, DEFAULT_SNAPSHOT_PATH},
    create_csv, create_json, Config, DataSource,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export MIT OpenCourseWare course metadata to the OER CSV template"
)]
struct Args {
    /// Create the OER CSV file
    #[arg(long, alias = "create_csv")]
    create_csv: bool,
    /// Fetch all courses from the API and save them as a JSON snapshot
    #[arg(long, alias = "create_json", conflicts_with = "create_csv")]
    create_json: bool,
    /// Data source for CSV creation: `api` or `json`
    #[arg(long, default_value = "api")]
    source: DataSource,
    /// Snapshot to read when the source is `json`
    #[arg(long, default_value = DEFAULT_SNAPSHOT_PATH)]
    input: PathBuf,
    /// Output file (defaults depend on the action)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) parse args + config ──────────────────────────────────────
    let args = Args::parse();
    let config = Config::from_env();

    // ─── 3) run the requested action ─────────────────────────────────
    if args.create_csv {
        let output = args.output.unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));
        let rows = create_csv(&config, args.source, &args.input, &output)?;
        info!(rows, path = %output.display(), "export finished");
    } else if args.create_json {
        let output = args
            .output
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        let records = create_json(&config, &output)?;
        info!(records, path = %output.display(), "data saved");
    } else {
        Args::command().print_help()?;
    }

    Ok(())
}
