use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use elexon::{
    DuckDbSink, Elexon, ElexonConfig, LogSink, ParquetSink, TableSink, DEFAULT_BASE_URL,
};
use std::env;
use std::path::PathBuf;

/// Ingest temperature, generation per type and initial demand outturn from
/// the Elexon BMRS API into one consolidated table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Start date (format: YYYY-MM-DD)
    #[arg(long = "from")]
    from: NaiveDate,

    /// End date (format: YYYY-MM-DD)
    #[arg(long = "to")]
    to: NaiveDate,

    /// API key for authentication
    #[arg(long = "key", env = "ELEXON_API_KEY")]
    key: String,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory to store the consolidated table in as `elexon.parquet`
    #[arg(long)]
    output: Option<PathBuf>,

    /// DuckDB database file to store the consolidated table in, as table `elexon`
    #[arg(long)]
    database: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Environment changes must happen before the runtime spawns its workers.
    env_logger::init();
    configure_polars_display();
    let args = Args::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?
        .block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = ElexonConfig::builder()
        .start(args.from)
        .end(args.to)
        .api_key(args.key)
        .base_url(args.base_url)
        .build();
    let client = Elexon::new(config).context("Invalid configuration")?;

    let parquet = args.output.map(ParquetSink::new);
    let database = args.database.map(DuckDbSink::new);
    let mut sinks: Vec<&dyn TableSink> = vec![&LogSink];
    if let Some(parquet) = &parquet {
        sinks.push(parquet);
    }
    if let Some(database) = &database {
        sinks.push(database);
    }

    client
        .run(&sinks)
        .await
        .context("Failed to consolidate Elexon data")?;
    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
