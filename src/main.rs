mod commands;
mod database;
mod error;
mod models;
mod services;
mod utils;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::{Settings, TimeBasis};
use crate::services::summary;

#[derive(Debug, Parser)]
#[command(
    name = "screenflux",
    version,
    about = "Export macOS screen time to JSON and stage it for S3"
)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    extract: ExtractArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read knowledgeC.db, group usage by month and write JSON (default)
    Extract(ExtractArgs),
    /// Relocate an uploaded object from raw/ to processed/
    Rewrite(RewriteArgs),
    /// Print usage totals from an exported JSON document
    Summarize(SummarizeArgs),
}

#[derive(Debug, Default, Args)]
struct ExtractArgs {
    /// Path to knowledgeC.db
    #[arg(long = "db")]
    db_path: Option<PathBuf>,

    /// Directory the JSON files are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Render timestamps in local time or UTC
    #[arg(long)]
    time_basis: Option<TimeBasis>,

    /// Also upload each month to the object store
    #[arg(long)]
    upload: bool,

    #[arg(long)]
    bucket: Option<String>,

    /// Key segment under raw/ for uploaded months
    #[arg(long)]
    source_name: Option<String>,

    /// S3-compatible endpoint URL
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Debug, Args)]
struct RewriteArgs {
    /// Notification JSON file (stdin when omitted)
    #[arg(long)]
    event: Option<PathBuf>,

    /// Use a local directory as the object store
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// S3-compatible endpoint URL
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Debug, Args)]
struct SummarizeArgs {
    /// Combined or monthly JSON document
    #[arg(long, default_value = "./data/all_screen_time_data.json")]
    input: PathBuf,

    /// Number of apps to list
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Leave out apps used for less than this many seconds in total
    #[arg(long, default_value_t = summary::MIN_APP_SECONDS)]
    min_app_seconds: f64,

    /// Also print the timeline of one day (YYYY-MM-DD)
    #[arg(long)]
    day: Option<NaiveDate>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl ExtractArgs {
    fn is_empty(&self) -> bool {
        self.db_path.is_none()
            && self.output_dir.is_none()
            && self.time_basis.is_none()
            && !self.upload
            && self.bucket.is_none()
            && self.source_name.is_none()
            && self.endpoint.is_none()
    }

    /// Options given before the subcommand, overridden by those after it.
    fn merge(self, later: ExtractArgs) -> ExtractArgs {
        ExtractArgs {
            db_path: later.db_path.or(self.db_path),
            output_dir: later.output_dir.or(self.output_dir),
            time_basis: later.time_basis.or(self.time_basis),
            upload: later.upload || self.upload,
            bucket: later.bucket.or(self.bucket),
            source_name: later.source_name.or(self.source_name),
            endpoint: later.endpoint.or(self.endpoint),
        }
    }

    fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.db_path {
            settings.source.db_path = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output.dir = dir.clone();
        }
        if let Some(basis) = self.time_basis {
            settings.source.time_basis = basis;
        }
        if self.upload {
            settings.upload.enabled = true;
        }
        if let Some(bucket) = &self.bucket {
            settings.upload.bucket = bucket.clone();
        }
        if let Some(name) = &self.source_name {
            settings.upload.source_name = name.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            settings.upload.endpoint = Some(endpoint.clone());
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = utils::config::load_settings(cli.config.as_deref())?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Extract(ExtractArgs::default()));

    match command {
        Command::Extract(args) => {
            cli.extract.merge(args).apply(&mut settings);
            commands::extract::run(&settings).await
        }
        _ if !cli.extract.is_empty() => {
            bail!("Extract options such as --db only apply to the extract command")
        }
        Command::Rewrite(args) => {
            let options = commands::rewrite::RewriteOptions {
                event: args.event,
                store_dir: args.store_dir,
                endpoint: args.endpoint.or(settings.upload.endpoint),
            };
            commands::rewrite::run(&options).await.map(|_| ())
        }
        Command::Summarize(args) => {
            commands::summarize::run(&commands::summarize::SummarizeOptions {
                input: args.input,
                top: args.top,
                min_app_seconds: args.min_app_seconds,
                day: args.day,
                json: args.json,
            })
        }
    }
}

#[tokio::main]
async fn main() {
    utils::config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
