use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use newsagg_cli::display::{render_articles, QUERY_DISPLAY_LIMIT};
use newsagg_cli::logging::init_logging;
use newsagg_cli::Pipeline;
use newsagg_core::{ArticleFilter, Result};
use newsagg_export::ExportFormat;
use newsagg_sources::{SourceManager, SourceOptions};
use newsagg_storage::{create_storage, StorageKind, DEFAULT_DB_PATH};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "News aggregator: fetch, query and export headlines", long_about = None)]
pub struct Cli {
    /// Path of the article database
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,
    /// Storage backend
    #[arg(long, global = true, value_enum, default_value_t = StorageKind::Sqlite)]
    storage: StorageKind,
    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 20)]
    timeout: u64,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Filter by source name (case-insensitive substring)
    #[arg(long)]
    source: Option<String>,
    /// Filter by keyword in title or description
    #[arg(long)]
    keyword: Option<String>,
    /// Filter by date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl From<FilterArgs> for ArticleFilter {
    fn from(args: FilterArgs) -> Self {
        ArticleFilter {
            source: args.source,
            keyword: args.keyword,
            date: args.date,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch articles from all sources, deduplicate and store them
    Fetch {
        /// NewsAPI key; NewsAPI is skipped without one
        #[arg(long)]
        api_key: Option<String>,
        /// Search term passed to NewsAPI
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Query stored articles
    Query {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Export stored articles to a file
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file; defaults to news_export_<timestamp>.<ext>
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = create_storage(cli.storage, &cli.db).await?;
    let pipeline = Pipeline::new(store);

    match cli.command {
        Commands::Fetch { api_key, keyword } => {
            println!("Fetching news articles...");
            let options = SourceOptions {
                api_key,
                keyword,
                timeout: Duration::from_secs(cli.timeout),
            };
            let sources = SourceManager::with_defaults(&options)?;
            info!(sources = ?sources.names(), "Sources initialized");

            let report = pipeline.ingest(&sources).await?;
            println!("Found {} unique articles", report.unique);
            println!("Stored {} new articles", report.stored);
        }
        Commands::Query { filter } => {
            println!("Querying articles...");
            let articles = pipeline.query(&filter.into()).await?;
            print!("{}", render_articles(&articles, QUERY_DISPLAY_LIMIT));
        }
        Commands::Export {
            filter,
            format,
            output,
        } => {
            println!("Exporting articles...");
            let report = pipeline.export(&filter.into(), format, output).await?;
            if report.written == 0 {
                println!("No articles to export");
            } else {
                println!(
                    "Exported {} articles to {}",
                    report.written,
                    report.path.display()
                );
            }
        }
    }

    Ok(())
}
