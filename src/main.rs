use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use quarry::config::Config;
use quarry::extract::ExtractOptions;
use quarry::metrics::{DifficultyProvider, FileDifficultyProvider, HttpDifficultyProvider};
use quarry::pipeline::DocumentSource;

/// Quarry: keyword mining and topic recommendation for blog content.
///
/// Scores a document's title and body into ranked keywords and turns the
/// winners into ready-to-pitch topic suggestions.
#[derive(Parser)]
#[command(name = "quarry", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Import a local document file as a stored post (or draft)
    Import {
        /// Path to a Markdown/HTML/text file
        file: PathBuf,

        /// Store as a draft (JSON envelope body) instead of a post
        #[arg(long)]
        as_draft: bool,
    },

    /// Extract keywords and topics from a document
    Extract {
        /// Document title (with --body)
        #[arg(long)]
        title: Option<String>,

        /// Document body (with --title)
        #[arg(long)]
        body: Option<String>,

        /// Read title/body from a local file instead
        #[arg(long, conflicts_with_all = ["title", "body"])]
        file: Option<PathBuf>,

        /// Extract a stored post by id
        #[arg(long, conflicts_with_all = ["title", "body", "file"])]
        post: Option<i64>,

        /// Extract a stored draft by id
        #[arg(long, conflicts_with_all = ["title", "body", "file", "post"])]
        draft: Option<i64>,

        /// Max keywords to keep (default: 15)
        #[arg(long)]
        max_keywords: Option<usize>,

        /// Max topics to derive (default: 6)
        #[arg(long)]
        max_topics: Option<usize>,

        /// JSON file with per-keyword difficulty data
        #[arg(long)]
        difficulty_file: Option<PathBuf>,

        /// Print the result as JSON instead of the table view
        #[arg(long)]
        json: bool,

        /// Compute only — skip storing the result
        #[arg(long)]
        no_save: bool,
    },

    /// Extract every file in a list, concurrently
    Batch {
        /// Document files to process
        files: Vec<PathBuf>,

        /// Number of files to process in parallel (default: 8)
        #[arg(long, default_value = "8")]
        concurrency: usize,

        /// JSON file with per-keyword difficulty data
        #[arg(long)]
        difficulty_file: Option<PathBuf>,
    },

    /// List recent extraction runs
    Report {
        /// Max rows to show (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Show one stored extraction in full
    Show {
        /// Extraction id (from `quarry report`)
        id: i64,
    },

    /// Show system status (DB stats, last extraction)
    Status,

    /// Run the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quarry=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Quarry database...");
            let config = Config::load()?;
            let db = quarry::db::initialize(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nQuarry is ready. Try: quarry extract --file post.md");
        }

        Commands::Import { file, as_draft } => {
            let config = Config::load()?;
            let db = quarry::db::open(&config.db_path)?;

            let text = std::fs::read_to_string(&file)?;
            let (title, body) = quarry::pipeline::batch::split_title_body(&text, &file);

            if as_draft {
                let envelope = serde_json::json!({ "content": body, "format": "markdown" });
                let id = db.insert_draft(&title, &envelope.to_string()).await?;
                println!("Imported draft {id}: {title}");
                println!("Extract it with: quarry extract --draft {id}");
            } else {
                let id = db.insert_post(&title, &body).await?;
                println!("Imported post {id}: {title}");
                println!("Extract it with: quarry extract --post {id}");
            }
        }

        Commands::Extract {
            title,
            body,
            file,
            post,
            draft,
            max_keywords,
            max_topics,
            difficulty_file,
            json,
            no_save,
        } => {
            let config = Config::load()?;
            let db = quarry::db::open(&config.db_path)?;
            let provider = build_provider(&config, difficulty_file.as_deref())?;

            let source = if let Some(id) = post {
                DocumentSource::Post(id)
            } else if let Some(id) = draft {
                DocumentSource::Draft(id)
            } else if let Some(path) = file {
                let text = std::fs::read_to_string(&path)?;
                let (title, body) = quarry::pipeline::batch::split_title_body(&text, &path);
                DocumentSource::Inline { title, body }
            } else {
                DocumentSource::Inline {
                    title: title.unwrap_or_default(),
                    body: body.unwrap_or_default(),
                }
            };

            let options = ExtractOptions {
                max_keywords,
                max_topics,
                difficulty: None,
            };

            let outcome = quarry::pipeline::run(
                &db,
                source,
                provider.as_deref(),
                &options,
                config.metrics_timeout(),
                !no_save,
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            } else {
                quarry::output::terminal::display_extraction(&outcome.title, &outcome.result);
                if let Some(id) = outcome.extraction_id {
                    println!("{}", format!("Stored as extraction {id}.").dimmed());
                }
            }
        }

        Commands::Batch {
            files,
            concurrency,
            difficulty_file,
        } => {
            if files.is_empty() {
                anyhow::bail!("No files given. Usage: quarry batch posts/*.md");
            }

            let config = Config::load()?;
            let db = quarry::db::open(&config.db_path)?;
            let provider = build_provider(&config, difficulty_file.as_deref())?;

            println!("Extracting {} files...", files.len());

            let summary = quarry::pipeline::run_batch(
                &db,
                &files,
                provider.as_deref(),
                &ExtractOptions::default(),
                config.metrics_timeout(),
                concurrency,
            )
            .await?;

            println!("\n{}", "Batch complete.".bold());
            println!("  Processed: {}", summary.processed);
            if summary.failed > 0 {
                println!("  {}", format!("Failed: {}", summary.failed).yellow());
            }
        }

        Commands::Report { limit } => {
            let config = Config::load()?;
            let db = quarry::db::open(&config.db_path)?;

            let extractions = db.get_recent_extractions(limit).await?;
            quarry::output::terminal::display_extraction_list(&extractions);
        }

        Commands::Show { id } => {
            let config = Config::load()?;
            let db = quarry::db::open(&config.db_path)?;

            match db.get_extraction(id).await? {
                Some(extraction) => {
                    quarry::output::terminal::display_extraction(
                        &extraction.title,
                        &extraction.result,
                    );
                    println!(
                        "{}",
                        format!(
                            "Source: {} | Enriched: {} | Extracted: {}",
                            extraction.source_kind,
                            if extraction.enriched { "yes" } else { "no" },
                            extraction.extracted_at,
                        )
                        .dimmed()
                    );
                }
                None => {
                    anyhow::bail!("No extraction with id {id}. Run `quarry report` to list them.");
                }
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let db = quarry::db::open(&config.db_path)?;
            quarry::status::show(&db, &config.db_path).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let db = quarry::db::initialize(&config.db_path)?;
            let provider = build_provider(&config, None)?;

            let metrics: Option<std::sync::Arc<dyn DifficultyProvider>> =
                provider.map(std::sync::Arc::from);

            quarry::web::run_server(config, db, metrics, port, &bind).await?;
        }
    }

    Ok(())
}

/// Pick the difficulty provider for this invocation.
///
/// A --difficulty-file argument wins over the configured HTTP service;
/// with neither, enrichment is skipped.
fn build_provider(
    config: &Config,
    difficulty_file: Option<&std::path::Path>,
) -> Result<Option<Box<dyn DifficultyProvider>>> {
    if let Some(path) = difficulty_file {
        let provider = FileDifficultyProvider::load(path)?;
        return Ok(Some(Box::new(provider)));
    }

    if let Some(url) = &config.metrics_url {
        info!(url = %url, "Using keyword-metrics service for enrichment");
        let provider = HttpDifficultyProvider::new(
            url,
            config.metrics_api_key.clone(),
            config.metrics_timeout(),
        )?;
        return Ok(Some(Box::new(provider)));
    }

    Ok(None)
}
