use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, warn};

use route_enricher::config::PipelineConfig;
use route_enricher::logging;
use route_enricher::observability::metrics;
use route_enricher::pipeline::{Pipeline, RunSummary};

#[derive(Parser)]
#[command(name = "route_enricher")]
#[command(about = "Flight route enrichment pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich one explicit input file of staged base routes
    Enrich {
        /// JSON Lines file of base route records
        input: PathBuf,
        /// Directory to write the enriched output into
        #[arg(long)]
        output_dir: Option<String>,
    },
    /// Discover the newest staged file in the incoming directory, enrich it,
    /// and archive the input
    Run {
        /// Directory scanned for staged route files
        #[arg(long)]
        incoming_dir: Option<String>,
        /// Directory processed inputs are moved into
        #[arg(long)]
        processed_dir: Option<String>,
        /// Directory to write the enriched output into
        #[arg(long)]
        output_dir: Option<String>,
    },
}

fn print_summary(summary: &RunSummary) {
    println!("\n📊 Enrichment run {}:", summary.run_id);
    println!("   Input: {}", summary.input_file);
    println!("   Total rows: {}", summary.total_rows);
    println!("   Enriched: {}", summary.enriched_rows);
    println!("   Row errors: {}", summary.row_errors.len());
    println!("   Output file: {}", summary.output_file);
    if let Some(archived) = &summary.archived_to {
        println!("   Archived input to: {}", archived);
    }

    if !summary.row_errors.is_empty() {
        warn!(
            "{} rows skipped during the run",
            summary.row_errors.len()
        );
        println!("\n⚠️  Rows skipped:");
        for row_error in &summary.row_errors {
            println!("   - {}", row_error);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging and metrics
    logging::init_logging();
    if let Err(e) = metrics::init() {
        warn!("Metrics disabled: {}", e);
    }

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Enrich { input, output_dir } => {
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
            println!("🔄 Enriching {}...", input.display());

            let pipeline = Pipeline::new(config);
            match pipeline.run_file(&input).await {
                Ok(summary) => print_summary(&summary),
                Err(e) => {
                    error!("Enrichment run failed: {}", e);
                    println!("❌ Enrichment run failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Run {
            incoming_dir,
            processed_dir,
            output_dir,
        } => {
            if let Some(incoming_dir) = incoming_dir {
                config.incoming_dir = incoming_dir;
            }
            if let Some(processed_dir) = processed_dir {
                config.processed_dir = processed_dir;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
            println!("🔄 Scanning {} for staged route files...", config.incoming_dir);

            let pipeline = Pipeline::new(config);
            match pipeline.run_incoming().await {
                Ok(Some(summary)) => {
                    print_summary(&summary);
                    println!("✅ Run completed successfully");
                }
                Ok(None) => {
                    println!("ℹ️  No staged route files found; nothing to do");
                }
                Err(e) => {
                    error!("Run failed: {}", e);
                    println!("❌ Run failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
