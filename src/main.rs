use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use fullstack_docs_mcp::catalog::{corpus_status, outputs::CorpusStatusOutput};
use fullstack_docs_mcp::search::config::DEFAULT_SEARCH_TIMEOUT_SECS;
use fullstack_docs_mcp::search::outputs::SearchDocsOutput;
use fullstack_docs_mcp::util::{OutputFormat, ToolOutput};
use fullstack_docs_mcp::{DocsConfig, FullstackDocsService, SearchEngine, SearchOptions};

/// MCP server for searching offline full-stack technology documentation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Technology catalog (defaults to ~/.fullstack-docs-mcp/technologies.json)
    #[arg(long, env = "FULLSTACK_DOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Base directory for relative documentation paths (defaults to the config file's directory)
    #[arg(long, env = "FULLSTACK_DOCS_ROOT")]
    docs_root: Option<PathBuf>,

    /// Time limit for a single search, in seconds
    #[arg(long, default_value_t = DEFAULT_SEARCH_TIMEOUT_SECS)]
    search_timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single search and print the results
    Search {
        query: String,
        /// Restrict to one technology id
        #[arg(long)]
        technology: Option<String>,
        /// Category folder within the technology
        #[arg(long)]
        category: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Validate the configuration and report the documentation on disk
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing to stderr to avoid conflicts with stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config_path = match args.config {
        Some(path) => path,
        None => DocsConfig::default_path()?,
    };
    let config = DocsConfig::load(&config_path, args.docs_root.as_deref())
        .context("Failed to load technology catalog")?;
    tracing::info!(
        "Loaded {} technologies from {}",
        config.technology_ids().count(),
        config_path.display()
    );

    if let Some(command) = args.command {
        return handle_command(command, config);
    }

    tracing::info!("Starting MCP Fullstack Docs server on stdio...");

    let docs_service = FullstackDocsService::with_timeout(
        config,
        Duration::from_secs(args.search_timeout_secs),
    );

    // Serve using stdio transport
    let service = docs_service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

fn handle_command(command: Commands, config: DocsConfig) -> Result<()> {
    match command {
        Commands::Search {
            query,
            technology,
            category,
            limit,
            json,
        } => {
            let engine = SearchEngine::new(Arc::new(config));
            let options = SearchOptions {
                technology: technology.clone(),
                category: category.clone(),
                limit,
            };
            let results = engine.search(&query, &options);
            let output = SearchDocsOutput {
                query,
                technology,
                category,
                total_results: results.len(),
                results,
            };
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Markdown
            };
            println!("{}", output.render(format));
            Ok(())
        }
        Commands::Check => {
            let output = CorpusStatusOutput::new(corpus_status(&config));
            println!("{}", output.to_markdown());
            if !output.is_complete() {
                process::exit(1);
            }
            Ok(())
        }
    }
}
