//! CLI command implementations

use clap::Subcommand;
use freereel_archive::client::{ArchiveOrgClient, ArchiveProvider};
use freereel_archive::types::{ArchiveItem, CatalogEntry, RenditionOption, ResolvedStream};
use freereel_archive::StreamPipeline;
use freereel_core::config::FreereelConfig;
use freereel_core::playback::{
    DemoFallbackRenderer, DemoPrimaryRenderer, FallbackSignal, PlaybackSession, PrimarySignal,
};
use freereel_core::{FreereelError, Result};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the archive's movie collection
    Search {
        /// Free-text query; empty browses the whole collection
        query: String,
        /// Maximum number of results; defaults to the configured row cap
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List featured movies from curated collections
    Featured {
        /// Maximum number of results; defaults to the configured row cap
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Resolve a catalog title to a playable stream
    Resolve {
        /// Movie title as the catalog records it
        title: String,
        /// Release date text, e.g. "1968-10-01"
        #[arg(short, long)]
        release_date: Option<String>,
    },
    /// Resolve a title and walk the playback session to a final state
    Play {
        /// Movie title as the catalog records it
        title: String,
        /// Release date text, e.g. "1968-10-01"
        #[arg(long)]
        release_date: Option<String>,
        /// Simulate a primary renderer failure to exercise the fallback
        #[arg(long)]
        simulate_failure: bool,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> Result<()> {
    let config = FreereelConfig::from_env()?;

    match command {
        Commands::Search { query, limit } => {
            let limit = limit.unwrap_or(config.archive.search_rows);
            search_movies(&config, &query, limit).await
        }
        Commands::Featured { rows } => {
            let rows = rows.unwrap_or(config.archive.featured_rows);
            list_featured(&config, rows).await
        }
        Commands::Resolve {
            title,
            release_date,
        } => resolve_title(&config, title, release_date).await,
        Commands::Play {
            title,
            release_date,
            simulate_failure,
        } => play_title(&config, title, release_date, simulate_failure).await,
    }
}

/// Search the archive's movie collection
async fn search_movies(config: &FreereelConfig, query: &str, limit: usize) -> Result<()> {
    let client = ArchiveOrgClient::with_config(&config.archive);
    let items = client
        .search(query, limit)
        .await
        .map_err(FreereelError::from_resolution_error)?;

    if items.is_empty() {
        println!("No results for '{query}'.");
        return Ok(());
    }

    println!("Archive Movies");
    println!("{:-<60}", "");
    for item in &items {
        println!("{}", item_summary(item));
    }

    Ok(())
}

/// List featured movies from the curated collections
async fn list_featured(config: &FreereelConfig, rows: usize) -> Result<()> {
    let client = ArchiveOrgClient::with_config(&config.archive);
    let items = client
        .featured(rows)
        .await
        .map_err(FreereelError::from_resolution_error)?;

    println!("Featured Movies");
    println!("{:-<60}", "");
    for item in &items {
        println!("{}", item_summary(item));
    }

    Ok(())
}

/// Resolve a catalog title to a primary URL and quality alternatives
async fn resolve_title(
    config: &FreereelConfig,
    title: String,
    release_date: Option<String>,
) -> Result<()> {
    let stream = resolve_stream(config, &title, release_date).await?;
    print_stream(&title, &stream);
    Ok(())
}

/// Resolve a title and drive a playback session to its final state
async fn play_title(
    config: &FreereelConfig,
    title: String,
    release_date: Option<String>,
    simulate_failure: bool,
) -> Result<()> {
    let stream = resolve_stream(config, &title, release_date).await?;

    let Some(url) = stream.primary_url else {
        println!("'{title}' is not available for free streaming.");
        return Ok(());
    };

    println!("Playing: {url}");

    let mut session = PlaybackSession::start(
        url,
        Box::new(DemoPrimaryRenderer::new()),
        Box::new(DemoFallbackRenderer::new(config.playback.clone())),
    )
    .await?;
    println!("State: {}", session.state());

    session.on_primary_signal(PrimarySignal::LoadStart).await?;

    if simulate_failure {
        session
            .on_primary_signal(PrimarySignal::LoadError(
                "simulated decode failure".to_string(),
            ))
            .await?;
        println!(
            "State: {} (error: {})",
            session.state(),
            session.last_error().unwrap_or("none")
        );

        session.on_fallback_signal(FallbackSignal::LoadStart);
        session.on_fallback_signal(FallbackSignal::LoadEnd);
    } else {
        session.on_primary_signal(PrimarySignal::LoadSuccess).await?;
    }

    println!("State: {}", session.state());
    if session.fallback_active() {
        println!("Playback recovered through the fallback player.");
    }

    Ok(())
}

async fn resolve_stream(
    config: &FreereelConfig,
    title: &str,
    release_date: Option<String>,
) -> Result<ResolvedStream> {
    let pipeline = StreamPipeline::new(&config.archive);
    let entry = CatalogEntry::new(title, release_date);

    pipeline
        .resolve(&entry)
        .await
        .map_err(FreereelError::from_resolution_error)
}

fn print_stream(title: &str, stream: &ResolvedStream) {
    match &stream.primary_url {
        Some(url) => {
            println!("Primary stream for '{title}':");
            println!("  {url}");
        }
        None => {
            println!("'{title}' is not available for free streaming.");
            return;
        }
    }

    if !stream.options.is_empty() {
        println!("\nAvailable renditions:");
        for option in &stream.options {
            println!("{}", option_summary(option));
        }
    }
}

/// One-line listing entry for a search result
fn item_summary(item: &ArchiveItem) -> String {
    let year = item.year.as_deref().unwrap_or("----");
    let downloads = item
        .downloads
        .map(|count| format!("{count} downloads"))
        .unwrap_or_else(|| "downloads unknown".to_string());
    let size = item
        .size_label()
        .map(|label| format!("  {label}"))
        .unwrap_or_default();
    format!(
        "{year}  {:<40}  {downloads}{size}  [{}]",
        item.title, item.identifier
    )
}

/// One-line listing entry for a rendition option
fn option_summary(option: &RenditionOption) -> String {
    let format = if option.format.is_empty() {
        "unknown format"
    } else {
        option.format.as_str()
    };
    format!(
        "  {:<8} {:<12} {}  ({})",
        option.quality.to_string(),
        format,
        option.name,
        option.size_label
    )
}
