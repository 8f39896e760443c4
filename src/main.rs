use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use kidtube::catalog::{CatalogProvider, FileCatalogProvider, HttpCatalogProvider};
use kidtube::utils::Config;
use kidtube::{SelectionModel, CATEGORY_ALL};
use log::info;
use std::path::PathBuf;

/// KidTube catalog browser - fetch and inspect the curated video catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog endpoint URL (overrides the configured one)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Read the catalog from a local JSON file instead of HTTP
    #[arg(short, long, value_name = "FILE", conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Show only videos of this category
    #[arg(short, long, value_name = "CATEGORY")]
    category: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(url) = args.url {
        config.catalog.url = url;
    }

    // Initialize logging
    let log_level = if args.debug {
        "debug"
    } else {
        &config.general.log_level
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting KidTube v{}", env!("CARGO_PKG_VERSION"));

    // Fetch the catalog
    let catalog = match &args.file {
        Some(path) => FileCatalogProvider::new(path).fetch()?,
        None => HttpCatalogProvider::new(&config.catalog).fetch()?,
    };

    let mut selection = SelectionModel::new(catalog);
    if let Some(category) = &args.category {
        selection.select_category(category);
    }

    // Category summary
    println!("Categories:");
    for category in selection.catalog().categories() {
        let marker = if category == selection.active_category() {
            "*"
        } else {
            " "
        };
        println!(
            " {} {} ({})",
            marker,
            category,
            selection.catalog().category_count(&category)
        );
    }

    // Filtered listing
    let heading = if selection.active_category() == CATEGORY_ALL {
        "All Videos".to_string()
    } else {
        format!("{} Videos", selection.active_category())
    };
    println!("\n{}:", heading);

    let filtered = selection.filtered_videos();
    if filtered.is_empty() {
        println!("  No videos found in this category.");
        return Ok(());
    }

    for video in &filtered {
        let active = selection.active_video_id() == Some(video.id.as_str());
        let marker = if active { ">" } else { " " };
        println!(" {} [{}] {} ({})", marker, video.id, video.title, video.category);
    }

    Ok(())
}
