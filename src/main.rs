use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use catalog_scraper::cache::{DevCache, FsCache};
use catalog_scraper::catalog::CatalogScraper;
use catalog_scraper::config::Config;
use catalog_scraper::logging::init_logging;

#[derive(Parser)]
#[command(name = "catalog_scraper")]
#[command(about = "Academic term discovery and subject aggregation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover terms on a registration page and fetch each term's subjects
    Discover {
        /// URL of the dynamic schedule / registration page
        url: String,
        /// Memoize the whole run on disk (development only)
        #[arg(long)]
        dev_cache: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    match cli.command {
        Commands::Discover {
            url,
            dev_cache,
            pretty,
        } => {
            let cache: Option<Arc<dyn DevCache>> = if dev_cache || config.cache.enabled {
                Some(Arc::new(FsCache::new(config.cache.dir.clone())))
            } else {
                None
            };

            let scraper = CatalogScraper::from_config(&config, cache);
            let records = scraper.scrape_terms(&url).await?;
            info!(count = records.len(), "scrape complete");

            let output = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{output}");
        }
    }

    Ok(())
}
