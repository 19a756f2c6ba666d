//! `magpie` CLI - run providers against public pages from the terminal

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use magpie::{Fetcher, HttpClient, ImageSize, Scraper, ScraperSet};

#[derive(Parser)]
#[command(name = "magpie")]
#[command(about = "Extract normalized posts and page metadata from public social-media pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest posts of a page
    Posts {
        /// Provider name, e.g. facebook or 9gag
        provider: String,

        /// Page identifier on the provider
        path: String,

        /// Maximum number of posts
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Fetch page metadata (nick + avatars)
    Page {
        /// Provider name, e.g. facebook or 9gag
        provider: String,

        /// Page identifier on the provider
        path: String,
    },

    /// Show metadata about the provider site itself
    Provider {
        /// Provider name, e.g. facebook or 9gag
        provider: String,
    },

    /// Resolve a page's logo/avatar URL
    Logo {
        /// Provider name, e.g. facebook or 9gag
        provider: String,

        /// Page identifier on the provider
        path: String,

        /// Requested image size (a hint, not a guarantee)
        #[arg(short, long, default_value = "medium", value_parser = ["small", "medium", "large"])]
        size: String,
    },

    /// Fetch the latest posts of a page from every provider concurrently
    All {
        /// Page identifier to try on each provider
        path: String,

        /// Maximum number of posts per provider
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let client: Arc<dyn Fetcher> = Arc::new(HttpClient::new()?);
    let scrapers = ScraperSet::with_default_providers(client);

    match cli.command {
        Commands::Posts {
            provider,
            path,
            limit,
        } => {
            let scraper = resolve(&scrapers, &provider)?;
            let posts = scraper.latest_posts(&path, limit).await;
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }

        Commands::Page { provider, path } => {
            let scraper = resolve(&scrapers, &provider)?;
            match scraper.page_info(&path).await {
                Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
                None => bail!("page '{path}' could not be resolved"),
            }
        }

        Commands::Provider { provider } => {
            let scraper = resolve(&scrapers, &provider)?;
            match scraper.provider_info().await {
                Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
                None => bail!("provider metadata unavailable"),
            }
        }

        Commands::Logo {
            provider,
            path,
            size,
        } => {
            let scraper = resolve(&scrapers, &provider)?;
            match scraper.page_logo_url(&path, parse_size(&size)).await {
                Some(url) => println!("{url}"),
                None => bail!("no logo available for '{path}'"),
            }
        }

        Commands::All { path, limit } => {
            let results: BTreeMap<_, _> = scrapers
                .latest_posts_all(&path, limit)
                .await
                .into_iter()
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

fn resolve<'a>(scrapers: &'a ScraperSet, name: &str) -> Result<&'a dyn Scraper> {
    scrapers.get(name).ok_or_else(|| {
        anyhow!(
            "unknown provider '{}' (available: {})",
            name,
            scrapers.names().join(", ")
        )
    })
}

fn parse_size(raw: &str) -> ImageSize {
    match raw {
        "small" => ImageSize::Small,
        "large" => ImageSize::Large,
        // clap restricts the value; anything else already failed parsing
        _ => ImageSize::Medium,
    }
}
