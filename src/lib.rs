//! `magpie` - Public social-media page extraction
//!
//! Fetches public pages and turns their unstable, semi-documented markup
//! into normalized [`model::Post`], [`model::PageInfo`], and
//! [`model::ProviderInfo`] values. One [`provider::Scraper`] contract,
//! site-specific providers behind it, and shared defensive utilities for
//! DOM navigation and escaped-string decoding underneath.
//!
//! Extraction degrades instead of failing: unreachable sites and
//! reshuffled markup produce empty or absent results, never errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use magpie::http_client::{Fetcher, HttpClient};
//! use magpie::provider::{Scraper, ScraperSet};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client: Arc<dyn Fetcher> = Arc::new(HttpClient::new()?);
//!     let scrapers = ScraperSet::with_default_providers(client);
//!
//!     let facebook = scrapers.get("facebook").expect("built-in provider");
//!     for post in facebook.latest_posts("somepage", 10).await {
//!         println!("{} {:?}", post.id, post.caption);
//!     }
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod http_client;
pub mod model;
pub mod path;
pub mod provider;
pub mod text;

pub use http_client::{ClientConfig, Fetcher, HttpClient};
pub use model::{
    Attachment, AttachmentType, ImageSize, PageInfo, Post, ProviderInfo,
};
pub use provider::{Scraper, ScraperSet};
pub use text::{unescape, UnescapeError};

/// Version of magpie
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
