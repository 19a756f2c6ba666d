//! Site-specific providers behind one extraction contract.
//!
//! Each platform gets its own [`Scraper`] implementation that knows that
//! site's markup or embedded-payload quirks; the contract and the entities
//! it returns are identical across providers. Providers are chosen by the
//! consumer (by name, via [`ScraperSet`]), never by runtime type
//! inspection.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use magpie::http_client::{Fetcher, HttpClient};
//! use magpie::provider::{facebook::Facebook, Scraper};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client: Arc<dyn Fetcher> = Arc::new(HttpClient::new()?);
//! let facebook = Facebook::new(client);
//!
//! for post in facebook.latest_posts("somepage", 10).await {
//!     println!("{} {:?}", post.id, post.caption);
//! }
//! # Ok(())
//! # }
//! ```

pub mod facebook;
pub mod ninegag;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::http_client::Fetcher;
use crate::model::{Attachment, ImageSize, PageInfo, Post, ProviderInfo};

/// Contract every provider implements.
///
/// All extraction methods degrade rather than fail: an unreachable site or
/// reshuffled markup produces an empty list or `None`, never an error. Any
/// intermediate traversal step is treated as optional; only the per-post
/// container lookup is load-bearing, and a container that cannot be read
/// excludes that one post, not the batch.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Short provider key, e.g. "facebook".
    fn name(&self) -> &'static str;

    /// The site's canonical origin.
    fn base_url(&self) -> &'static str;

    /// Up to `limit` posts from the page's listing, in source order.
    /// Empty when the page has no extractable posts or the fetch fails.
    async fn latest_posts(&self, path: &str, limit: usize) -> Vec<Post>;

    /// Page metadata, or `None` when the page cannot be resolved.
    async fn page_info(&self, path: &str) -> Option<PageInfo>;

    /// Direct logo/avatar URL for a page. Built without a fetch where the
    /// site supports it, otherwise fetch-and-extract. `size` is a hint.
    async fn page_logo_url(&self, path: &str, size: ImageSize) -> Option<String>;

    /// Metadata about the site itself. The default serves the site
    /// favicon for every size; providers with a richer source override it.
    async fn provider_info(&self) -> Option<ProviderInfo> {
        let url = format!("{}/favicon.ico", self.base_url());
        let logo = ImageSize::ALL
            .iter()
            .map(|&size| (size, Attachment::image(url.clone())))
            .collect();
        Some(ProviderInfo {
            name: self.name().to_string(),
            logo,
        })
    }
}

/// A registry of providers plus concurrent fan-out over all of them.
///
/// Providers are looked up by [`Scraper::name`]. Fan-out awaits every
/// provider before returning; one provider degrading to an empty result
/// never affects the others, and no ordering is guaranteed across
/// providers.
pub struct ScraperSet {
    scrapers: Vec<Box<dyn Scraper>>,
}

impl ScraperSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scrapers: Vec::new(),
        }
    }

    /// Create a set with every built-in provider wired to `client`.
    #[must_use]
    pub fn with_default_providers(client: Arc<dyn Fetcher>) -> Self {
        let mut set = Self::new();
        set.register(Box::new(facebook::Facebook::new(Arc::clone(&client))));
        set.register(Box::new(ninegag::Ninegag::new(client)));
        set
    }

    /// Add a provider to the set.
    pub fn register(&mut self, scraper: Box<dyn Scraper>) {
        self.scrapers.push(scraper);
    }

    /// Look a provider up by its name key.
    pub fn get(&self, name: &str) -> Option<&dyn Scraper> {
        self.scrapers
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// Names of all registered providers, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.scrapers.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.scrapers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrapers.is_empty()
    }

    /// Run `latest_posts` on every provider concurrently and await all
    /// results.
    pub async fn latest_posts_all(
        &self,
        path: &str,
        limit: usize,
    ) -> Vec<(&'static str, Vec<Post>)> {
        let fetches = self
            .scrapers
            .iter()
            .map(|s| async move { (s.name(), s.latest_posts(path, limit).await) });
        join_all(fetches).await
    }
}

impl Default for ScraperSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedScraper {
        name: &'static str,
        posts: Vec<Post>,
    }

    #[async_trait]
    impl Scraper for CannedScraper {
        fn name(&self) -> &'static str {
            self.name
        }

        fn base_url(&self) -> &'static str {
            "https://example.com"
        }

        async fn latest_posts(&self, _path: &str, limit: usize) -> Vec<Post> {
            self.posts.iter().take(limit).cloned().collect()
        }

        async fn page_info(&self, _path: &str) -> Option<PageInfo> {
            None
        }

        async fn page_logo_url(&self, _path: &str, _size: ImageSize) -> Option<String> {
            None
        }
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            caption: None,
            publish_timestamp: None,
            media: Vec::new(),
        }
    }

    #[test]
    fn get_resolves_registered_names() {
        let mut set = ScraperSet::new();
        set.register(Box::new(CannedScraper {
            name: "canned",
            posts: Vec::new(),
        }));

        assert!(set.get("canned").is_some());
        assert!(set.get("unknown").is_none());
        assert_eq!(set.names(), vec!["canned"]);
    }

    #[tokio::test]
    async fn default_provider_info_serves_favicon_for_all_sizes() {
        let scraper = CannedScraper {
            name: "canned",
            posts: Vec::new(),
        };

        let info = scraper.provider_info().await.unwrap();
        assert_eq!(info.name, "canned");
        assert_eq!(info.logo.len(), ImageSize::ALL.len());
        for attachment in info.logo.values() {
            assert_eq!(attachment.url, "https://example.com/favicon.ico");
        }
    }

    #[tokio::test]
    async fn fan_out_awaits_every_provider() {
        let mut set = ScraperSet::new();
        set.register(Box::new(CannedScraper {
            name: "first",
            posts: vec![post("a"), post("b"), post("c")],
        }));
        set.register(Box::new(CannedScraper {
            name: "second",
            posts: Vec::new(),
        }));

        let results = set.latest_posts_all("whatever", 2).await;
        assert_eq!(results.len(), 2);

        let (name, posts) = &results[0];
        assert_eq!(*name, "first");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a");

        // An empty neighbour does not disturb the other provider.
        let (name, posts) = &results[1];
        assert_eq!(*name, "second");
        assert!(posts.is_empty());
    }

    #[test]
    fn default_set_registers_builtin_providers() {
        use crate::http_client::HttpClient;

        let client: Arc<dyn Fetcher> = Arc::new(HttpClient::new().unwrap());
        let set = ScraperSet::with_default_providers(client);
        assert_eq!(set.names(), vec!["facebook", "9gag"]);
    }
}
