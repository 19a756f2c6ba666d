//! Facebook post extraction from public listing pages.
//!
//! Works off the classic `userContentWrapper` feed markup. Every field of
//! a post is derived independently and defensively: a wrapper that lost
//! its content block still yields a post (without a caption), and a
//! wrapper that cannot be read at all drops only itself from the batch.
//! Logo URLs come straight from the Graph API picture endpoint, so no
//! fetch is needed for them.
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
//! let posts = Facebook::new(client).latest_posts("somepage", 5).await;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{ElementRef, Html};

use super::Scraper;
use crate::dom;
use crate::http_client::Fetcher;
use crate::model::{
    aspect_ratio_or_default, Attachment, AttachmentType, ImageSize, PageInfo, Post, ProviderInfo,
    DEFAULT_POST_ASPECT_RATIO,
};
use crate::path::clean_path;

const BASE_URL: &str = "https://facebook.com";

/// Class marking one post's outermost container in the feed.
const POST_CONTAINER_CLASS: &str = "userContentWrapper";
/// Class of the block holding the post text.
const CONTENT_CLASS: &str = "userContent";
/// Class of the scaled-image wrapper around feed photos.
const IMAGE_CONTAINER_CLASS: &str = "uiScaledImageContainer";
/// Substring of the `id` attribute on the subtitle element that carries
/// the post id and the permalink anchor.
const SUBTITLE_ID_MARKER: &str = "feed_subtitle";
/// Attribute with the publish time in epoch seconds.
const TIMESTAMP_ATTR: &str = "data-utime";
/// Attribute with a video's aspect ratio.
const VIDEO_RATIO_ATTR: &str = "data-original-aspect-ratio";

/// Facebook provider over the public posts listing.
pub struct Facebook {
    client: Arc<dyn Fetcher>,
}

impl Facebook {
    pub fn new(client: Arc<dyn Fetcher>) -> Self {
        Self { client }
    }

    /// Graph API picture URL for a page; no fetch required.
    fn picture_url(path: &str, size: ImageSize) -> String {
        let kind = match size {
            ImageSize::Small => "small",
            ImageSize::Medium => "normal",
            ImageSize::Large => "large",
        };
        format!("https://graph.facebook.com/{path}/picture?type={kind}")
    }

    fn picture_map(path: &str) -> std::collections::BTreeMap<ImageSize, Attachment> {
        ImageSize::ALL
            .iter()
            .map(|&size| (size, Attachment::image(Self::picture_url(path, size))))
            .collect()
    }
}

#[async_trait]
impl Scraper for Facebook {
    fn name(&self) -> &'static str {
        "facebook"
    }

    fn base_url(&self) -> &'static str {
        BASE_URL
    }

    async fn latest_posts(&self, path: &str, limit: usize) -> Vec<Post> {
        let path = clean_path(path);
        let url = format!("{BASE_URL}/{path}/posts");

        let Some(doc) = self.client.fetch_document(&url).await else {
            tracing::debug!(url = %url, "listing unavailable");
            return Vec::new();
        };

        posts_from_listing(&doc, limit)
    }

    async fn page_info(&self, path: &str) -> Option<PageInfo> {
        let path = clean_path(path);
        let doc = self
            .client
            .fetch_document(&format!("{BASE_URL}/{path}"))
            .await?;

        let nick = dom::meta_content(&doc, "og:title").unwrap_or_else(|| path.clone());

        Some(PageInfo {
            nick,
            avatars: Self::picture_map(&path),
        })
    }

    async fn page_logo_url(&self, path: &str, size: ImageSize) -> Option<String> {
        Some(Self::picture_url(&clean_path(path), size))
    }

    async fn provider_info(&self) -> Option<ProviderInfo> {
        Some(ProviderInfo {
            name: self.name().to_string(),
            logo: Self::picture_map("facebook"),
        })
    }
}

/// Up to `limit` posts from a listing document, in document order. This is
/// the only place the limit is enforced.
fn posts_from_listing(doc: &Html, limit: usize) -> Vec<Post> {
    dom::elements_by_class(doc.root_element(), POST_CONTAINER_CLASS)
        .into_iter()
        .take(limit)
        .map(post_from_container)
        .collect()
}

fn post_from_container(container: ElementRef<'_>) -> Post {
    Post {
        id: container_id(container),
        caption: container_caption(container),
        publish_timestamp: container_published_at(container),
        media: container_attachments(container),
    }
}

/// Post id from the subtitle element's own `id`, e.g.
/// `feed_subtitle;12345;0` becomes `12345`. Empty string when the marker
/// is gone.
fn container_id(container: ElementRef<'_>) -> String {
    dom::first_by_attr_containing(container, "id", SUBTITLE_ID_MARKER)
        .and_then(|el| el.value().attr("id"))
        .map(|id| delimited_segment(id).to_string())
        .unwrap_or_default()
}

/// Segment between the first and second `;`. Missing delimiters leave the
/// remaining input untouched.
fn delimited_segment(raw: &str) -> &str {
    let after = raw.split_once(';').map_or(raw, |(_, rest)| rest);
    after.split_once(';').map_or(after, |(segment, _)| segment)
}

fn container_caption(container: ElementRef<'_>) -> Option<String> {
    dom::first_by_class(container, CONTENT_CLASS)
        .and_then(|content| dom::first_by_tag(content, "p"))
        .map(dom::text_of)
}

fn container_published_at(container: ElementRef<'_>) -> Option<i64> {
    dom::first_by_attr(container, TIMESTAMP_ATTR)
        .and_then(|el| el.value().attr(TIMESTAMP_ATTR))
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(|seconds| seconds * 1000)
}

/// A post carries at most one attachment: its video if it has one, else
/// its scaled image, else nothing (text-only posts are valid).
fn container_attachments(container: ElementRef<'_>) -> Vec<Attachment> {
    if let Some(video) = dom::first_by_tag(container, "video") {
        return video_attachment(container, video).into_iter().collect();
    }

    dom::first_by_class(container, IMAGE_CONTAINER_CLASS)
        .and_then(|wrapper| dom::first_by_tag(wrapper, "img"))
        .and_then(image_attachment)
        .into_iter()
        .collect()
}

/// Video URL comes from the permalink anchor inside the subtitle element;
/// without that anchor there is no resolvable URL and no attachment.
fn video_attachment(container: ElementRef<'_>, video: ElementRef<'_>) -> Option<Attachment> {
    let url = dom::first_by_attr_containing(container, "id", SUBTITLE_ID_MARKER)
        .and_then(|subtitle| dom::first_by_tag(subtitle, "a"))
        .and_then(|anchor| anchor.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| format!("{BASE_URL}{href}"))?;

    let aspect_ratio = video
        .value()
        .attr(VIDEO_RATIO_ATTR)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|ratio| *ratio > 0.0 && ratio.is_finite())
        .unwrap_or(DEFAULT_POST_ASPECT_RATIO);

    Some(Attachment {
        kind: AttachmentType::Video,
        url,
        aspect_ratio,
    })
}

fn image_attachment(img: ElementRef<'_>) -> Option<Attachment> {
    let url = img
        .value()
        .attr("src")
        .filter(|src| !src.is_empty())?
        .to_string();

    let width = img.value().attr("width").and_then(|v| v.parse::<f64>().ok());
    let height = img
        .value()
        .attr("height")
        .and_then(|v| v.parse::<f64>().ok());

    Some(Attachment {
        kind: AttachmentType::Image,
        url,
        aspect_ratio: aspect_ratio_or_default(width, height),
    })
}
