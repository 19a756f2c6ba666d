//! 9GAG post extraction from the state payload embedded in listing pages.
//!
//! The listing ships its data as an escaped JSON string inside a
//! `JSON.parse("...")` call in an inline script. Extraction peels that
//! string out, decodes the backslash escapes with [`crate::text::unescape`],
//! and walks the resulting JSON defensively. A payload with malformed
//! escapes counts as an extraction miss for the whole listing: logged,
//! never propagated.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use serde_json::Value;

use super::Scraper;
use crate::dom;
use crate::http_client::Fetcher;
use crate::model::{
    aspect_ratio_or_default, Attachment, AttachmentType, ImageSize, PageInfo, Post,
};
use crate::path::clean_path;
use crate::text::unescape;

const BASE_URL: &str = "https://9gag.com";

/// Marker distinguishing the state script from the rest of the page.
const CONFIG_MARKER: &str = "window._config";
const PAYLOAD_PREFIX: &str = "JSON.parse(\"";
const PAYLOAD_SUFFIX: &str = "\")";

/// Key of the video rendition inside a post's `images` object.
const VIDEO_IMAGE_KEY: &str = "image460sv";
/// Key of the still rendition.
const STILL_IMAGE_KEY: &str = "image700";

/// 9GAG provider over the embedded listing payload.
pub struct Ninegag {
    client: Arc<dyn Fetcher>,
}

impl Ninegag {
    pub fn new(client: Arc<dyn Fetcher>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Scraper for Ninegag {
    fn name(&self) -> &'static str {
        "9gag"
    }

    fn base_url(&self) -> &'static str {
        BASE_URL
    }

    async fn latest_posts(&self, path: &str, limit: usize) -> Vec<Post> {
        let path = clean_path(path);
        let url = format!("{BASE_URL}/{path}");

        let Some(doc) = self.client.fetch_document(&url).await else {
            tracing::debug!(url = %url, "listing unavailable");
            return Vec::new();
        };

        let Some(config) = embedded_config(&doc) else {
            return Vec::new();
        };
        posts_from_config(&config, limit)
    }

    /// A resolved page without an `og:image` still yields page info; the
    /// empty avatars map signals that avatar extraction failed outright.
    async fn page_info(&self, path: &str) -> Option<PageInfo> {
        let path = clean_path(path);
        let doc = self
            .client
            .fetch_document(&format!("{BASE_URL}/{path}"))
            .await?;

        let nick = dom::meta_content(&doc, "og:title").unwrap_or_else(|| path.clone());
        let avatars = dom::meta_content(&doc, "og:image")
            .map(|url| {
                ImageSize::ALL
                    .iter()
                    .map(|&size| (size, Attachment::image(url.clone())))
                    .collect()
            })
            .unwrap_or_default();

        Some(PageInfo { nick, avatars })
    }

    /// The site serves a single avatar size; the hint is accepted and
    /// ignored.
    async fn page_logo_url(&self, path: &str, _size: ImageSize) -> Option<String> {
        let path = clean_path(path);
        let doc = self
            .client
            .fetch_document(&format!("{BASE_URL}/{path}"))
            .await?;
        dom::meta_content(&doc, "og:image")
    }
}

/// Locate, decode, and parse the embedded state payload.
fn embedded_config(doc: &Html) -> Option<Value> {
    let script = dom::elements_by_tag(doc.root_element(), "script")
        .into_iter()
        .map(dom::text_of)
        .find(|text| text.contains(CONFIG_MARKER))?;

    let payload = escaped_payload(&script)?;
    let decoded = match unescape(payload) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(error = %e, "state payload has malformed escapes");
            return None;
        }
    };

    serde_json::from_str(&decoded).ok()
}

/// The escaped string handed to `JSON.parse("...")`.
fn escaped_payload(script: &str) -> Option<&str> {
    let start = script.find(PAYLOAD_PREFIX)? + PAYLOAD_PREFIX.len();
    let rest = &script[start..];
    let end = rest.find(PAYLOAD_SUFFIX)?;
    Some(&rest[..end])
}

fn posts_from_config(config: &Value, limit: usize) -> Vec<Post> {
    config
        .get("data")
        .and_then(|data| data.get("posts"))
        .and_then(Value::as_array)
        .map(|posts| posts.iter().take(limit).map(post_from_node).collect())
        .unwrap_or_default()
}

fn post_from_node(node: &Value) -> Post {
    Post {
        id: node
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        caption: node
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string),
        publish_timestamp: node
            .get("creationTs")
            .and_then(Value::as_i64)
            .map(|seconds| seconds * 1000),
        media: node
            .get("images")
            .map(attachments_from_images)
            .unwrap_or_default(),
    }
}

/// Video rendition wins over the still; a post with neither is text-only.
fn attachments_from_images(images: &Value) -> Vec<Attachment> {
    if let Some(video) = images.get(VIDEO_IMAGE_KEY).filter(|v| v.is_object()) {
        return media_attachment(video, AttachmentType::Video)
            .into_iter()
            .collect();
    }

    images
        .get(STILL_IMAGE_KEY)
        .filter(|v| v.is_object())
        .and_then(|image| media_attachment(image, AttachmentType::Image))
        .into_iter()
        .collect()
}

fn media_attachment(node: &Value, kind: AttachmentType) -> Option<Attachment> {
    let url = node
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())?
        .to_string();

    let width = node.get("width").and_then(Value::as_f64);
    let height = node.get("height").and_then(Value::as_f64);

    Some(Attachment {
        kind,
        url,
        aspect_ratio: aspect_ratio_or_default(width, height),
    })
}
