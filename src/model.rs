//! Normalized entities produced by provider extraction.
//!
//! Everything here is a plain value object: no identity beyond field
//! equality, no back-references, no mutation after construction. Optional
//! fields are skipped during serialization so JSON output never carries
//! explicit nulls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aspect ratio assumed for feed media when the source markup does not
/// carry usable dimensions.
pub const DEFAULT_POST_ASPECT_RATIO: f64 = 4.0 / 3.0;

/// Aspect ratio assumed for avatars and provider logos.
pub const DEFAULT_LOGO_ASPECT_RATIO: f64 = 1.0;

/// A single post extracted from a provider's listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Provider-local identifier. Defaults to an empty string when the
    /// source markup carries no usable marker; never absent.
    pub id: String,

    /// Post text, when the source exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Publish time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_timestamp: Option<i64>,

    /// Media attached to the post, in source order. Empty for text-only
    /// posts.
    #[serde(default)]
    pub media: Vec<Attachment>,
}

/// Kind of media an [`Attachment`] points at.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentType {
    Image,
    Video,
    Gif,
}

/// A single piece of media: direct URL plus display hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentType,

    /// Direct media URL. Providers never emit attachments with a blank
    /// URL; a post whose media URL cannot be resolved simply has no
    /// attachment.
    pub url: String,

    /// Width divided by height. Always positive and finite.
    pub aspect_ratio: f64,
}

impl Attachment {
    /// Image attachment with the square logo/avatar ratio.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: AttachmentType::Image,
            url: url.into(),
            aspect_ratio: DEFAULT_LOGO_ASPECT_RATIO,
        }
    }
}

/// Requested logo/avatar size. A hint only -- providers map it to whatever
/// size tokens the source site actually supports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageSize {
    Small,
    Medium,
    Large,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Small, ImageSize::Medium, ImageSize::Large];
}

/// Metadata about one page (user, group, channel) on a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Display identifier of the page.
    pub nick: String,

    /// Avatar per requested size. Empty only on total extraction failure.
    pub avatars: BTreeMap<ImageSize, Attachment>,
}

/// Metadata about the provider site itself, independent of any page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,

    /// Site logo per requested size. Empty only on total extraction
    /// failure.
    pub logo: BTreeMap<ImageSize, Attachment>,
}

/// Compute `width / height`, falling back to the feed default when either
/// side is missing, non-positive, or not finite. Never returns zero,
/// negative, NaN, or infinity.
pub fn aspect_ratio_or_default(width: Option<f64>, height: Option<f64>) -> f64 {
    match (width, height) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite() => w / h,
        _ => DEFAULT_POST_ASPECT_RATIO,
    }
}
