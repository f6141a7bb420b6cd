//! Normalized output records.
//!
//! These are the shapes returned to callers. Conversions from the raw
//! models are total: missing upstream data becomes a default value.

use super::models::{RawChannel, RawComment, RawPlaylist, RawVideo};
use serde::Serialize;
use serde_json::{Map, Value};

/// Maximum length of description fields in list contexts.
pub const DESCRIPTION_LIMIT: usize = 200;

/// First [`DESCRIPTION_LIMIT`] characters of `text`.
pub fn truncate_description(text: &str) -> String {
    text.chars().take(DESCRIPTION_LIMIT).collect()
}

/// A video with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: String,
    pub description: String,
    pub thumbnails: Map<String, Value>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: Option<String>,
    pub tags: Vec<String>,
}

impl From<RawVideo> for VideoRecord {
    fn from(raw: RawVideo) -> Self {
        let RawVideo {
            id,
            snippet,
            statistics,
            content_details,
        } = raw;

        Self {
            video_id: id,
            description: truncate_description(&snippet.description),
            title: snippet.title,
            channel_title: snippet.channel_title,
            channel_id: snippet.channel_id,
            published_at: snippet.published_at,
            thumbnails: snippet.thumbnails,
            view_count: statistics.view_count,
            like_count: statistics.like_count,
            comment_count: statistics.comment_count,
            duration: content_details.duration,
            tags: snippet.tags,
        }
    }
}

/// A top-level comment or a reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: String,
    /// ID of the top-level comment; `None` for top-level comments.
    pub parent_id: Option<String>,
    pub author: String,
    pub published_at: String,
    pub like_count: u64,
    pub text: String,
}

impl CommentRecord {
    pub fn from_raw(raw: RawComment, parent_id: Option<String>) -> Self {
        let snippet = raw.snippet;
        let text = snippet
            .text_original
            .filter(|t| !t.is_empty())
            .or(snippet.text_display)
            .unwrap_or_default();

        Self {
            id: raw.id,
            parent_id,
            author: snippet.author_display_name,
            published_at: snippet.published_at,
            like_count: snippet.like_count,
            text,
        }
    }
}

/// A channel presented as an artist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Map<String, Value>,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
    pub country: Option<String>,
    pub published_at: String,
}

impl From<RawChannel> for ArtistRecord {
    fn from(raw: RawChannel) -> Self {
        let RawChannel {
            id,
            snippet,
            statistics,
            ..
        } = raw;

        Self {
            channel_id: id,
            description: truncate_description(&snippet.description),
            title: snippet.title,
            thumbnails: snippet.thumbnails,
            subscriber_count: statistics.subscriber_count,
            video_count: statistics.video_count,
            view_count: statistics.view_count,
            country: snippet.country,
            published_at: snippet.published_at,
        }
    }
}

/// A playlist. `privacy_status` and `url` are only set by some tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    pub playlist_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub channel_id: String,
    pub thumbnails: Map<String, Value>,
    pub video_count: u64,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PlaylistRecord {
    fn build(raw: RawPlaylist, description: String, privacy_status: Option<String>) -> Self {
        let RawPlaylist {
            id,
            snippet,
            content_details,
            ..
        } = raw;

        Self {
            playlist_id: id,
            title: snippet.title,
            description,
            channel_title: snippet.channel_title,
            channel_id: snippet.channel_id,
            thumbnails: snippet.thumbnails,
            video_count: content_details.item_count,
            published_at: snippet.published_at,
            privacy_status,
            url: None,
        }
    }

    /// List form: truncated description, no status.
    pub fn summary(raw: RawPlaylist) -> Self {
        let description = truncate_description(&raw.snippet.description);
        Self::build(raw, description, None)
    }

    /// Single-playlist form: full description and privacy status.
    pub fn detail(raw: RawPlaylist) -> Self {
        let description = raw.snippet.description.clone();
        let privacy_status = raw.status.privacy_status.clone();
        Self::build(raw, description, privacy_status)
    }

    /// Attach the canonical playlist URL.
    pub fn with_url(mut self) -> Self {
        self.url = Some(playlist_url(&self.playlist_id));
        self
    }
}

/// Canonical web URL of a playlist.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}
