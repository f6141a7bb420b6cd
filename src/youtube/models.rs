//! Raw Data API response shapes.
//!
//! Every field is optional on the wire; missing and `null` fields decode to
//! their defaults here so the rest of the crate never inspects raw JSON.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One page of any `*.list` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new", deserialize_with = "or_default")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Treat an explicit `null` like a missing field.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts arrive as decimal strings (`"12345"`); accept numbers too.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Snippet fields shared by videos, channels and playlists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snippet {
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub channel_id: String,
    #[serde(deserialize_with = "or_default")]
    pub channel_title: String,
    #[serde(deserialize_with = "or_default")]
    pub published_at: String,
    #[serde(deserialize_with = "or_default")]
    pub thumbnails: Map<String, Value>,
    #[serde(deserialize_with = "or_default")]
    pub tags: Vec<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Statistics {
    #[serde(deserialize_with = "count")]
    pub view_count: u64,
    #[serde(deserialize_with = "count")]
    pub like_count: u64,
    #[serde(deserialize_with = "count")]
    pub comment_count: u64,
    #[serde(deserialize_with = "count")]
    pub subscriber_count: u64,
    #[serde(deserialize_with = "count")]
    pub video_count: u64,
    #[serde(deserialize_with = "or_default")]
    pub hidden_subscriber_count: bool,
}

impl Statistics {
    /// Subscriber count, unless the channel hides it.
    pub fn visible_subscriber_count(&self) -> Option<u64> {
        (!self.hidden_subscriber_count).then_some(self.subscriber_count)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    pub privacy_status: Option<String>,
}

// === Videos ===

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoContentDetails {
    pub duration: Option<String>,
}

/// An item of `videos.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawVideo {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub snippet: Snippet,
    #[serde(deserialize_with = "or_default")]
    pub statistics: Statistics,
    #[serde(deserialize_with = "or_default")]
    pub content_details: VideoContentDetails,
}

// === Comments ===

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(deserialize_with = "or_default")]
    pub author_display_name: String,
    #[serde(deserialize_with = "or_default")]
    pub published_at: String,
    #[serde(deserialize_with = "count")]
    pub like_count: u64,
    pub text_original: Option<String>,
    pub text_display: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawComment {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreadSnippet {
    pub top_level_comment: Option<RawComment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThreadReplies {
    #[serde(deserialize_with = "or_default")]
    pub comments: Vec<RawComment>,
}

/// An item of `commentThreads.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCommentThread {
    #[serde(deserialize_with = "or_default")]
    pub snippet: ThreadSnippet,
    #[serde(deserialize_with = "or_default")]
    pub replies: ThreadReplies,
}

// === Channels ===

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelContentDetails {
    #[serde(deserialize_with = "or_default")]
    pub related_playlists: RelatedPlaylists,
}

/// An item of `channels.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawChannel {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub snippet: Snippet,
    #[serde(deserialize_with = "or_default")]
    pub statistics: Statistics,
    #[serde(deserialize_with = "or_default")]
    pub content_details: ChannelContentDetails,
}

// === Playlists ===

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    #[serde(deserialize_with = "count")]
    pub item_count: u64,
}

/// An item of `playlists.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPlaylist {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    pub snippet: Snippet,
    #[serde(deserialize_with = "or_default")]
    pub content_details: PlaylistContentDetails,
    #[serde(deserialize_with = "or_default")]
    pub status: Status,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(deserialize_with = "or_default")]
    pub resource_id: ResourceId,
    pub video_owner_channel_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: Option<String>,
}

/// An item of `playlistItems.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPlaylistItem {
    #[serde(deserialize_with = "or_default")]
    pub snippet: PlaylistItemSnippet,
    #[serde(deserialize_with = "or_default")]
    pub content_details: PlaylistItemContentDetails,
}

impl RawPlaylistItem {
    /// ID of the video this item points at.
    pub fn video_id(&self) -> Option<&str> {
        self.content_details
            .video_id
            .as_deref()
            .or(self.snippet.resource_id.video_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Channel that owns the video (absent for deleted or private videos).
    pub fn owner_channel_id(&self) -> Option<&str> {
        self.snippet
            .video_owner_channel_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

// === Search ===

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchId {
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
}

/// An item of `search.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchResult {
    #[serde(deserialize_with = "or_default")]
    pub id: SearchId,
}
