//! Tool catalog and the call boundary.
//!
//! Every tool call ends here as a single string: the JSON result envelope on
//! success, `ERROR: <kind>: <message>` on any failure.

use super::protocol::Tool;
use crate::aggregate;
use crate::config::Limits;
use crate::error::{Result, YtError};
use crate::youtube::YoutubeApi;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{error, info};

// === Arguments ===

#[derive(Debug, Deserialize)]
struct CommentsArgs {
    #[serde(rename = "videoUrl")]
    video_url: String,
    #[serde(default = "default_relevance")]
    order: String,
    max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ChannelVideosArgs {
    #[serde(rename = "channelInput")]
    channel_input: String,
    #[serde(default = "default_view_count")]
    order: String,
    max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    order: Option<String>,
    max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TrendingArgs {
    #[serde(default = "default_region")]
    region: String,
    #[serde(default = "default_category")]
    category: String,
    max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct VideoArgs {
    #[serde(rename = "videoUrl")]
    video_url: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistArgs {
    #[serde(rename = "playlistUrl")]
    playlist_url: String,
    max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct PlaylistDetailsArgs {
    #[serde(rename = "playlistUrl")]
    playlist_url: String,
    max_videos: Option<usize>,
}

fn default_relevance() -> String {
    "relevance".to_string()
}

fn default_view_count() -> String {
    "viewCount".to_string()
}

fn default_region() -> String {
    "IN".to_string()
}

fn default_category() -> String {
    "0".to_string()
}

// === Catalog ===

fn tool(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn cap_schema(description: &str, default: usize, limits: &Limits) -> Value {
    json!({
        "type": "integer",
        "description": description,
        "minimum": 0,
        "maximum": limits.max_cap,
        "default": default
    })
}

/// All nine tools, with defaults taken from `limits`.
pub fn definitions(limits: &Limits) -> Vec<Tool> {
    vec![
        tool(
            "fetch_comments",
            "Fetch comments for a YouTube video, top-level comments followed by their replies. \
             Replies carry the parentId of their top-level comment.",
            json!({
                "type": "object",
                "properties": {
                    "videoUrl": { "type": "string", "description": "Video URL or 11-character video ID" },
                    "order": {
                        "type": "string",
                        "enum": ["relevance", "time"],
                        "default": "relevance"
                    },
                    "max": cap_schema("Maximum number of comments", limits.comments, limits)
                },
                "required": ["videoUrl"]
            }),
        ),
        tool(
            "get_channel_videos",
            "List a channel's uploads with statistics, sorted by views, date or likes.",
            json!({
                "type": "object",
                "properties": {
                    "channelInput": {
                        "type": "string",
                        "description": "Channel URL, @handle or channel ID"
                    },
                    "order": {
                        "type": "string",
                        "enum": ["viewCount", "date", "rating"],
                        "default": "viewCount"
                    },
                    "max": cap_schema("Maximum number of videos", limits.channel_videos, limits)
                },
                "required": ["channelInput"]
            }),
        ),
        tool(
            "search_videos",
            "Search YouTube videos and return full video details in search order.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" },
                    "order": {
                        "type": "string",
                        "enum": ["viewCount", "relevance", "date", "rating", "title"],
                        "default": "viewCount"
                    },
                    "max": cap_schema("Maximum number of videos", limits.search_videos, limits)
                },
                "required": ["query"]
            }),
        ),
        tool(
            "get_trending_videos",
            "Most popular videos in a region, optionally within one video category.",
            json!({
                "type": "object",
                "properties": {
                    "region": {
                        "type": "string",
                        "description": "ISO 3166-1 alpha-2 region code",
                        "default": "IN"
                    },
                    "category": {
                        "type": "string",
                        "description": "Video category ID, \"0\" for all categories",
                        "default": "0"
                    },
                    "max": cap_schema("Maximum number of videos", limits.trending_videos, limits)
                }
            }),
        ),
        tool(
            "get_video_details",
            "Full details and statistics for a single video.",
            json!({
                "type": "object",
                "properties": {
                    "videoUrl": { "type": "string", "description": "Video URL or 11-character video ID" }
                },
                "required": ["videoUrl"]
            }),
        ),
        tool(
            "get_trending_playlists",
            "Most viewed playlists in a region.",
            json!({
                "type": "object",
                "properties": {
                    "region": {
                        "type": "string",
                        "description": "ISO 3166-1 alpha-2 region code",
                        "default": "IN"
                    },
                    "max": cap_schema("Maximum number of playlists", limits.trending_playlists, limits)
                }
            }),
        ),
        tool(
            "get_playlist_artists",
            "Distinct channels whose videos appear in a playlist, most subscribed first.",
            json!({
                "type": "object",
                "properties": {
                    "playlistUrl": { "type": "string", "description": "Playlist URL or playlist ID" },
                    "max": cap_schema("Maximum number of artists", limits.playlist_artists, limits)
                },
                "required": ["playlistUrl"]
            }),
        ),
        tool(
            "get_playlist_details",
            "Playlist metadata plus its videos in playlist order.",
            json!({
                "type": "object",
                "properties": {
                    "playlistUrl": { "type": "string", "description": "Playlist URL or playlist ID" },
                    "max_videos": cap_schema("Maximum number of videos", limits.playlist_videos, limits)
                },
                "required": ["playlistUrl"]
            }),
        ),
        tool(
            "search_playlists",
            "Search YouTube playlists. Each result includes its playlist URL.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" },
                    "max": cap_schema("Maximum number of playlists", limits.search_playlists, limits),
                    "order": {
                        "type": "string",
                        "enum": ["relevance", "viewCount", "date", "rating", "title", "videoCount"],
                        "default": "relevance"
                    }
                },
                "required": ["query"]
            }),
        ),
    ]
}

// === Call boundary ===

/// Run one tool and return its string payload. Never fails.
pub async fn call_tool(
    api: &dyn YoutubeApi,
    limits: &Limits,
    name: &str,
    args: Option<Value>,
) -> String {
    match dispatch(api, limits, name, args).await {
        Ok(payload) => {
            info!("{} returned {} bytes", name, payload.len());
            payload
        }
        Err(e) => render_error(name, &e),
    }
}

/// Format an error as a tool payload.
pub fn render_error(tool: &str, err: &YtError) -> String {
    error!("{} failed: {}", tool, err);
    format!("ERROR: {}: {}", err.kind(), err)
}

fn decode<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| YtError::InvalidInput(format!("Invalid arguments for {}: {}", tool, e)))
}

fn to_payload<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

async fn dispatch(
    api: &dyn YoutubeApi,
    limits: &Limits,
    name: &str,
    args: Option<Value>,
) -> Result<String> {
    let args = match args {
        Some(Value::Null) | None => Value::Object(Map::new()),
        Some(args) => args,
    };
    let cap = |requested: Option<usize>, default: usize| limits.clamp(requested.unwrap_or(default));

    match name {
        "fetch_comments" => {
            let a: CommentsArgs = decode(name, args)?;
            let max = cap(a.max, limits.comments);
            to_payload(&aggregate::fetch_comments(api, &a.video_url, &a.order, max).await?)
        }
        "get_channel_videos" => {
            let a: ChannelVideosArgs = decode(name, args)?;
            let max = cap(a.max, limits.channel_videos);
            to_payload(&aggregate::get_channel_videos(api, &a.channel_input, &a.order, max).await?)
        }
        "search_videos" => {
            let a: SearchArgs = decode(name, args)?;
            let order = a.order.unwrap_or_else(default_view_count);
            let max = cap(a.max, limits.search_videos);
            to_payload(&aggregate::search_videos(api, &a.query, &order, max).await?)
        }
        "get_trending_videos" => {
            let a: TrendingArgs = decode(name, args)?;
            let max = cap(a.max, limits.trending_videos);
            to_payload(&aggregate::get_trending_videos(api, &a.region, &a.category, max).await?)
        }
        "get_video_details" => {
            let a: VideoArgs = decode(name, args)?;
            to_payload(&aggregate::get_video_details(api, &a.video_url).await?)
        }
        "get_trending_playlists" => {
            let a: TrendingArgs = decode(name, args)?;
            let max = cap(a.max, limits.trending_playlists);
            to_payload(&aggregate::get_trending_playlists(api, &a.region, max).await?)
        }
        "get_playlist_artists" => {
            let a: PlaylistArgs = decode(name, args)?;
            let max = cap(a.max, limits.playlist_artists);
            to_payload(&aggregate::get_playlist_artists(api, &a.playlist_url, max).await?)
        }
        "get_playlist_details" => {
            let a: PlaylistDetailsArgs = decode(name, args)?;
            let max = cap(a.max_videos, limits.playlist_videos);
            to_payload(&aggregate::get_playlist_details(api, &a.playlist_url, max).await?)
        }
        "search_playlists" => {
            let a: SearchArgs = decode(name, args)?;
            let order = a.order.unwrap_or_else(default_relevance);
            let max = cap(a.max, limits.search_playlists);
            to_payload(&aggregate::search_playlists(api, &a.query, max, &order).await?)
        }
        _ => Err(YtError::InvalidInput(format!("Unknown tool: {}", name))),
    }
}
