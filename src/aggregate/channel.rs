//! Channel upload aggregation.

use super::collect_playlist_videos;
use crate::error::{Result, YtError};
use crate::youtube::models::RawChannel;
use crate::youtube::records::truncate_description;
use crate::youtube::{list, IdKind, IdentifierReference, Params, VideoRecord, YoutubeApi};
use serde::Serialize;
use tracing::{info, instrument};

/// Client-side sort applied to a channel's uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoOrder {
    /// Most viewed first.
    ViewCount,
    /// Newest first.
    Date,
    /// Most liked first.
    Rating,
    /// Upload playlist order, unchanged.
    Unsorted,
}

impl VideoOrder {
    pub fn parse(order: &str) -> Self {
        match order {
            "viewCount" => VideoOrder::ViewCount,
            "date" => VideoOrder::Date,
            "rating" | "likeCount" => VideoOrder::Rating,
            _ => VideoOrder::Unsorted,
        }
    }

    /// Stable descending sort of the whole list.
    pub fn sort(self, videos: &mut [VideoRecord]) {
        match self {
            VideoOrder::ViewCount => videos.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
            // ISO-8601 timestamps sort chronologically as strings
            VideoOrder::Date => videos.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
            VideoOrder::Rating => videos.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
            VideoOrder::Unsorted => {}
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVideosResult {
    pub channel_id: String,
    pub channel_title: String,
    pub channel_description: String,
    /// `null` when the channel hides it.
    pub subscriber_count: Option<u64>,
    pub video_count: u64,
    pub order: String,
    #[serde(rename = "total_returned")]
    pub total_returned: usize,
    pub videos: Vec<VideoRecord>,
}

/// Look up a channel ID by handle.
async fn channel_id_for_handle(api: &dyn YoutubeApi, handle: &str) -> Result<String> {
    let mut params = Params::new();
    params.insert("part", "id,snippet".to_string());
    params.insert("forHandle", handle.to_string());

    let page = list::<RawChannel>(api, "channels", &params).await?;
    page.items
        .into_iter()
        .map(|channel| channel.id)
        .find(|id| !id.is_empty())
        .ok_or_else(|| YtError::NotFound(format!("Channel not found for handle: {}", handle)))
}

/// Fetch a channel's uploads, sort them by `order` and keep the first `max`.
#[instrument(skip(api))]
pub async fn get_channel_videos(
    api: &dyn YoutubeApi,
    channel_input: &str,
    order: &str,
    max: usize,
) -> Result<ChannelVideosResult> {
    let reference = IdentifierReference::channel(channel_input)?;
    let channel_id = match reference.kind {
        IdKind::ChannelHandle => channel_id_for_handle(api, &reference.value).await?,
        _ => reference.value,
    };
    info!("Resolved channel ID: {}", channel_id);

    let mut params = Params::new();
    params.insert("part", "contentDetails,snippet,statistics".to_string());
    params.insert("id", channel_id.clone());

    let channel = list::<RawChannel>(api, "channels", &params)
        .await?
        .items
        .into_iter()
        .next()
        .ok_or_else(|| YtError::NotFound(format!("Channel not found: {}", channel_id)))?;

    let uploads = channel
        .content_details
        .related_playlists
        .uploads
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            YtError::NotFound(format!("Channel {} has no uploads playlist", channel_id))
        })?;

    info!("Getting videos from uploads playlist: {}", uploads);
    let mut videos = collect_playlist_videos(api, &uploads, max).await?;
    VideoOrder::parse(order).sort(&mut videos);
    videos.truncate(max);

    info!("Fetched {} videos from channel {}", videos.len(), channel_id);

    Ok(ChannelVideosResult {
        channel_id,
        channel_title: channel.snippet.title,
        channel_description: truncate_description(&channel.snippet.description),
        subscriber_count: channel.statistics.visible_subscriber_count(),
        video_count: channel.statistics.video_count,
        order: order.to_string(),
        total_returned: videos.len(),
        videos,
    })
}
