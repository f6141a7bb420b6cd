//! Video search, trending chart and single-video lookup.
//!
//! Results keep the order the API returns them in.

use super::pager::{Paginator, PAGE_SIZE};
use super::{fetch_videos, search_page, SearchKind, VIDEO_PARTS};
use crate::error::{Result, YtError};
use crate::youtube::models::RawVideo;
use crate::youtube::{list, IdentifierReference, Params, VideoRecord, YoutubeApi};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
pub struct SearchVideosResult {
    pub query: String,
    pub order: String,
    pub total_returned: usize,
    pub videos: Vec<VideoRecord>,
}

#[derive(Debug, Serialize)]
pub struct TrendingVideosResult {
    pub region: String,
    pub category: String,
    pub total_returned: usize,
    pub videos: Vec<VideoRecord>,
}

/// Search videos, then fetch full details for each page of hits.
#[instrument(skip(api))]
pub async fn search_videos(
    api: &dyn YoutubeApi,
    query: &str,
    order: &str,
    max: usize,
) -> Result<SearchVideosResult> {
    if query.trim().is_empty() {
        return Err(YtError::InvalidInput("Search query is empty.".to_string()));
    }

    let mut params = Params::new();
    params.insert("q", query.to_string());
    params.insert("order", order.to_string());

    let mut pager = Paginator::new(max, PAGE_SIZE);
    let mut videos = Vec::new();

    while let Some(request) = pager.next_request() {
        request.apply(&mut params);
        let page = search_page(api, &params, SearchKind::Video).await?;
        if !page.ids.is_empty() {
            videos.extend(fetch_videos(api, &page.ids).await?);
        }
        pager.advance(videos.len(), page.next_page_token);
    }
    videos.truncate(max);

    info!("Found {} videos for {:?}", videos.len(), query);

    Ok(SearchVideosResult {
        query: query.to_string(),
        order: order.to_string(),
        total_returned: videos.len(),
        videos,
    })
}

/// Most popular videos in a region, optionally within one category.
///
/// Category `"0"` means all categories.
#[instrument(skip(api))]
pub async fn get_trending_videos(
    api: &dyn YoutubeApi,
    region: &str,
    category: &str,
    max: usize,
) -> Result<TrendingVideosResult> {
    let region = region.trim().to_uppercase();
    let category = category.trim();

    let mut params = Params::new();
    params.insert("part", VIDEO_PARTS.to_string());
    params.insert("chart", "mostPopular".to_string());
    params.insert("regionCode", region.clone());
    if !category.is_empty() && category != "0" {
        params.insert("videoCategoryId", category.to_string());
    }

    let mut pager = Paginator::new(max, PAGE_SIZE);
    let mut videos: Vec<VideoRecord> = Vec::new();

    while let Some(request) = pager.next_request() {
        request.apply(&mut params);
        let page = list::<RawVideo>(api, "videos", &params).await?;
        videos.extend(page.items.into_iter().map(VideoRecord::from));
        pager.advance(videos.len(), page.next_page_token);
    }
    videos.truncate(max);

    info!("Fetched {} trending videos for {}", videos.len(), region);

    Ok(TrendingVideosResult {
        region,
        category: category.to_string(),
        total_returned: videos.len(),
        videos,
    })
}

/// Full details for one video.
#[instrument(skip(api))]
pub async fn get_video_details(api: &dyn YoutubeApi, video_url: &str) -> Result<VideoRecord> {
    let video_id = IdentifierReference::video(video_url)?.value;

    let mut params = Params::new();
    params.insert("part", format!("{},status", VIDEO_PARTS));
    params.insert("id", video_id.clone());

    let video = list::<RawVideo>(api, "videos", &params)
        .await?
        .items
        .into_iter()
        .next()
        .map(VideoRecord::from)
        .ok_or_else(|| YtError::NotFound(format!("Video not found: {}", video_id)))?;

    info!("Fetched video details for: {}", video.title);
    Ok(video)
}
