//! Paginated aggregators, one per tool.
//!
//! Each aggregator resolves its input, drives a strictly sequential series of
//! upstream calls and returns a typed result envelope. Any error aborts the
//! whole aggregation; partial results are never returned.

pub mod channel;
pub mod comments;
pub mod pager;
pub mod playlists;
pub mod videos;

pub use channel::{get_channel_videos, ChannelVideosResult, VideoOrder};
pub use comments::{fetch_comments, CommentOrder, CommentsResult};
pub use pager::{PageRequest, Paginator};
pub use playlists::{
    get_playlist_artists, get_playlist_details, get_trending_playlists, search_playlists,
    PlaylistArtistsResult, PlaylistDetailsResult, PlaylistsResult,
};
pub use videos::{
    get_trending_videos, get_video_details, search_videos, SearchVideosResult,
    TrendingVideosResult,
};

use crate::error::Result;
use crate::youtube::models::{RawPlaylistItem, RawSearchResult, RawVideo};
use crate::youtube::{list, Params, VideoRecord, YoutubeApi};
use pager::PAGE_SIZE;
use tracing::debug;

/// Parts requested for every full video lookup.
pub(crate) const VIDEO_PARTS: &str = "snippet,statistics,contentDetails";

/// Fetch full records for `ids`, at most [`PAGE_SIZE`] IDs per call.
pub(crate) async fn fetch_videos(api: &dyn YoutubeApi, ids: &[String]) -> Result<Vec<VideoRecord>> {
    let mut videos = Vec::with_capacity(ids.len());

    for batch in ids.chunks(PAGE_SIZE) {
        let mut params = Params::new();
        params.insert("part", VIDEO_PARTS.to_string());
        params.insert("id", batch.join(","));

        let page = list::<RawVideo>(api, "videos", &params).await?;
        videos.extend(page.items.into_iter().map(VideoRecord::from));
    }

    Ok(videos)
}

/// Walk a playlist's items, enriching each page with one video lookup.
///
/// Returns at most `cap` videos in playlist order; the caller truncates.
pub(crate) async fn collect_playlist_videos(
    api: &dyn YoutubeApi,
    playlist_id: &str,
    cap: usize,
) -> Result<Vec<VideoRecord>> {
    let mut params = Params::new();
    params.insert("part", "snippet,contentDetails".to_string());
    params.insert("playlistId", playlist_id.to_string());

    let mut pager = Paginator::new(cap, PAGE_SIZE);
    let mut videos = Vec::new();

    while let Some(request) = pager.next_request() {
        request.apply(&mut params);
        let page = list::<RawPlaylistItem>(api, "playlistItems", &params).await?;

        let ids: Vec<String> = page
            .items
            .iter()
            .filter_map(RawPlaylistItem::video_id)
            .map(str::to_string)
            .collect();

        if !ids.is_empty() {
            videos.extend(fetch_videos(api, &ids).await?);
        }

        debug!(
            "Playlist {} page {}: {} videos so far",
            playlist_id,
            pager.pages() + 1,
            videos.len()
        );
        pager.advance(videos.len(), page.next_page_token);
    }

    Ok(videos)
}

/// What a `search.list` call is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchKind {
    Video,
    Playlist,
}

impl SearchKind {
    fn as_str(self) -> &'static str {
        match self {
            SearchKind::Video => "video",
            SearchKind::Playlist => "playlist",
        }
    }
}

/// IDs from one search page plus its cursor.
pub(crate) struct IdPage {
    pub ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// Run one `search.list` page and keep only IDs of the requested kind.
pub(crate) async fn search_page(
    api: &dyn YoutubeApi,
    params: &Params,
    kind: SearchKind,
) -> Result<IdPage> {
    let mut params = params.clone();
    params.insert("part", "id,snippet".to_string());
    params.insert("type", kind.as_str().to_string());

    let page = list::<RawSearchResult>(api, "search", &params).await?;
    let ids = page
        .items
        .into_iter()
        .filter_map(|item| match kind {
            SearchKind::Video => item.id.video_id,
            SearchKind::Playlist => item.id.playlist_id,
        })
        .filter(|id| !id.is_empty())
        .collect();

    Ok(IdPage {
        ids,
        next_page_token: page.next_page_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::testing::ScriptedApi;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_videos_batches_by_fifty() {
        let ids: Vec<String> = (0..120).map(|i| format!("v{i}")).collect();
        let api = ScriptedApi::new()
            .respond("videos", json!({ "items": [{ "id": "v0" }] }))
            .respond("videos", json!({ "items": [{ "id": "v50" }] }))
            .respond("videos", json!({ "items": [{ "id": "v100" }] }));

        let videos = fetch_videos(&api, &ids).await.unwrap();
        assert_eq!(videos.len(), 3);

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].1["id"].split(',').count(), 50);
        assert_eq!(calls[2].1["id"].split(',').count(), 20);
        assert_eq!(calls[0].1["part"], VIDEO_PARTS);
    }

    #[tokio::test]
    async fn test_search_page_filters_by_kind() {
        let api = ScriptedApi::new().respond(
            "search",
            json!({
                "items": [
                    { "id": { "kind": "youtube#video", "videoId": "a" } },
                    { "id": { "kind": "youtube#channel", "channelId": "c" } },
                    { "id": { "kind": "youtube#video", "videoId": "b" } }
                ],
                "nextPageToken": "n"
            }),
        );

        let page = search_page(&api, &Params::new(), SearchKind::Video).await.unwrap();
        assert_eq!(page.ids, vec!["a", "b"]);
        assert_eq!(page.next_page_token.as_deref(), Some("n"));
        assert_eq!(api.calls()[0].1["type"], "video");
    }

    #[tokio::test]
    async fn test_collect_playlist_videos_skips_items_without_video() {
        let api = ScriptedApi::new()
            .respond(
                "playlistItems",
                json!({
                    "items": [
                        { "contentDetails": { "videoId": "a" } },
                        { "snippet": { "title": "Deleted video" } },
                        { "contentDetails": { "videoId": "b" } }
                    ]
                }),
            )
            .respond("videos", json!({ "items": [{ "id": "a" }, { "id": "b" }] }));

        let videos = collect_playlist_videos(&api, "PL1", 10).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(api.calls()[1].1["id"], "a,b");
        assert_eq!(api.calls()[0].1["maxResults"], "10");
    }
}
