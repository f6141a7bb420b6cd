//! Playlist search, trending playlists, playlist details and artists.

use super::pager::{Paginator, PAGE_SIZE};
use super::{collect_playlist_videos, search_page, SearchKind};
use crate::error::{Result, YtError};
use crate::youtube::models::{RawChannel, RawPlaylist, RawPlaylistItem};
use crate::youtube::{
    list, ArtistRecord, IdentifierReference, Params, PlaylistRecord, VideoRecord, YoutubeApi,
};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

#[derive(Debug, Serialize)]
pub struct PlaylistsResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    pub total_returned: usize,
    pub playlists: Vec<PlaylistRecord>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistDetailsResult {
    #[serde(flatten)]
    pub playlist: PlaylistRecord,
    pub max_videos: usize,
    pub total_returned: usize,
    pub videos: Vec<VideoRecord>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistArtistsResult {
    pub playlist_id: String,
    pub total_returned: usize,
    pub artists: Vec<ArtistRecord>,
}

/// Fetch playlist metadata for `ids`, at most [`PAGE_SIZE`] per call.
async fn fetch_playlists(
    api: &dyn YoutubeApi,
    ids: &[String],
    part: &str,
) -> Result<Vec<RawPlaylist>> {
    let mut playlists = Vec::with_capacity(ids.len());

    for batch in ids.chunks(PAGE_SIZE) {
        let mut params = Params::new();
        params.insert("part", part.to_string());
        params.insert("id", batch.join(","));
        playlists.extend(list::<RawPlaylist>(api, "playlists", &params).await?.items);
    }

    Ok(playlists)
}

/// Paginate `search.list` for playlists and resolve each page to full records.
async fn search_playlist_records(
    api: &dyn YoutubeApi,
    mut params: Params,
    max: usize,
) -> Result<Vec<PlaylistRecord>> {
    let mut pager = Paginator::new(max, PAGE_SIZE);
    let mut playlists = Vec::new();

    while let Some(request) = pager.next_request() {
        request.apply(&mut params);
        let page = search_page(api, &params, SearchKind::Playlist).await?;
        if !page.ids.is_empty() {
            let raw = fetch_playlists(api, &page.ids, "snippet,contentDetails").await?;
            playlists.extend(raw.into_iter().map(PlaylistRecord::summary));
        }
        pager.advance(playlists.len(), page.next_page_token);
    }
    playlists.truncate(max);

    Ok(playlists)
}

/// Most viewed playlists in a region.
#[instrument(skip(api))]
pub async fn get_trending_playlists(
    api: &dyn YoutubeApi,
    region: &str,
    max: usize,
) -> Result<PlaylistsResult> {
    let region = region.trim().to_uppercase();

    let mut params = Params::new();
    params.insert("regionCode", region.clone());
    params.insert("order", "viewCount".to_string());

    let playlists = search_playlist_records(api, params, max).await?;
    info!("Fetched {} trending playlists for {}", playlists.len(), region);

    Ok(PlaylistsResult {
        query: None,
        region: Some(region),
        order: None,
        total_returned: playlists.len(),
        playlists,
    })
}

/// Search playlists; each result carries its canonical URL.
#[instrument(skip(api))]
pub async fn search_playlists(
    api: &dyn YoutubeApi,
    query: &str,
    max: usize,
    order: &str,
) -> Result<PlaylistsResult> {
    if query.trim().is_empty() {
        return Err(YtError::InvalidInput("Search query is empty.".to_string()));
    }

    let mut params = Params::new();
    params.insert("q", query.to_string());
    params.insert("order", order.to_string());

    let playlists: Vec<PlaylistRecord> = search_playlist_records(api, params, max)
        .await?
        .into_iter()
        .map(PlaylistRecord::with_url)
        .collect();
    info!("Found {} playlists for {:?}", playlists.len(), query);

    Ok(PlaylistsResult {
        query: Some(query.to_string()),
        region: None,
        order: Some(order.to_string()),
        total_returned: playlists.len(),
        playlists,
    })
}

/// Playlist metadata plus up to `max_videos` of its videos, in playlist order.
#[instrument(skip(api))]
pub async fn get_playlist_details(
    api: &dyn YoutubeApi,
    playlist_url: &str,
    max_videos: usize,
) -> Result<PlaylistDetailsResult> {
    let playlist_id = IdentifierReference::playlist(playlist_url)?.value;

    let raw = fetch_playlists(
        api,
        std::slice::from_ref(&playlist_id),
        "snippet,contentDetails,status",
    )
    .await?
    .into_iter()
    .next()
    .ok_or_else(|| YtError::NotFound(format!("Playlist not found: {}", playlist_id)))?;
    let playlist = PlaylistRecord::detail(raw);

    let mut videos = collect_playlist_videos(api, &playlist_id, max_videos).await?;
    videos.truncate(max_videos);

    info!(
        "Fetched {} videos from playlist {}",
        videos.len(),
        playlist_id
    );

    Ok(PlaylistDetailsResult {
        playlist,
        max_videos,
        total_returned: videos.len(),
        videos,
    })
}

/// Distinct channels owning the videos of a playlist, most subscribed first.
#[instrument(skip(api))]
pub async fn get_playlist_artists(
    api: &dyn YoutubeApi,
    playlist_url: &str,
    max: usize,
) -> Result<PlaylistArtistsResult> {
    let playlist_id = IdentifierReference::playlist(playlist_url)?.value;

    let mut params = Params::new();
    params.insert("part", "snippet".to_string());
    params.insert("playlistId", playlist_id.clone());

    // The cap counts distinct owners, not items
    let mut pager = Paginator::full_pages(max, PAGE_SIZE);
    let mut owners: BTreeSet<String> = BTreeSet::new();

    while let Some(request) = pager.next_request() {
        request.apply(&mut params);
        let page = list::<RawPlaylistItem>(api, "playlistItems", &params).await?;
        owners.extend(
            page.items
                .iter()
                .filter_map(RawPlaylistItem::owner_channel_id)
                .map(str::to_string),
        );
        debug!("Playlist {}: {} distinct channels", playlist_id, owners.len());
        pager.advance(owners.len(), page.next_page_token);
    }

    let owners: Vec<String> = owners.into_iter().collect();
    let mut artists: Vec<ArtistRecord> = Vec::with_capacity(owners.len());
    for batch in owners.chunks(PAGE_SIZE) {
        let mut params = Params::new();
        params.insert("part", "snippet,statistics".to_string());
        params.insert("id", batch.join(","));
        let page = list::<RawChannel>(api, "channels", &params).await?;
        artists.extend(page.items.into_iter().map(ArtistRecord::from));
    }

    artists.sort_by(|a, b| b.subscriber_count.cmp(&a.subscriber_count));
    artists.truncate(max);

    info!(
        "Found {} artists in playlist {}",
        artists.len(),
        playlist_id
    );

    Ok(PlaylistArtistsResult {
        playlist_id,
        total_returned: artists.len(),
        artists,
    })
}
