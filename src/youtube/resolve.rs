//! Identifier resolution for free-form user input.
//!
//! Turns video URLs, channel URLs, handles and playlist links into the
//! canonical IDs the Data API expects.

use crate::error::{Result, YtError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static VIDEO_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:embed|shorts|live|v)/([A-Za-z0-9_-]{6,})").expect("Invalid regex")
});

static BARE_VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_-]{11}").expect("Invalid regex"));

/// What kind of resource an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    VideoId,
    ChannelId,
    ChannelHandle,
    PlaylistId,
}

/// A resolved identifier. `value` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierReference {
    pub kind: IdKind,
    pub value: String,
}

impl IdentifierReference {
    fn new(kind: IdKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Resolve a video reference, failing with a parse error.
    pub fn video(input: &str) -> Result<Self> {
        resolve_video_id(input)
            .map(|id| Self::new(IdKind::VideoId, id))
            .ok_or_else(|| YtError::InvalidInput("Cannot parse video ID from URL.".to_string()))
    }

    /// Resolve a channel reference, failing only on blank input.
    pub fn channel(input: &str) -> Result<Self> {
        resolve_channel_reference(input)
            .ok_or_else(|| YtError::InvalidInput("Channel input is empty.".to_string()))
    }

    /// Resolve a playlist reference, failing with a parse error.
    pub fn playlist(input: &str) -> Result<Self> {
        resolve_playlist_id(input)
            .map(|id| Self::new(IdKind::PlaylistId, id))
            .ok_or_else(|| {
                YtError::InvalidInput("Cannot parse playlist ID from URL.".to_string())
            })
    }
}

/// Parse input as a URL, accepting scheme-less YouTube links.
fn parse_url(input: &str) -> Option<Url> {
    if let Some(url) = Url::parse(input).ok().filter(|u| u.has_host()) {
        return Some(url);
    }

    let lower = input.to_ascii_lowercase();
    let looks_like_link = ["youtu.be/", "youtube.com/"]
        .iter()
        .any(|host| lower.starts_with(host) || lower.contains(&format!(".{}", host)));
    if looks_like_link {
        Url::parse(&format!("https://{}", input)).ok()
    } else {
        None
    }
}

/// First non-empty path segment after `marker`.
fn segment_after<'a>(path: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = path.split_once(marker)?;
    rest.split('/').next().filter(|s| !s.is_empty())
}

/// Extract a video ID from a short link, watch URL, embed path or bare ID.
///
/// Returns `None` when nothing in the input looks like a video ID.
pub fn resolve_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(url) = parse_url(input) {
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

        if host.ends_with("youtu.be") {
            if let Some(id) = url.path().split('/').find(|s| !s.is_empty()) {
                return Some(id.to_string());
            }
        } else if host.contains("youtube.com") {
            if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
                if !v.is_empty() {
                    return Some(v.into_owned());
                }
            }
            if let Some(caps) = VIDEO_PATH.captures(url.path()) {
                return Some(caps[1].to_string());
            }
        }
    }

    BARE_VIDEO_ID.find(input).map(|m| m.as_str().to_string())
}

/// Classify channel input as a channel ID or a handle.
///
/// Anything that is not a recognised channel URL and does not start with `@`
/// is assumed to already be a channel ID. Returns `None` for blank input.
pub fn resolve_channel_reference(input: &str) -> Option<IdentifierReference> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.contains("youtube.com") {
        if let Some(url) = parse_url(input) {
            let path = url.path();
            if let Some(id) = segment_after(path, "/channel/") {
                return Some(IdentifierReference::new(IdKind::ChannelId, id));
            }
            if let Some(handle) = segment_after(path, "/@") {
                return Some(IdentifierReference::new(IdKind::ChannelHandle, handle));
            }
            for legacy in ["/c/", "/user/"] {
                if let Some(name) = segment_after(path, legacy) {
                    return Some(IdentifierReference::new(IdKind::ChannelHandle, name));
                }
            }
        }
    } else if let Some(handle) = input.strip_prefix('@').filter(|h| !h.is_empty()) {
        return Some(IdentifierReference::new(IdKind::ChannelHandle, handle));
    }

    Some(IdentifierReference::new(IdKind::ChannelId, input))
}

/// Extract the `list` parameter from a playlist link, or accept a bare ID.
pub fn resolve_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();

    if input.contains("youtube.com") || input.contains("youtu.be") {
        return parse_url(input)?
            .query_pairs()
            .find(|(k, _)| k == "list")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty());
    }

    (!input.is_empty()).then(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_video_url_shapes_resolve_to_same_id() {
        let inputs = [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
            "  dQw4w9WgXcQ  ",
        ];
        for input in inputs {
            assert_eq!(resolve_video_id(input).as_deref(), Some(ID), "input: {input}");
        }
    }

    #[test]
    fn test_unparseable_video_input() {
        assert_eq!(resolve_video_id(""), None);
        assert_eq!(resolve_video_id("hello world"), None);
        assert_eq!(resolve_video_id("https://example.com/a/b"), None);

        let err = IdentifierReference::video("short").unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }

    #[test]
    fn test_bare_token_found_inside_text() {
        assert_eq!(
            resolve_video_id("watch this: dQw4w9WgXcQ!").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_channel_handles() {
        for input in [
            "@SomeHandle",
            "https://www.youtube.com/@SomeHandle",
            "https://www.youtube.com/@SomeHandle/videos",
            "https://www.youtube.com/c/SomeHandle",
            "https://www.youtube.com/user/SomeHandle",
        ] {
            assert_eq!(
                resolve_channel_reference(input),
                Some(IdentifierReference::new(IdKind::ChannelHandle, "SomeHandle")),
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_channel_ids() {
        assert_eq!(
            resolve_channel_reference("https://www.youtube.com/channel/UCabc123/featured"),
            Some(IdentifierReference::new(IdKind::ChannelId, "UCabc123"))
        );
        assert_eq!(
            resolve_channel_reference("UCabc123"),
            Some(IdentifierReference::new(IdKind::ChannelId, "UCabc123"))
        );
        // Unrecognised YouTube paths fall back to treating the input as an ID
        let fallback = resolve_channel_reference("https://www.youtube.com/feed/trending").unwrap();
        assert_eq!(fallback.kind, IdKind::ChannelId);

        assert_eq!(resolve_channel_reference("   "), None);
        assert_eq!(resolve_channel_reference("@").map(|r| r.kind), Some(IdKind::ChannelId));
    }

    #[test]
    fn test_playlist_ids() {
        assert_eq!(
            resolve_playlist_id("https://www.youtube.com/playlist?list=PL123abc").as_deref(),
            Some("PL123abc")
        );
        assert_eq!(
            resolve_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLxyz").as_deref(),
            Some("PLxyz")
        );
        assert_eq!(resolve_playlist_id("PL123abc").as_deref(), Some("PL123abc"));
        assert_eq!(resolve_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(resolve_playlist_id(""), None);
    }
}
