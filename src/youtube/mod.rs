//! YouTube Data API access.
//!
//! - `resolve` - turns URLs, handles and bare IDs into canonical IDs
//! - `client` - the single upstream chokepoint
//! - `models` - raw response shapes
//! - `records` - normalized records returned to callers

pub mod client;
pub mod models;
pub mod records;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{list, Params, YoutubeApi, YoutubeClient};
pub use records::{ArtistRecord, CommentRecord, PlaylistRecord, VideoRecord};
pub use resolve::{
    resolve_channel_reference, resolve_playlist_id, resolve_video_id, IdKind,
    IdentifierReference,
};
