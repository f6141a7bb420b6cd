//! Comment thread aggregation.

use super::pager::{Paginator, COMMENT_PAGE_SIZE};
use crate::error::Result;
use crate::youtube::models::RawCommentThread;
use crate::youtube::{list, CommentRecord, IdentifierReference, Params, YoutubeApi};
use serde::Serialize;
use tracing::{info, instrument};

/// Comment ordering accepted by `commentThreads.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrder {
    Relevance,
    Time,
}

impl CommentOrder {
    /// Anything other than `time` means relevance.
    pub fn parse(order: &str) -> Self {
        match order {
            "time" => CommentOrder::Time,
            _ => CommentOrder::Relevance,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommentOrder::Relevance => "relevance",
            CommentOrder::Time => "time",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentsResult {
    pub video_id: String,
    pub order: CommentOrder,
    pub total_returned: usize,
    pub items: Vec<CommentRecord>,
}

/// Fetch up to `max` comments, top-level comments followed by their replies.
#[instrument(skip(api))]
pub async fn fetch_comments(
    api: &dyn YoutubeApi,
    video_url: &str,
    order: &str,
    max: usize,
) -> Result<CommentsResult> {
    let video_id = IdentifierReference::video(video_url)?.value;
    let order = CommentOrder::parse(order);

    let mut params = Params::new();
    params.insert("part", "snippet,replies".to_string());
    params.insert("videoId", video_id.clone());
    params.insert("order", order.as_str().to_string());
    params.insert("textFormat", "plainText".to_string());

    let mut pager = Paginator::new(max, COMMENT_PAGE_SIZE);
    let mut items: Vec<CommentRecord> = Vec::new();

    'pages: while let Some(request) = pager.next_request() {
        request.apply(&mut params);
        let page = list::<RawCommentThread>(api, "commentThreads", &params).await?;

        for thread in page.items {
            let top = thread.snippet.top_level_comment;
            let parent_id = top.as_ref().map(|c| c.id.clone());

            if let Some(top) = top {
                items.push(CommentRecord::from_raw(top, None));
                if items.len() >= max {
                    break 'pages;
                }
            }

            for reply in thread.replies.comments {
                items.push(CommentRecord::from_raw(reply, parent_id.clone()));
                if items.len() >= max {
                    break 'pages;
                }
            }
        }

        pager.advance(items.len(), page.next_page_token);
    }

    info!("Fetched {} comments for {}", items.len(), video_id);

    Ok(CommentsResult {
        video_id,
        order,
        total_returned: items.len(),
        items,
    })
}
