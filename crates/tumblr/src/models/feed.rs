use serde::{Deserialize, Serialize};

/// An external feed the tumblelog imports posts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Unique within one tumblelog
    pub id: i64,
    pub url: String,
    /// Import type tag, e.g. `link-description`
    #[serde(rename = "type")]
    pub import_type: String,
    pub title: String,
    /// Seconds until the platform polls the feed again
    pub next_update: i64,
}

/// Marks a post as imported from a feed: the feed id and the imported item's URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub feed_id: i64,
    pub url: String,
}
