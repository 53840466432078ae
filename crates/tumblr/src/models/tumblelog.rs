use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::{Feed, Post};

/// Feed table keyed by feed id.
pub type FeedTable = HashMap<i64, Arc<Feed>>;

/// A tumblelog: metadata, the optional feed table and one page of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tumblelog {
    pub title: String,
    pub name: String,
    /// Custom domain, empty when the tumblelog has none
    pub cname: String,
    /// Custom-domain URL when `cname` is set, the platform subdomain otherwise
    pub url: String,
    pub timezone: String,
    pub tagline: String,
    /// `None` when the document has no feed section at all
    pub feeds: Option<FeedTable>,
    /// Offset of the first post in this page
    pub start: i64,
    /// Total number of posts the tumblelog reports
    pub num_posts: i64,
    pub posts: Vec<Post>,
    /// Set only when the document came over HTTP
    pub http_response: Option<ResponseInfo>,
}

impl Tumblelog {
    /// Public URL of a tumblelog.
    pub fn url_for(name: &str, cname: &str) -> String {
        if cname.is_empty() {
            format!("http://{}.tumblr.com/", name)
        } else {
            format!("http://{}/", cname)
        }
    }

    pub fn feed(&self, id: i64) -> Option<&Arc<Feed>> {
        self.feeds.as_ref()?.get(&id)
    }
}

/// What the HTTP collaborator learned while fetching the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseInfo {
    /// URL the document was finally served from, after redirects
    pub url: String,
    pub status: u16,
    pub content_type: String,
    pub charset: Option<String>,
    pub redirected: bool,
}
