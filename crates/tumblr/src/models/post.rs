use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::alias::{
    AliasTable, CAPTION_ALIASES, CONVERSATION_ALIASES, LINK_ALIASES, POST_ALIASES, QUOTE_ALIASES,
    REGULAR_ALIASES,
};
use super::{Feed, FeedItem};
use crate::error::TumblrError;

/// Post type discriminator, as carried by the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Regular,
    Link,
    Quote,
    Photo,
    Conversation,
    Video,
    Audio,
    /// Anything the client does not recognise, including a missing attribute
    Unknown,
}

impl PostType {
    /// The seven types the API documents.
    pub const KNOWN: [PostType; 7] = [
        PostType::Regular,
        PostType::Link,
        PostType::Quote,
        PostType::Photo,
        PostType::Conversation,
        PostType::Video,
        PostType::Audio,
    ];

    /// Exact, case-sensitive match; never fails.
    pub fn from_discriminator(value: Option<&str>) -> Self {
        match value {
            Some("regular") => PostType::Regular,
            Some("link") => PostType::Link,
            Some("quote") => PostType::Quote,
            Some("photo") => PostType::Photo,
            Some("conversation") => PostType::Conversation,
            Some("video") => PostType::Video,
            Some("audio") => PostType::Audio,
            _ => PostType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Regular => "regular",
            PostType::Link => "link",
            PostType::Quote => "quote",
            PostType::Photo => "photo",
            PostType::Conversation => "conversation",
            PostType::Video => "video",
            PostType::Audio => "audio",
            PostType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published entry of a tumblelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    /// Permalink
    pub url: String,
    pub date_gmt: String,
    /// Date in the tumblelog's timezone
    pub date: String,
    pub unixtime: i64,
    /// Present only for posts imported from a feed
    pub feed_item: Option<FeedItem>,
    /// The feed `feed_item` points at, when the tumblelog lists it
    pub source_feed: Option<Arc<Feed>>,
    #[serde(flatten)]
    pub content: PostContent,
}

impl Post {
    pub fn post_type(&self) -> PostType {
        self.content.post_type()
    }

    pub fn permalink(&self) -> &str {
        &self.url
    }

    pub fn source_feed_id(&self) -> Option<i64> {
        self.feed_item.as_ref().map(|item| item.feed_id)
    }

    pub fn source_url(&self) -> Option<&str> {
        self.feed_item.as_ref().map(|item| item.url.as_str())
    }

    /// The alias table of this post's variant.
    pub fn aliases(&self) -> AliasTable {
        self.content.aliases()
    }

    /// Read a text field by name.
    ///
    /// Concrete fields (`url`, `date`, `body`, `caption`, ...) are looked up
    /// first; any other name goes through the variant's alias table, so
    /// `field("content")` on a photo returns its caption. A name that is
    /// neither yields [`TumblrError::NoSuchField`]; an existing but empty
    /// field yields `Ok("")`.
    ///
    /// Only text fields are reachable here. Numeric fields (`id`, `unixtime`)
    /// and the source feed linkage are read through the struct fields and
    /// [`Post::source_feed_id`], and asking `field` for them is `NoSuchField`.
    pub fn field(&self, name: &str) -> crate::Result<&str> {
        if let Some(value) = self.concrete_field(name) {
            return Ok(value);
        }
        self.aliases()
            .resolve(name)
            .and_then(|target| self.concrete_field(target))
            .ok_or_else(|| TumblrError::NoSuchField {
                post_type: self.post_type().as_str(),
                field: name.to_string(),
            })
    }

    fn concrete_field(&self, name: &str) -> Option<&str> {
        match name {
            "type" => Some(self.post_type().as_str()),
            "url" => Some(&self.url),
            "date_gmt" => Some(&self.date_gmt),
            "date" => Some(&self.date),
            "source_url" => self.source_url(),
            _ => self.content.field(name),
        }
    }
}

/// Variant-specific payload of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostContent {
    Regular(Regular),
    Link(Link),
    Quote(Quote),
    Photo(Photo),
    Conversation(Conversation),
    Video(Video),
    Audio(Audio),
    Unknown,
}

impl PostContent {
    pub fn post_type(&self) -> PostType {
        match self {
            PostContent::Regular(_) => PostType::Regular,
            PostContent::Link(_) => PostType::Link,
            PostContent::Quote(_) => PostType::Quote,
            PostContent::Photo(_) => PostType::Photo,
            PostContent::Conversation(_) => PostType::Conversation,
            PostContent::Video(_) => PostType::Video,
            PostContent::Audio(_) => PostType::Audio,
            PostContent::Unknown => PostType::Unknown,
        }
    }

    pub(crate) fn aliases(&self) -> AliasTable {
        match self {
            PostContent::Regular(_) => Regular::ALIASES,
            PostContent::Link(_) => Link::ALIASES,
            PostContent::Quote(_) => Quote::ALIASES,
            PostContent::Photo(_) => Photo::ALIASES,
            PostContent::Conversation(_) => Conversation::ALIASES,
            PostContent::Video(_) => Video::ALIASES,
            PostContent::Audio(_) => Audio::ALIASES,
            PostContent::Unknown => POST_ALIASES,
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match self {
            PostContent::Regular(post) => post.field(name),
            PostContent::Link(post) => post.field(name),
            PostContent::Quote(post) => post.field(name),
            PostContent::Photo(post) => post.field(name),
            PostContent::Conversation(post) => post.field(name),
            PostContent::Video(post) => post.field(name),
            PostContent::Audio(post) => post.field(name),
            PostContent::Unknown => None,
        }
    }
}

/// Freeform text post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regular {
    pub title: String,
    pub body: String,
}

impl Regular {
    pub const ALIASES: AliasTable = REGULAR_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "body" => Some(&self.body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub description: String,
    pub link_url: String,
    /// Never populated by the API; kept for callers that expect it
    pub via: String,
}

impl Link {
    pub const ALIASES: AliasTable = LINK_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "link_url" => Some(&self.link_url),
            "via" => Some(&self.via),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub source: String,
}

impl Quote {
    pub const ALIASES: AliasTable = QUOTE_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "quote" => Some(&self.quote),
            "source" => Some(&self.source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub caption: String,
    /// Image URL per `max-width` value, keyed by the attribute text as-is
    pub urls: HashMap<String, String>,
}

impl Photo {
    pub const ALIASES: AliasTable = CAPTION_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "caption" => Some(&self.caption),
            _ => None,
        }
    }

    pub fn url_for_width(&self, max_width: &str) -> Option<&str> {
        self.urls.get(max_width).map(String::as_str)
    }
}

/// A chat log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub description: String,
    /// In dialogue order
    pub lines: Vec<Line>,
}

impl Conversation {
    pub const ALIASES: AliasTable = CONVERSATION_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "description" => Some(&self.description),
            _ => None,
        }
    }
}

/// One line of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Speaker
    pub name: String,
    pub label: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub source: String,
    pub player: String,
    pub caption: String,
    /// Always empty; the API does not expose video titles
    pub title: String,
}

impl Video {
    pub const ALIASES: AliasTable = CAPTION_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "source" => Some(&self.source),
            "player" => Some(&self.player),
            "caption" => Some(&self.caption),
            "title" => Some(&self.title),
            _ => None,
        }
    }
}

/// Audio post. The API exposes neither player nor caption, so both stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub player: String,
    pub caption: String,
}

impl Audio {
    pub const ALIASES: AliasTable = CAPTION_ALIASES;

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "player" => Some(&self.player),
            "caption" => Some(&self.caption),
            _ => None,
        }
    }
}
