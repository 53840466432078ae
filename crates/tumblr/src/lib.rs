//! Tumblr XML read API client
//!
//! Turns an `/api/read` document into a [`Tumblelog`]: its metadata, the
//! optional table of imported feeds, and one page of posts, each post typed by
//! its `type` attribute.
//!
//! ```
//! use tumblr::{parse_str, PostType};
//!
//! let log = parse_str(r#"<tumblr>
//!   <tumblelog name="demo" title="Demo"/>
//!   <posts start="0" total="1">
//!     <post id="1" url="http://demo.tumblr.com/post/1" type="photo" unix-timestamp="0">
//!       <photo-caption>Sunset</photo-caption>
//!     </post>
//!   </posts>
//! </tumblr>"#)?;
//!
//! assert_eq!(log.url, "http://demo.tumblr.com/");
//! assert_eq!(log.posts[0].post_type(), PostType::Photo);
//! assert_eq!(log.posts[0].field("description")?, "Sunset");
//! # Ok::<(), tumblr::TumblrError>(())
//! ```

mod client;
mod config;
pub mod document;
mod error;
pub mod models;
mod parsers;
mod request;

use std::io::{BufReader, Read};
use std::path::Path;

pub use client::{parse_content_type, TumblrClient};
pub use config::{ClientConfig, XML_CONTENT_TYPES};
pub use document::{Document, Element};
pub use error::TumblrError;
pub use models::{
    AliasTable, Audio, Conversation, Feed, FeedItem, FeedTable, Line, Link, Photo, Post,
    PostContent, PostType, Quote, Regular, ResponseInfo, Tumblelog, Video,
};
pub use parsers::{assemble, build_post};
pub use request::{Credentials, ReadRequest};

pub type Result<T> = std::result::Result<T, TumblrError>;

/// Build a tumblelog from an already parsed document.
pub fn parse_document(document: &Document) -> Result<Tumblelog> {
    assemble(document.root())
}

pub fn parse_bytes(xml: &[u8]) -> Result<Tumblelog> {
    parse_document(&Document::parse(xml)?)
}

pub fn parse_str(xml: &str) -> Result<Tumblelog> {
    parse_bytes(xml.as_bytes())
}

pub fn parse_reader<R: Read>(reader: R) -> Result<Tumblelog> {
    parse_document(&Document::from_reader(BufReader::new(reader))?)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Tumblelog> {
    let file = std::fs::File::open(path)?;
    parse_reader(file)
}

/// Whether `source` is an HTTP(S) URL rather than a file path or XML text.
pub fn is_url(source: &str) -> bool {
    url::Url::parse(source)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
