mod alias;
mod feed;
mod post;
mod tumblelog;

pub use alias::AliasTable;
pub use feed::{Feed, FeedItem};
pub use post::{
    Audio, Conversation, Line, Link, Photo, Post, PostContent, PostType, Quote, Regular, Video,
};
pub use tumblelog::{FeedTable, ResponseInfo, Tumblelog};
