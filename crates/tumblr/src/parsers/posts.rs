use std::collections::HashMap;

use crate::document::Element;
use crate::models::{
    Audio, Conversation, FeedItem, Line, Link, Photo, Post, PostContent, PostType, Quote, Regular,
    Video,
};

/// Build one post from its `<post>` element.
///
/// The `type` attribute picks the variant; an unknown or missing type gives
/// the fallback variant rather than an error, since the API adds types the
/// client may not know about yet.
pub fn build_post(node: &Element) -> crate::Result<Post> {
    let post_type = PostType::from_discriminator(node.attr("type"));

    let id = node.required_int("id")?;
    let unixtime = node.required_int("unix-timestamp")?;
    let feed_item = node.optional_int("from-feed-id")?.map(|feed_id| FeedItem {
        feed_id,
        url: node.attr_text("feed-item"),
    });

    let content = match post_type {
        PostType::Regular => PostContent::Regular(map_regular(node)),
        PostType::Link => PostContent::Link(map_link(node)),
        PostType::Quote => PostContent::Quote(map_quote(node)),
        PostType::Photo => PostContent::Photo(map_photo(node)),
        PostType::Conversation => PostContent::Conversation(map_conversation(node)),
        PostType::Video => PostContent::Video(map_video(node)),
        PostType::Audio => PostContent::Audio(map_audio(node)),
        PostType::Unknown => {
            tracing::debug!(
                "Post {} has unrecognised type {:?}",
                id,
                node.attr("type").unwrap_or_default()
            );
            PostContent::Unknown
        }
    };

    Ok(Post {
        id,
        url: node.attr_text("url"),
        date_gmt: node.attr_text("date-gmt"),
        date: node.attr_text("date"),
        unixtime,
        feed_item,
        source_feed: None,
        content,
    })
}

fn map_regular(node: &Element) -> Regular {
    Regular {
        title: node.child_text("regular-title"),
        body: node.child_text("regular-body"),
    }
}

fn map_link(node: &Element) -> Link {
    Link {
        title: node.child_text("link-text"),
        description: node.child_text("link-description"),
        link_url: node.child_text("link-url"),
        via: String::new(),
    }
}

fn map_quote(node: &Element) -> Quote {
    Quote {
        quote: node.child_text("quote-text"),
        source: node.child_text("quote-source"),
    }
}

fn map_photo(node: &Element) -> Photo {
    let urls: HashMap<String, String> = node
        .find_all("photo-url")
        .map(|url| (url.attr_text("max-width"), url.text().unwrap_or_default().to_string()))
        .collect();

    Photo {
        caption: node.child_text("photo-caption"),
        urls,
    }
}

fn map_conversation(node: &Element) -> Conversation {
    let lines = node
        .find_all("conversation-line")
        .map(|line| Line {
            name: line.attr_text("name"),
            label: line.attr_text("label"),
            content: line.text().unwrap_or_default().to_string(),
        })
        .collect();

    Conversation {
        description: node.child_text("conversation-text"),
        lines,
    }
}

fn map_video(node: &Element) -> Video {
    Video {
        source: node.child_text("video-source"),
        player: node.child_text("video-player"),
        caption: node.child_text("video-caption"),
        title: String::new(),
    }
}

fn map_audio(_node: &Element) -> Audio {
    Audio::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::error::TumblrError;

    fn build(xml: &str) -> crate::Result<Post> {
        let doc = Document::parse(xml.as_bytes()).unwrap();
        build_post(doc.root())
    }

    fn content_of(xml: &str) -> PostContent {
        build(xml).unwrap().content
    }

    #[test]
    fn test_known_types_keep_their_discriminator() {
        for post_type in PostType::KNOWN {
            let xml = format!(
                r#"<post id="1" url="http://demo.tumblr.com/post/1" type="{}" unix-timestamp="0"/>"#,
                post_type
            );
            let post = build(&xml).unwrap();
            assert_eq!(post.post_type(), post_type);
            assert_eq!(post.field("type").unwrap(), post_type.as_str());
        }
    }

    #[test]
    fn test_unknown_and_missing_type_fall_back() {
        let post = build(r#"<post id="1" type="answer" unix-timestamp="0"/>"#).unwrap();
        assert_eq!(post.post_type(), PostType::Unknown);
        assert_eq!(post.content, PostContent::Unknown);

        let post = build(r#"<post id="2" unix-timestamp="0"/>"#).unwrap();
        assert_eq!(post.post_type(), PostType::Unknown);
    }

    #[test]
    fn test_base_fields() {
        let post = build(
            r#"<post id="1164786" url="http://demo.tumblr.com/post/1164786" type="regular"
                date-gmt="2007-04-26 23:55:00 GMT" date="Thu, 26 Apr 2007 19:55:00"
                unix-timestamp="1177631700"/>"#,
        )
        .unwrap();

        assert_eq!(post.id, 1164786);
        assert_eq!(post.permalink(), "http://demo.tumblr.com/post/1164786");
        assert_eq!(post.date_gmt, "2007-04-26 23:55:00 GMT");
        assert_eq!(post.date, "Thu, 26 Apr 2007 19:55:00");
        assert_eq!(post.unixtime, 1177631700);
        assert_eq!(post.source_feed_id(), None);
        assert_eq!(post.source_url(), None);
    }

    #[test]
    fn test_feed_linkage_present_together() {
        let post = build(
            r#"<post id="1" type="link" unix-timestamp="0" from-feed-id="48612"
                feed-item="http://del.icio.us/mpgomez/item"/>"#,
        )
        .unwrap();
        assert_eq!(post.source_feed_id(), Some(48612));
        assert_eq!(post.source_url(), Some("http://del.icio.us/mpgomez/item"));

        let post = build(r#"<post id="1" type="link" unix-timestamp="0" from-feed-id="9"/>"#).unwrap();
        assert_eq!(post.source_url(), Some(""));
    }

    #[test]
    fn test_required_integers() {
        assert!(matches!(
            build(r#"<post type="regular" unix-timestamp="0"/>"#),
            Err(TumblrError::MissingAttribute { attribute: "id", .. })
        ));
        assert!(matches!(
            build(r#"<post id="x1" type="regular" unix-timestamp="0"/>"#),
            Err(TumblrError::InvalidInteger { attribute: "id", .. })
        ));
    }

    #[test]
    fn test_regular_fields() {
        let content = content_of(
            r#"<post id="1" type="regular" unix-timestamp="0">
                <regular-title>Hello</regular-title>
                <regular-body>&lt;p&gt;World&lt;/p&gt;</regular-body>
            </post>"#,
        );
        assert_eq!(
            content,
            PostContent::Regular(Regular {
                title: "Hello".to_string(),
                body: "<p>World</p>".to_string(),
            })
        );

        let post = build(r#"<post id="1" type="regular" unix-timestamp="0"/>"#).unwrap();
        assert_eq!(post.content, PostContent::Regular(Regular::default()));
        assert_eq!(post.field("content").unwrap(), "");
        assert_eq!(post.field("description").unwrap(), "");
    }

    #[test]
    fn test_link_fields() {
        let post = build(
            r#"<post id="1" type="link" unix-timestamp="0">
                <link-text>Example</link-text>
                <link-url>http://example.com/</link-url>
                <link-description>Worth a read</link-description>
            </post>"#,
        )
        .unwrap();

        let PostContent::Link(link) = &post.content else {
            panic!("expected a link post");
        };
        assert_eq!(link.title, "Example");
        assert_eq!(link.link_url, "http://example.com/");
        assert_eq!(link.via, "");
        assert_eq!(post.field("related").unwrap(), "http://example.com/");
        assert_eq!(post.field("content").unwrap(), "Worth a read");
    }

    #[test]
    fn test_quote_fields() {
        let post = build(
            r#"<post id="1" type="quote" unix-timestamp="0">
                <quote-text>To be or not to be</quote-text>
                <quote-source></quote-source>
            </post>"#,
        )
        .unwrap();

        assert_eq!(post.field("quote").unwrap(), "To be or not to be");
        assert_eq!(post.field("body").unwrap(), "To be or not to be");
        assert_eq!(post.field("source").unwrap(), "");
    }

    #[test]
    fn test_photo_urls_keyed_by_max_width() {
        let content = content_of(
            r#"<post id="1" type="photo" unix-timestamp="0">
                <photo-caption>Cat</photo-caption>
                <photo-url max-width="500">http://data.tumblr.com/cat_500.jpg</photo-url>
                <photo-url max-width="75">http://data.tumblr.com/cat_75sq.jpg</photo-url>
            </post>"#,
        );

        let PostContent::Photo(photo) = content else {
            panic!("expected a photo post");
        };
        assert_eq!(photo.caption, "Cat");
        assert_eq!(photo.urls.len(), 2);
        assert_eq!(
            photo.url_for_width("75"),
            Some("http://data.tumblr.com/cat_75sq.jpg")
        );
        assert_eq!(photo.url_for_width("075"), None);
    }

    #[test]
    fn test_conversation_lines_keep_order() {
        let content = content_of(
            r#"<post id="1" type="conversation" unix-timestamp="0">
                <conversation-title>Knock knock</conversation-title>
                <conversation-text>A: Knock knock B: Who's there?</conversation-text>
                <conversation-line name="A" label="A:">Knock knock</conversation-line>
                <conversation-line name="B" label="B:">Who's there?</conversation-line>
                <conversation-line name="A" label="A:">Rust</conversation-line>
            </post>"#,
        );

        let PostContent::Conversation(conversation) = content else {
            panic!("expected a conversation post");
        };
        assert_eq!(conversation.description, "A: Knock knock B: Who's there?");
        let spoken: Vec<_> = conversation
            .lines
            .iter()
            .map(|line| (line.name.as_str(), line.content.as_str()))
            .collect();
        assert_eq!(
            spoken,
            vec![("A", "Knock knock"), ("B", "Who's there?"), ("A", "Rust")]
        );
        assert_eq!(conversation.lines[1].label, "B:");
    }

    #[test]
    fn test_video_and_audio_fields() {
        let post = build(
            r#"<post id="1" type="video" unix-timestamp="0">
                <video-caption>Trailer</video-caption>
                <video-source>http://www.youtube.com/watch?v=abc</video-source>
                <video-player>&lt;embed/&gt;</video-player>
            </post>"#,
        )
        .unwrap();
        assert_eq!(post.field("description").unwrap(), "Trailer");
        assert_eq!(post.field("player").unwrap(), "<embed/>");
        assert_eq!(post.field("title").unwrap(), "");

        let post = build(
            r#"<post id="2" type="audio" unix-timestamp="0">
                <audio-caption>Ignored</audio-caption>
            </post>"#,
        )
        .unwrap();
        assert_eq!(post.content, PostContent::Audio(Audio::default()));
        assert_eq!(post.field("body").unwrap(), "");
    }
}
