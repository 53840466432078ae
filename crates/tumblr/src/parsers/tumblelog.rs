use std::sync::Arc;

use crate::document::Element;
use crate::error::TumblrError;
use crate::models::{Feed, FeedTable, Post, Tumblelog};

use super::posts::build_post;

/// Build a [`Tumblelog`] from the root element of an API read document.
///
/// The `<tumblelog>` and `<posts>` sections are both required. Posts keep
/// document order, and once they are all built each one imported from a feed
/// is linked to that feed when the tumblelog lists it.
pub fn assemble(root: &Element) -> crate::Result<Tumblelog> {
    let log = root
        .find("tumblelog")
        .ok_or(TumblrError::MissingElement("tumblelog"))?;
    let posts_node = root
        .find("posts")
        .ok_or(TumblrError::MissingElement("posts"))?;

    let name = log.attr_text("name");
    let cname = log.attr_text("cname");
    let feeds = read_feeds(log)?;

    let start = posts_node.required_int("start")?;
    let num_posts = posts_node.required_int("total")?;

    let mut posts = posts_node
        .children()
        .iter()
        .map(build_post)
        .collect::<crate::Result<Vec<_>>>()?;

    if let Some(feeds) = &feeds {
        link_source_feeds(&mut posts, feeds);
    }

    tracing::debug!("Parsed {} posts for tumblelog {:?}", posts.len(), name);

    Ok(Tumblelog {
        title: log.attr_text("title"),
        url: Tumblelog::url_for(&name, &cname),
        name,
        cname,
        timezone: log.attr_text("timezone"),
        tagline: log.text().unwrap_or_default().to_string(),
        feeds,
        start,
        num_posts,
        posts,
        http_response: None,
    })
}

/// `None` when there is no `<feeds>` section, an empty table when it has no feeds.
fn read_feeds(log: &Element) -> crate::Result<Option<FeedTable>> {
    let Some(section) = log.find("feeds") else {
        return Ok(None);
    };

    let mut feeds = FeedTable::new();
    for node in section.find_all("feed") {
        let feed = Feed {
            id: node.required_int("id")?,
            url: node.attr_text("url"),
            import_type: node.attr_text("import-type"),
            title: node.attr_text("title"),
            next_update: node.required_int("next-update-in-seconds")?,
        };
        feeds.insert(feed.id, Arc::new(feed));
    }
    Ok(Some(feeds))
}

/// Attach each imported post's feed. The API sometimes emits a feed id the
/// table does not contain; such posts keep `source_feed` unset. Any present
/// `from-feed-id` is looked up, `0` included.
fn link_source_feeds(posts: &mut [Post], feeds: &FeedTable) {
    for post in posts.iter_mut() {
        let Some(feed_id) = post.source_feed_id() else {
            continue;
        };
        match feeds.get(&feed_id) {
            Some(feed) => post.source_feed = Some(Arc::clone(feed)),
            None => tracing::debug!("Post {} refers to unknown feed {}", post.id, feed_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::models::PostType;

    fn assemble_str(xml: &str) -> crate::Result<Tumblelog> {
        let doc = Document::parse(xml.as_bytes())?;
        assemble(doc.root())
    }

    const WITH_FEEDS: &str = r#"<tumblr version="1.0">
        <tumblelog name="golden" timezone="US/Eastern" title="golden hours">A tagline
          <feeds>
            <feed id="48612" url="http://del.icio.us/rss/mpgomez" import-type="link-description"
                  next-update-in-seconds="1140" title="del.icio.us/mpgomez"/>
          </feeds>
        </tumblelog>
        <posts start="0" total="3">
          <post id="1" type="link" unix-timestamp="1" from-feed-id="48612" feed-item="http://a/"/>
          <post id="2" type="link" unix-timestamp="2" from-feed-id="99999" feed-item="http://b/"/>
          <post id="3" type="regular" unix-timestamp="3"/>
        </posts>
      </tumblr>"#;

    #[test]
    fn test_metadata() {
        let log = assemble_str(WITH_FEEDS).unwrap();

        assert_eq!(log.title, "golden hours");
        assert_eq!(log.name, "golden");
        assert_eq!(log.cname, "");
        assert_eq!(log.url, "http://golden.tumblr.com/");
        assert_eq!(log.timezone, "US/Eastern");
        assert_eq!(log.tagline, "A tagline");
        assert_eq!(log.start, 0);
        assert_eq!(log.num_posts, 3);
        assert!(log.http_response.is_none());
    }

    #[test]
    fn test_source_feed_linked() {
        let log = assemble_str(WITH_FEEDS).unwrap();

        let feed = log.posts[0].source_feed.as_deref().unwrap();
        assert_eq!(feed.id, 48612);
        assert_eq!(feed.title, "del.icio.us/mpgomez");
        assert_eq!(feed.url, "http://del.icio.us/rss/mpgomez");
        assert_eq!(feed.import_type, "link-description");
        assert_eq!(feed.next_update, 1140);
        assert_eq!(log.feed(48612).map(|f| f.as_ref()), Some(feed));
    }

    #[test]
    fn test_dangling_feed_id_left_unset() {
        let log = assemble_str(WITH_FEEDS).unwrap();

        assert_eq!(log.posts[1].source_feed_id(), Some(99999));
        assert!(log.posts[1].source_feed.is_none());
        assert!(log.posts[2].source_feed.is_none());
    }

    #[test]
    fn test_feed_id_zero_is_linked() {
        let log = assemble_str(
            r#"<tumblr><tumblelog name="demo">
                 <feeds><feed id="0" url="http://a/rss" import-type="link" next-update-in-seconds="0" title="zero"/></feeds>
               </tumblelog>
               <posts start="0" total="1">
                 <post id="1" type="link" unix-timestamp="1" from-feed-id="0" feed-item="http://a/1"/>
               </posts></tumblr>"#,
        )
        .unwrap();

        assert_eq!(log.posts[0].source_feed_id(), Some(0));
        assert_eq!(log.posts[0].source_feed.as_deref().map(|f| f.title.as_str()), Some("zero"));
    }

    #[test]
    fn test_absent_and_empty_feed_sections_differ() {
        let absent = assemble_str(
            r#"<tumblr><tumblelog name="demo"/>
               <posts start="0" total="1">
                 <post id="1" type="link" unix-timestamp="1" from-feed-id="5" feed-item="x"/>
               </posts></tumblr>"#,
        )
        .unwrap();
        assert!(absent.feeds.is_none());
        assert!(absent.posts[0].source_feed.is_none());

        let empty = assemble_str(
            r#"<tumblr><tumblelog name="demo"><feeds/></tumblelog>
               <posts start="0" total="0"/></tumblr>"#,
        )
        .unwrap();
        assert_eq!(empty.feeds, Some(FeedTable::new()));
    }

    #[test]
    fn test_custom_domain() {
        let log = assemble_str(
            r#"<tumblr><tumblelog name="demo" cname="blog.example.com"/>
               <posts start="20" total="100"/></tumblr>"#,
        )
        .unwrap();

        assert_eq!(log.url, "http://blog.example.com/");
        assert_eq!(log.tagline, "");
        assert_eq!(log.start, 20);
        assert!(log.posts.is_empty());
    }

    #[test]
    fn test_posts_keep_document_order() {
        let log = assemble_str(
            r#"<tumblr><tumblelog name="demo"/>
               <posts start="0" total="4">
                 <post id="40" type="quote" unix-timestamp="0"/>
                 <post id="10" type="photo" unix-timestamp="0"/>
                 <post id="30" type="mystery" unix-timestamp="0"/>
                 <post id="20" type="video" unix-timestamp="0"/>
               </posts></tumblr>"#,
        )
        .unwrap();

        let ids: Vec<_> = log.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![40, 10, 30, 20]);
        assert_eq!(log.posts[2].post_type(), PostType::Unknown);
    }

    #[test]
    fn test_missing_sections_are_fatal() {
        assert!(matches!(
            assemble_str(r#"<tumblr><posts start="0" total="0"/></tumblr>"#),
            Err(TumblrError::MissingElement("tumblelog"))
        ));
        assert!(matches!(
            assemble_str(r#"<tumblr><tumblelog name="demo"/></tumblr>"#),
            Err(TumblrError::MissingElement("posts"))
        ));
        assert!(matches!(
            assemble_str(r#"<tumblr><tumblelog name="demo"/><posts total="0"/></tumblr>"#),
            Err(TumblrError::MissingAttribute { attribute: "start", .. })
        ));
    }
}
