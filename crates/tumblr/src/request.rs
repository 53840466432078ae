use std::fmt;

use url::Url;

use crate::models::PostType;

/// Email and password sent with an authenticated read.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One call to the `/api/read` endpoint.
///
/// Only the parameters that were set end up in the query string. Paging is up
/// to the caller: issue another request with a new `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    endpoint: String,
    start: Option<u32>,
    num: Option<u32>,
    post_type: Option<PostType>,
    id: Option<i64>,
    tagged: Option<String>,
    search: Option<String>,
    credentials: Option<Credentials>,
}

impl ReadRequest {
    /// Read endpoint of the tumblelog `name` on the platform domain.
    pub fn for_name(name: &str) -> Self {
        Self::for_endpoint(format!("http://{}.tumblr.com/api/read", name))
    }

    /// Read endpoint under a tumblelog's own URL, e.g. a custom domain.
    pub fn for_site(site_url: &str) -> Self {
        Self::for_endpoint(format!("{}/api/read", site_url.trim_end_matches('/')))
    }

    /// Use `endpoint` exactly as given.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            start: None,
            num: None,
            post_type: None,
            id: None,
            tagged: None,
            search: None,
            credentials: None,
        }
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    pub fn num(mut self, num: u32) -> Self {
        self.num = Some(num);
        self
    }

    /// Restrict to one post type. [`PostType::Unknown`] clears the filter.
    pub fn post_type(mut self, post_type: PostType) -> Self {
        self.post_type = Some(post_type).filter(|t| *t != PostType::Unknown);
        self
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tagged = Some(tag.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            email: email.into(),
            password: password.into(),
        });
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start {
            pairs.push(("start", start.to_string()));
        }
        if let Some(num) = self.num {
            pairs.push(("num", num.to_string()));
        }
        if let Some(post_type) = self.post_type {
            pairs.push(("type", post_type.as_str().to_string()));
        }
        if let Some(id) = self.id {
            pairs.push(("id", id.to_string()));
        }
        if let Some(tagged) = &self.tagged {
            pairs.push(("tagged", tagged.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(credentials) = &self.credentials {
            pairs.push(("email", credentials.email.clone()));
            pairs.push(("password", credentials.password.clone()));
        }
        pairs
    }

    /// The full request URL.
    pub fn url(&self) -> crate::Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}
