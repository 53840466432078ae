use std::time::Duration;

/// Content types the read API is allowed to answer with.
pub const XML_CONTENT_TYPES: [&str; 2] = ["application/xml", "text/xml"];

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("tumblr-rs/", env!("CARGO_PKG_VERSION"), " (+https://www.tumblr.com/api)");

/// Configuration for creating a [`crate::TumblrClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent as the `User-Agent` header on every request
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
