use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;

use crate::config::{ClientConfig, XML_CONTENT_TYPES};
use crate::error::TumblrError;
use crate::models::{ResponseInfo, Tumblelog};
use crate::request::ReadRequest;

/// Read API client
pub struct TumblrClient {
    client: Client,
    config: ClientConfig,
}

impl TumblrClient {
    /// Create a client with its own reqwest Client built from `config`.
    pub fn new(config: ClientConfig) -> crate::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client around an existing reqwest Client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            config: ClientConfig::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch and parse one page of a tumblelog.
    pub async fn read(&self, request: &ReadRequest) -> crate::Result<Tumblelog> {
        let url = request.url()?;
        self.read_url(url.as_str()).await
    }

    /// Fetch and parse an API read document at `url`.
    pub async fn read_url(&self, url: &str) -> crate::Result<Tumblelog> {
        let (info, body) = self.fetch(url).await?;
        let mut tumblelog = crate::parse_bytes(&body)?;
        tumblelog.http_response = Some(info);
        Ok(tumblelog)
    }

    /// GET `url` and return the raw XML body.
    ///
    /// Status codes the API is known to use for failures map to their own
    /// error variants; a body that is not served as XML is rejected before
    /// anyone tries to parse it.
    pub async fn fetch(&self, url: &str) -> crate::Result<(ResponseInfo, Vec<u8>)> {
        tracing::debug!("Fetching tumblelog from: {}", url);
        let requested = reqwest::Url::parse(url)?;

        let response = self
            .client
            .get(requested.clone())
            .header(USER_AGENT, self.config.user_agent.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TumblrError::from_status(status.as_u16()));
        }

        let header = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let (content_type, charset) = parse_content_type(header);
        if !XML_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(TumblrError::UnsupportedContentType(header.to_string()));
        }

        let info = ResponseInfo {
            redirected: *response.url() != requested,
            url: response.url().to_string(),
            status: status.as_u16(),
            content_type,
            charset,
        };

        let body = response.bytes().await?.to_vec();
        tracing::debug!("Fetched {} bytes from {}", body.len(), info.url);
        Ok((info, body))
    }
}

/// Split a `Content-Type` header into the lowercased media type and the charset, if any.
pub fn parse_content_type(header: &str) -> (String, Option<String>) {
    let mut parts = header.split(';');
    let content_type = parts
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let charset = parts.find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    });
    (content_type, charset)
}
