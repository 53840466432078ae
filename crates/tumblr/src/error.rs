use thiserror::Error;

#[derive(Debug, Error)]
pub enum TumblrError {
    #[error("XML parse error: {0}")]
    Parse(String),

    #[error("Document has no <{0}> element")]
    MissingElement(&'static str),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute '{attribute}' is not an integer: {value:?}")]
    InvalidInteger {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("{post_type} post has no field '{field}'")]
    NoSuchField { post_type: &'static str, field: String },

    #[error("Access forbidden (HTTP 403)")]
    Forbidden,

    #[error("URL not found (HTTP 404)")]
    NotFound,

    #[error("URL is gone (HTTP 410)")]
    Gone,

    #[error("Internal server error (HTTP 500)")]
    InternalServerError,

    #[error("Service unavailable (HTTP 503)")]
    ServiceUnavailable,

    #[error("Unexpected HTTP status {status_code}")]
    Http { status_code: u16 },

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TumblrError {
    /// Build the error for an HTTP status the API is known to return.
    pub(crate) fn from_status(status_code: u16) -> Self {
        match status_code {
            403 => TumblrError::Forbidden,
            404 => TumblrError::NotFound,
            410 => TumblrError::Gone,
            500 => TumblrError::InternalServerError,
            503 => TumblrError::ServiceUnavailable,
            _ => TumblrError::Http { status_code },
        }
    }
}
