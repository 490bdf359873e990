use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static SUPPORTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?(twitter\.com|x\.com)/.+/status/\d+").expect("valid regex")
});
static ITEM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/status/(\d+)").expect("valid regex"));
static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\w+)/status/").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("not a supported thread url: {0:?}")]
    Unsupported(String),
    #[error("no item id in url {0:?}")]
    MissingItemId(String),
    #[error("no author handle in url {0:?}")]
    MissingAuthorHandle(String),
}

/// A status URL on twitter.com or x.com, with the identifiers derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadUrl {
    url: String,
    item_id: String,
    author_handle: String,
}

impl ThreadUrl {
    pub fn parse(url: &str) -> Result<Self, ClassifyError> {
        if !is_supported_url(url) {
            return Err(ClassifyError::Unsupported(url.to_string()));
        }
        let item_id =
            extract_item_id(url).ok_or_else(|| ClassifyError::MissingItemId(url.to_string()))?;
        let author_handle = extract_author_handle(url)
            .ok_or_else(|| ClassifyError::MissingAuthorHandle(url.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            item_id,
            author_handle,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn author_handle(&self) -> &str {
        &self.author_handle
    }
}

/// True for `http(s)://[www.](twitter.com|x.com)/<path>/status/<digits>...`.
/// Empty input is simply unsupported.
pub fn is_supported_url(url: &str) -> bool {
    !url.is_empty() && SUPPORTED_RE.is_match(url)
}

/// First run of digits after `/status/`.
pub fn extract_item_id(url: &str) -> Option<String> {
    ITEM_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Word characters of the path segment directly preceding `/status/`.
pub fn extract_author_handle(url: &str) -> Option<String> {
    HANDLE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
