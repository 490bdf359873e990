use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifyError;
use crate::persist::PersistError;

/// Kind of document a harvest produces, as seen by downstream ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    TwitterThread,
}

/// Metadata describing a written thread file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMetadata {
    pub title: String,
    pub uploader: String,
    pub url: String,
    /// RFC 3339 creation instant decoded from the item ID, if decodable.
    pub created_time: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl ThreadMetadata {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub status: u16,
    pub body: String,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub request_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub encoding_label: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a single harvest did not produce a thread file.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifyError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("no thread content found on mirror page for item {item_id}")]
    Extraction { item_id: String },
    #[error("could not write thread: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedThread {
    pub file_path: PathBuf,
    pub metadata: ThreadMetadata,
    pub block_count: usize,
}

/// Uniform result handed to callers that only care about success, the file
/// and its metadata. Every failure collapses to `success == false` with both
/// fields absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestOutcome {
    pub success: bool,
    pub file_path: Option<PathBuf>,
    pub metadata: Option<ThreadMetadata>,
}

impl HarvestOutcome {
    pub fn failed() -> Self {
        Self::default()
    }

    pub fn into_parts(self) -> (bool, Option<PathBuf>, Option<ThreadMetadata>) {
        (self.success, self.file_path, self.metadata)
    }
}

impl From<HarvestedThread> for HarvestOutcome {
    fn from(thread: HarvestedThread) -> Self {
        Self {
            success: true,
            file_path: Some(thread.file_path),
            metadata: Some(thread.metadata),
        }
    }
}

impl From<Result<HarvestedThread, HarvestError>> for HarvestOutcome {
    fn from(result: Result<HarvestedThread, HarvestError>) -> Self {
        match result {
            Ok(thread) => thread.into(),
            Err(_) => Self::failed(),
        }
    }
}
