use std::fmt;

use serde::{Deserialize, Serialize};

/// One downloadable artifact discovered on a mirror.
///
/// Serialized with the keys the companion download page reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub version: String,
    pub filename: String,
    pub url: String,
    pub size: String,
    pub last_modified: String,
    #[serde(rename = "goos")]
    pub os: String,
    #[serde(rename = "goarch")]
    pub arch: String,
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} | os: {:<8} | arch: {:<8} | size: {:<10} | {}",
            self.version, self.os, self.arch, self.size, self.filename
        )
    }
}

/// A raw row from a directory listing, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingRecord {
    pub name: String,
    pub last_modified: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

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

/// Progress narrative of a crawl, delivered to a [`crate::CrawlObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    VersionDirsFound { url: String, count: usize },
    VersionStarted { version: String },
    EntriesHarvested { url: String, count: usize },
    BranchFailed { url: String, reason: String },
    FileSkipped { filename: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::CatalogEntry;

    #[test]
    fn entry_renders_as_one_aligned_line() {
        let entry = CatalogEntry {
            version: "21.0.1".to_string(),
            filename: "openjdk-21.0.1_linux-x64_bin.tar.gz".to_string(),
            url: "https://mirror.example/openjdk/21.0.1/".to_string(),
            size: "195 MiB".to_string(),
            last_modified: "2023-10-17 12:00".to_string(),
            os: "linux".to_string(),
            arch: "amd64".to_string(),
        };
        assert_eq!(
            entry.to_string(),
            "21.0.1     | os: linux    | arch: amd64    | size: 195 MiB    | openjdk-21.0.1_linux-x64_bin.tar.gz"
        );
    }
}
