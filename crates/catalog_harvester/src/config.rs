use std::path::PathBuf;

use url::Url;

use crate::adapters::Mirror;
use crate::fetch::FetchSettings;

pub const DEFAULT_OUTPUT_FILENAME: &str = "jdkindex.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base url {url:?} is not an absolute http(s) url: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Everything one harvest run needs.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub mirror: Mirror,
    /// Traversal root; child paths are appended verbatim, so it ends with `/`.
    pub base_url: String,
    pub output_path: PathBuf,
    pub fetch: FetchSettings,
}

impl HarvestConfig {
    /// Defaults for `mirror`: its published base URL, `jdkindex.json` in the
    /// working directory, default fetch settings.
    pub fn for_mirror(mirror: Mirror) -> Self {
        Self {
            mirror,
            base_url: mirror.default_base_url().to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            fetch: FetchSettings::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };
        let parsed = Url::parse(&self.base_url).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("unsupported scheme"));
        }
        if !self.base_url.ends_with('/') {
            return Err(invalid("must end with '/'"));
        }
        Ok(())
    }
}
