//! One traversal per mirror layout, all producing [`CatalogEntry`] values.
//!
//! Failures below the version-directory listing are branch-local: they are
//! reported to the observer and the crawl moves on to the next sibling. Only a
//! failure to list the version directories aborts a crawl.

mod flat;
mod huawei;
mod injdk;
mod lzu;
mod tuna;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use engine_logging::engine_debug;
use regex::Regex;

use crate::listing::{parse_links, ListingError};
use crate::{CatalogEntry, CrawlEvent, CrawlObserver, FetchError, Fetcher};

pub use huawei::HuaweiAdapter;
pub use injdk::InjdkAdapter;
pub use lzu::{LzuAdapter, LZU_VERSION_FAMILY};
pub use tuna::TunaAdapter;

/// Listing entries worth harvesting.
pub(crate) const ARTIFACT_PATTERN: &str = r"\.(zip|tar\.gz)$";
const VERSION_DIR_PATTERN: &str = r"^(?:\./)?(\d+(?:\.\d+)*)/$";
const CHILD_DIR_PATTERN: &str = r"^[^/]+/$";
const PARENT_DIR: &str = "../";
const DEFAULT_FANOUT: usize = 4;

/// Fallback for indexes the tree parser yields no version anchors for.
static RAW_VERSION_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href="((?:\./)?(\d+(?:\.\d+)*)/)""#).expect("version anchor pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("failed to enumerate version directories at {url}: {reason}")]
    Enumeration { url: String, reason: String },
    #[error("mirror {0} is not implemented")]
    NotImplemented(Mirror),
}

/// Why one branch of the traversal was abandoned.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BranchError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("parse failed: {0}")]
    Listing(#[from] ListingError),
    #[error("{0}")]
    Missing(String),
}

/// Collaborators shared by every adapter during one crawl.
#[derive(Clone, Copy)]
pub struct CrawlContext<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub observer: &'a dyn CrawlObserver,
    /// How many sibling directories are processed at once.
    pub fanout: usize,
}

impl<'a> CrawlContext<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, observer: &'a dyn CrawlObserver) -> Self {
        Self {
            fetcher,
            observer,
            fanout: DEFAULT_FANOUT,
        }
    }

    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout.max(1);
        self
    }

    pub(crate) fn emit(&self, event: CrawlEvent) {
        self.observer.emit(event);
    }

    pub(crate) fn branch_failed(&self, url: &str, err: &BranchError) {
        self.emit(CrawlEvent::BranchFailed {
            url: url.to_string(),
            reason: err.to_string(),
        });
    }

    pub(crate) async fn fetch(&self, url: &str) -> Result<String, BranchError> {
        Ok(self.fetcher.fetch_text(url).await?)
    }
}

/// Produces every catalog entry one mirror publishes.
#[async_trait::async_trait]
pub trait SiteAdapter: Send + Sync {
    fn base_url(&self) -> &str;

    async fn crawl(&self, ctx: &CrawlContext<'_>) -> Result<Vec<CatalogEntry>, CrawlError>;
}

/// The mirrors the harvester knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirror {
    Tuna,
    Lzu,
    Huawei,
    Injdk,
    /// API-based; listed so it can be rejected explicitly.
    Azul,
}

impl Mirror {
    pub const ALL: [Mirror; 5] = [
        Mirror::Tuna,
        Mirror::Lzu,
        Mirror::Huawei,
        Mirror::Injdk,
        Mirror::Azul,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mirror::Tuna => "tuna",
            Mirror::Lzu => "lzu",
            Mirror::Huawei => "huawei",
            Mirror::Injdk => "injdk",
            Mirror::Azul => "azul",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Mirror::Tuna => "https://mirrors.tuna.tsinghua.edu.cn/Adoptium/",
            Mirror::Lzu => "https://mirror4.lzu.edu.cn/openjdk/",
            Mirror::Huawei => "https://mirrors.huaweicloud.com/openjdk/",
            Mirror::Injdk => "https://d10.injdk.cn/openjdk/openjdk/",
            Mirror::Azul => "https://api.azul.com/metadata/v1/zulu/packages",
        }
    }

    /// Build the adapter for this mirror rooted at `base_url`.
    pub fn adapter(self, base_url: impl Into<String>) -> Result<Box<dyn SiteAdapter>, CrawlError> {
        let base_url = base_url.into();
        match self {
            Mirror::Tuna => Ok(Box::new(TunaAdapter::new(base_url))),
            Mirror::Lzu => Ok(Box::new(LzuAdapter::new(base_url))),
            Mirror::Huawei => Ok(Box::new(HuaweiAdapter::new(base_url))),
            Mirror::Injdk => Ok(Box::new(InjdkAdapter::new(base_url))),
            Mirror::Azul => Err(CrawlError::NotImplemented(self)),
        }
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mirror {0:?}")]
pub struct UnknownMirror(pub String);

impl FromStr for Mirror {
    type Err = UnknownMirror;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mirror::ALL
            .into_iter()
            .find(|mirror| mirror.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMirror(s.to_string()))
    }
}

/// Version directories under `base_url`, `./` stripped, trailing slash kept.
pub(crate) async fn list_version_dirs(
    ctx: &CrawlContext<'_>,
    base_url: &str,
) -> Result<Vec<String>, CrawlError> {
    let enumeration_failed = |reason: String| CrawlError::Enumeration {
        url: base_url.to_string(),
        reason,
    };

    let page = ctx
        .fetcher
        .fetch_text(base_url)
        .await
        .map_err(|err| enumeration_failed(err.to_string()))?;
    let mut links =
        parse_links(&page, VERSION_DIR_PATTERN).map_err(|err| enumeration_failed(err.to_string()))?;
    if links.is_empty() {
        engine_debug!("No version anchors parsed at {}, scanning raw markup", base_url);
        links = RAW_VERSION_ANCHOR
            .captures_iter(&page)
            .map(|caps| caps[1].to_string())
            .collect();
    }

    let dirs: Vec<String> = links
        .into_iter()
        .map(|link| link.strip_prefix("./").map(str::to_string).unwrap_or(link))
        .collect();
    ctx.emit(CrawlEvent::VersionDirsFound {
        url: base_url.to_string(),
        count: dirs.len(),
    });
    Ok(dirs)
}

/// Subdirectory links of a listing, without the parent link.
pub(crate) async fn list_child_dirs(
    ctx: &CrawlContext<'_>,
    url: &str,
) -> Result<Vec<String>, BranchError> {
    let page = ctx.fetch(url).await?;
    let dirs = parse_links(&page, CHILD_DIR_PATTERN)?
        .into_iter()
        .filter(|link| link != PARENT_DIR)
        .collect();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::Mirror;

    #[test]
    fn mirror_names_round_trip_case_insensitively() {
        for mirror in Mirror::ALL {
            assert_eq!(mirror.name().parse::<Mirror>(), Ok(mirror));
        }
        assert_eq!("HUAWEI".parse::<Mirror>(), Ok(Mirror::Huawei));
        assert!("sourceforge".parse::<Mirror>().is_err());
    }

    #[test]
    fn placeholder_mirror_is_rejected() {
        let err = Mirror::Azul.adapter(Mirror::Azul.default_base_url()).err();
        assert!(matches!(err, Some(super::CrawlError::NotImplemented(Mirror::Azul))));
    }

    #[test]
    fn implemented_mirrors_build_adapters() {
        for mirror in [Mirror::Tuna, Mirror::Lzu, Mirror::Huawei, Mirror::Injdk] {
            let adapter = mirror.adapter(mirror.default_base_url()).ok();
            assert_eq!(
                adapter.as_ref().map(|a| a.base_url()),
                Some(mirror.default_base_url())
            );
        }
    }
}
