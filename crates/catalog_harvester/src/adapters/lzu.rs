use super::flat::{FlatLayout, ListingFormat, SizeColumn};
use super::{CrawlContext, CrawlError, SiteAdapter};
use crate::metadata::FilenameGrammar;
use crate::CatalogEntry;

/// Version family the Lanzhou mirror is restricted to by default.
pub const LZU_VERSION_FAMILY: &str = "20.";

/// Lanzhou University mirror: `<base>/<version>/openjdk-<v>_<os>-<arch>_bin.<ext>`
/// listed in an HTML table with unformatted byte counts.
#[derive(Debug, Clone)]
pub struct LzuAdapter {
    base_url: String,
    layout: FlatLayout,
}

impl LzuAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layout: FlatLayout {
                format: ListingFormat::Table,
                grammar: FilenameGrammar::Standard,
                size: SizeColumn::ByteCount,
                version_filter: Some(LZU_VERSION_FAMILY.to_string()),
            },
        }
    }

    /// Replace the version-family restriction; `None` visits every version.
    pub fn with_version_filter(mut self, filter: Option<String>) -> Self {
        self.layout.version_filter = filter;
        self
    }
}

#[async_trait::async_trait]
impl SiteAdapter for LzuAdapter {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn crawl(&self, ctx: &CrawlContext<'_>) -> Result<Vec<CatalogEntry>, CrawlError> {
        self.layout.crawl(&self.base_url, ctx).await
    }
}
