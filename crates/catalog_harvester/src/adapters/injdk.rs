use super::flat::{FlatLayout, ListingFormat, SizeColumn};
use super::{CrawlContext, CrawlError, SiteAdapter};
use crate::metadata::FilenameGrammar;
use crate::CatalogEntry;

/// InJDK mirror. Rows annotate the byte count and an ISO-8601 timestamp in
/// attributes; major 8 still uses the dash-separated filenames, and source
/// bundles sit next to the binaries.
#[derive(Debug, Clone)]
pub struct InjdkAdapter {
    base_url: String,
    layout: FlatLayout,
}

impl InjdkAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layout: FlatLayout {
                format: ListingFormat::Annotated,
                grammar: FilenameGrammar::WithLegacy,
                size: SizeColumn::ByteCount,
                version_filter: None,
            },
        }
    }
}

#[async_trait::async_trait]
impl SiteAdapter for InjdkAdapter {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn crawl(&self, ctx: &CrawlContext<'_>) -> Result<Vec<CatalogEntry>, CrawlError> {
        self.layout.crawl(&self.base_url, ctx).await
    }
}
