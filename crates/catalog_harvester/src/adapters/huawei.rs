use super::flat::{FlatLayout, ListingFormat, SizeColumn};
use super::{CrawlContext, CrawlError, SiteAdapter};
use crate::metadata::FilenameGrammar;
use crate::CatalogEntry;

/// Huawei Cloud mirror. Each version directory is a `<pre>` index whose
/// size column is already human readable.
#[derive(Debug, Clone)]
pub struct HuaweiAdapter {
    base_url: String,
    layout: FlatLayout,
}

impl HuaweiAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layout: FlatLayout {
                format: ListingFormat::Preformatted,
                grammar: FilenameGrammar::Standard,
                size: SizeColumn::Display,
                version_filter: None,
            },
        }
    }
}

#[async_trait::async_trait]
impl SiteAdapter for HuaweiAdapter {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn crawl(&self, ctx: &CrawlContext<'_>) -> Result<Vec<CatalogEntry>, CrawlError> {
        self.layout.crawl(&self.base_url, ctx).await
    }
}
