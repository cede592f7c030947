use std::path::PathBuf;

use engine_logging::{engine_debug, engine_error, engine_info};

use crate::adapters::{CrawlContext, CrawlError, Mirror};
use crate::catalog::{build_catalog, write_catalog, CatalogError};
use crate::config::{ConfigError, HarvestConfig};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::{CatalogEntry, CrawlObserver, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] FetchError),
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("async runtime unavailable: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub mirror: Mirror,
    pub entries: usize,
    pub output_path: PathBuf,
}

/// Crawl the configured mirror and return the sorted, deduplicated catalog.
pub async fn harvest(
    config: &HarvestConfig,
    fetcher: &dyn Fetcher,
    observer: &dyn CrawlObserver,
) -> Result<Vec<CatalogEntry>, HarvestError> {
    let adapter = config.mirror.adapter(config.base_url.clone())?;
    config.validate()?;

    engine_info!("Crawling {} at {}", config.mirror, adapter.base_url());
    let ctx = CrawlContext::new(fetcher, observer).with_fanout(config.fetch.max_in_flight);
    let entries = build_catalog(adapter.crawl(&ctx).await?);
    for entry in &entries {
        engine_debug!("{}", entry);
    }
    Ok(entries)
}

/// Blocking driver: crawl, then persist the catalog to `config.output_path`.
pub fn run(config: &HarvestConfig, observer: &dyn CrawlObserver) -> Result<HarvestReport, HarvestError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _guard = runtime.enter();
    let fetcher = ReqwestFetcher::new(config.fetch.clone())?;

    let entries = runtime.block_on(harvest(config, &fetcher, observer)).inspect_err(|err| {
        engine_error!("Harvest of {} failed: {}", config.mirror, err);
    })?;

    write_catalog(&config.output_path, &entries)?;
    engine_info!(
        "Saved {} entries to {}",
        entries.len(),
        config.output_path.display()
    );
    Ok(HarvestReport {
        mirror: config.mirror,
        entries: entries.len(),
        output_path: config.output_path.clone(),
    })
}
