use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::CrawlEvent;

/// Receives the crawl's progress narrative.
pub trait CrawlObserver: Send + Sync {
    fn emit(&self, event: CrawlEvent);
}

/// Writes the narrative to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn emit(&self, event: CrawlEvent) {
        match event {
            CrawlEvent::VersionDirsFound { url, count } => {
                engine_info!("Found {} version directories at {}", count, url);
            }
            CrawlEvent::VersionStarted { version } => {
                engine_info!("Processing version {}", version);
            }
            CrawlEvent::EntriesHarvested { url, count } => {
                engine_info!("Harvested {} entries from {}", count, url);
            }
            CrawlEvent::BranchFailed { url, reason } => {
                engine_warn!("Skipping {}: {}", url, reason);
            }
            CrawlEvent::FileSkipped { filename, reason } => {
                engine_debug!("Skipping file {}: {}", filename, reason);
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CrawlObserver for NullObserver {
    fn emit(&self, _event: CrawlEvent) {}
}
