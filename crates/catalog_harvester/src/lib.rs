//! Catalog harvester: crawls JDK mirror directory listings into one sorted catalog.
mod adapters;
mod catalog;
mod config;
mod decode;
mod engine;
mod fetch;
mod listing;
mod metadata;
mod normalize;
mod observer;
mod persist;
mod types;

pub use adapters::{
    CrawlContext, CrawlError, HuaweiAdapter, InjdkAdapter, LzuAdapter, Mirror, SiteAdapter,
    TunaAdapter, UnknownMirror, LZU_VERSION_FAMILY,
};
pub use catalog::{build_catalog, catalog_order, render_catalog, write_catalog, CatalogError};
pub use config::{ConfigError, HarvestConfig, DEFAULT_OUTPUT_FILENAME};
pub use decode::decode_body;
pub use engine::{harvest, run, HarvestError, HarvestReport};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
pub use listing::{
    parse_annotated_table, parse_file_table, parse_links, parse_preformatted_listing,
    ListingError,
};
pub use metadata::{
    extract_version, map_arch_dir, map_os_dir, normalize_arch, normalize_os, FilenameError,
    FilenameGrammar, ParsedFilename, UNKNOWN_VERSION,
};
pub use normalize::{format_size, normalize_timestamp};
pub use observer::{CrawlObserver, LogObserver, NullObserver};
pub use persist::{write_atomically, PersistError};
pub use types::{CatalogEntry, CrawlEvent, FailureKind, FetchError, ListingRecord};
