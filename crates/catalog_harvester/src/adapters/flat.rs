use engine_logging::engine_debug;
use futures_util::stream::{self, StreamExt};

use super::{list_version_dirs, BranchError, CrawlContext, CrawlError, ARTIFACT_PATTERN};
use crate::listing::{
    parse_annotated_table, parse_file_table, parse_preformatted_listing, ListingError,
};
use crate::metadata::{extract_version, FilenameGrammar};
use crate::normalize::{format_size, normalize_timestamp};
use crate::{CatalogEntry, CrawlEvent, ListingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListingFormat {
    Table,
    Preformatted,
    Annotated,
}

impl ListingFormat {
    fn parse(self, page: &str, pattern: &str) -> Result<Vec<ListingRecord>, ListingError> {
        match self {
            ListingFormat::Table => parse_file_table(page, pattern),
            ListingFormat::Preformatted => parse_preformatted_listing(page, pattern),
            ListingFormat::Annotated => parse_annotated_table(page, pattern),
        }
    }
}

/// How the size column of a listing is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeColumn {
    /// Already human readable; kept as published.
    Display,
    /// A bare byte count that needs formatting.
    ByteCount,
}

/// Two-level layout: version directories directly containing the artifacts,
/// with platform taken from each filename.
#[derive(Debug, Clone)]
pub(crate) struct FlatLayout {
    pub format: ListingFormat,
    pub grammar: FilenameGrammar,
    pub size: SizeColumn,
    /// Substring a version directory must contain to be visited.
    pub version_filter: Option<String>,
}

impl FlatLayout {
    pub async fn crawl(
        &self,
        base_url: &str,
        ctx: &CrawlContext<'_>,
    ) -> Result<Vec<CatalogEntry>, CrawlError> {
        let versions: Vec<String> = list_version_dirs(ctx, base_url)
            .await?
            .into_iter()
            .filter(|version| {
                self.version_filter
                    .as_deref()
                    .is_none_or(|family| version.contains(family))
            })
            .collect();

        let batches: Vec<Vec<CatalogEntry>> = stream::iter(versions)
            .map(|version| self.harvest_version(base_url, version, ctx))
            .buffered(ctx.fanout)
            .collect()
            .await;
        Ok(batches.into_iter().flatten().collect())
    }

    async fn harvest_version(
        &self,
        base_url: &str,
        version: String,
        ctx: &CrawlContext<'_>,
    ) -> Vec<CatalogEntry> {
        ctx.emit(CrawlEvent::VersionStarted {
            version: version.trim_end_matches('/').to_string(),
        });
        let dir_url = format!("{base_url}{version}");
        match self.harvest_dir(&dir_url, ctx).await {
            Ok(entries) => {
                ctx.emit(CrawlEvent::EntriesHarvested {
                    url: dir_url,
                    count: entries.len(),
                });
                entries
            }
            Err(err) => {
                ctx.branch_failed(&dir_url, &err);
                Vec::new()
            }
        }
    }

    async fn harvest_dir(
        &self,
        dir_url: &str,
        ctx: &CrawlContext<'_>,
    ) -> Result<Vec<CatalogEntry>, BranchError> {
        let page = ctx.fetch(dir_url).await?;
        let records = self.format.parse(&page, ARTIFACT_PATTERN)?;
        Ok(records
            .into_iter()
            .filter_map(|record| self.entry_for(record, dir_url, ctx))
            .collect())
    }

    /// `None` when the filename does not resolve to a supported platform.
    fn entry_for(
        &self,
        record: ListingRecord,
        dir_url: &str,
        ctx: &CrawlContext<'_>,
    ) -> Option<CatalogEntry> {
        let platform = match self.grammar.parse(&record.name) {
            Ok(platform) => platform,
            Err(err) => {
                if !err.is_skip() && !err.is_unknown_platform() {
                    engine_debug!("Unrecognised artifact name under {}: {}", dir_url, err);
                }
                ctx.emit(CrawlEvent::FileSkipped {
                    filename: record.name,
                    reason: err.to_string(),
                });
                return None;
            }
        };

        let size = match self.size {
            SizeColumn::Display => record.size,
            SizeColumn::ByteCount => format_size(&record.size),
        };
        Some(CatalogEntry {
            version: extract_version(&record.name),
            url: format!("{dir_url}{}", record.name),
            size,
            last_modified: normalize_timestamp(&record.last_modified),
            os: platform.os,
            arch: platform.arch,
            filename: record.name,
        })
    }
}
