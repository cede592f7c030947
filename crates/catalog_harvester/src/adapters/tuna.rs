use futures_util::stream::{self, StreamExt};

use super::{
    list_child_dirs, list_version_dirs, BranchError, CrawlContext, CrawlError, SiteAdapter,
    ARTIFACT_PATTERN,
};
use crate::listing::{parse_file_table, parse_links};
use crate::metadata::{extract_version, map_arch_dir, map_os_dir};
use crate::normalize::normalize_timestamp;
use crate::{CatalogEntry, CrawlEvent};

const JDK_DIR_PATTERN: &str = r"^jdk/$";
const ARCH_DIRS: [&str; 2] = ["x64", "aarch64"];
const OS_NAMES: [&str; 3] = ["windows", "darwin", "linux"];

/// Tsinghua (Adoptium) mirror: `<base>/<version>/jdk/<arch>/<os>/<file>`.
///
/// Platform comes from the directory names, which pass through the lookup
/// tables rather than the strict filename grammar.
#[derive(Debug, Clone)]
pub struct TunaAdapter {
    base_url: String,
}

impl TunaAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn harvest_version(&self, version: String, ctx: &CrawlContext<'_>) -> Vec<CatalogEntry> {
        ctx.emit(CrawlEvent::VersionStarted {
            version: version.trim_end_matches('/').to_string(),
        });
        let version_url = format!("{}{version}", self.base_url);

        let jdk_dir = match find_jdk_dir(&version_url, ctx).await {
            Ok(dir) => dir,
            Err(err) => {
                ctx.branch_failed(&version_url, &err);
                return Vec::new();
            }
        };
        let jdk_url = format!("{version_url}{jdk_dir}");

        let arch_dirs = match list_child_dirs(ctx, &jdk_url).await {
            Ok(dirs) => dirs,
            Err(err) => {
                ctx.branch_failed(&jdk_url, &err);
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for arch_dir in arch_dirs
            .into_iter()
            .filter(|dir| ARCH_DIRS.contains(&dir.trim_end_matches('/')))
        {
            let arch_url = format!("{jdk_url}{arch_dir}");
            entries.extend(harvest_arch(&arch_url, &arch_dir, ctx).await);
        }
        entries
    }
}

#[async_trait::async_trait]
impl SiteAdapter for TunaAdapter {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn crawl(&self, ctx: &CrawlContext<'_>) -> Result<Vec<CatalogEntry>, CrawlError> {
        let versions = list_version_dirs(ctx, &self.base_url).await?;
        let batches: Vec<Vec<CatalogEntry>> = stream::iter(versions)
            .map(|version| self.harvest_version(version, ctx))
            .buffered(ctx.fanout)
            .collect()
            .await;
        Ok(batches.into_iter().flatten().collect())
    }
}

async fn find_jdk_dir(version_url: &str, ctx: &CrawlContext<'_>) -> Result<String, BranchError> {
    let page = ctx.fetch(version_url).await?;
    parse_links(&page, JDK_DIR_PATTERN)?
        .into_iter()
        .next()
        .ok_or_else(|| BranchError::Missing("jdk directory not found".to_string()))
}

/// OS directories under one architecture are fetched concurrently.
async fn harvest_arch(arch_url: &str, arch_dir: &str, ctx: &CrawlContext<'_>) -> Vec<CatalogEntry> {
    let os_dirs = match list_child_dirs(ctx, arch_url).await {
        Ok(dirs) => dirs,
        Err(err) => {
            ctx.branch_failed(arch_url, &err);
            return Vec::new();
        }
    };

    let wanted: Vec<String> = os_dirs
        .into_iter()
        .filter(|dir| OS_NAMES.contains(&map_os_dir(dir).as_str()))
        .collect();

    let batches: Vec<Vec<CatalogEntry>> = stream::iter(wanted)
        .map(|os_dir| async move {
            let os_url = format!("{arch_url}{os_dir}");
            match harvest_files(&os_url, &os_dir, arch_dir, ctx).await {
                Ok(entries) => {
                    ctx.emit(CrawlEvent::EntriesHarvested {
                        url: os_url,
                        count: entries.len(),
                    });
                    entries
                }
                Err(err) => {
                    ctx.branch_failed(&os_url, &err);
                    Vec::new()
                }
            }
        })
        .buffered(ctx.fanout)
        .collect()
        .await;
    batches.into_iter().flatten().collect()
}

async fn harvest_files(
    os_url: &str,
    os_dir: &str,
    arch_dir: &str,
    ctx: &CrawlContext<'_>,
) -> Result<Vec<CatalogEntry>, BranchError> {
    let page = ctx.fetch(os_url).await?;
    let os = map_os_dir(os_dir);
    let arch = map_arch_dir(arch_dir);

    let entries = parse_file_table(&page, ARTIFACT_PATTERN)?
        .into_iter()
        .map(|record| CatalogEntry {
            version: extract_version(&record.name),
            url: format!("{os_url}{}", record.name),
            size: record.size,
            last_modified: normalize_timestamp(&record.last_modified),
            os: os.clone(),
            arch: arch.clone(),
            filename: record.name,
        })
        .collect();
    Ok(entries)
}
