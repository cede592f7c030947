use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use crate::persist::{write_atomically, PersistError};
use crate::CatalogEntry;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write catalog: {0}")]
    Persist(#[from] PersistError),
}

/// Newest version first by plain string order, then filename ascending.
pub fn catalog_order(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    b.version
        .cmp(&a.version)
        .then_with(|| a.filename.cmp(&b.filename))
}

/// Sort entries into catalog order and drop repeated URLs, keeping the first.
pub fn build_catalog(mut entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    entries.sort_by(catalog_order);
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.url.clone()));
    entries
}

/// Pretty-printed JSON array, two-space indent.
pub fn render_catalog(entries: &[CatalogEntry]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Write the catalog to `path`, replacing whatever was there.
pub fn write_catalog(path: &Path, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    let document = render_catalog(entries)?;
    write_atomically(path, document.as_bytes())?;
    Ok(())
}
