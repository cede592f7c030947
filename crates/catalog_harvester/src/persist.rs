use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} unusable: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Replace `target` with `content` in one step: the bytes go to a temporary
/// file beside it, which is then renamed over the target. Readers never see
/// a half-written document.
pub fn write_atomically(target: &Path, content: &[u8]) -> Result<(), PersistError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| PersistError::OutputDir {
        path: dir.display().to_string(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| PersistError::OutputDir {
        path: dir.display().to_string(),
        source,
    })?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}
