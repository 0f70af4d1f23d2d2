use crate::error::{EnricherError, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the most recently modified file in `dir` whose name starts with
/// `prefix`. Returns `None` when the directory is missing or holds no match.
pub fn find_latest_incoming(dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches_prefix = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(prefix));
        if !matches_prefix {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if latest.as_ref().map_or(true, |(when, _)| modified > *when) {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

/// Check that a file exists and is not empty
pub fn is_nonempty_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

/// Move a processed input file into `processed_dir` under a timestamped
/// name (`{stem}_{YYYYmmdd_HHMMSS}{ext}`), creating the directory if
/// needed. Returns the new path.
pub fn archive_processed(source: &Path, processed_dir: &Path) -> Result<PathBuf> {
    if !source.exists() {
        return Err(EnricherError::InputNotFound(source.to_path_buf()));
    }
    fs::create_dir_all(processed_dir)?;

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("routes");
    let extension = source
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let destination = processed_dir.join(format!("{stem}_{timestamp}{extension}"));

    fs::rename(source, &destination)?;
    debug!("Archived {} to {}", source.display(), destination.display());

    Ok(destination)
}
