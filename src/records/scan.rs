// Record Scanner - List directory entries matching a file name pattern

use crate::error::AuditError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List the files in `dir` whose name matches `pattern`
///
/// Returns full paths, sorted by file name so that reports are stable between
/// runs. Sub-directories are ignored, and so are names that are not valid
/// UTF-8 (a warning is logged for those).
///
/// # Errors
/// Returns `AuditError::DirectoryUnreadable` if the directory is missing, is
/// not a directory, or cannot be listed. This is fatal for a whole audit run.
pub fn list_matching(dir: &Path, pattern: &Regex) -> Result<Vec<PathBuf>, AuditError> {
    let unreadable = |source: std::io::Error| AuditError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut selected = Vec::new();

    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!("Ignoring non UTF-8 file name in {}: {:?}", dir.display(), entry.file_name());
            continue;
        };

        if !pattern.is_match(&name) {
            continue;
        }

        if path.is_dir() {
            debug!("Ignoring directory {}", path.display());
            continue;
        }

        selected.push(path);
    }

    selected.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(selected)
}
